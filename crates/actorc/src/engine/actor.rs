//! Structural scan of ACTOR declarations
//!
//! The scan checks what the driver can vouch for without a full grammar:
//! block structure, actor headers, and where `wait()` may appear.

use super::emit;
use super::lexer::{Lexer, Token, TokenKind};
use super::{EngineOptions, SourceUnit, Translation, TranslationEngine, Warning};
use crate::common::{CompileError, CompileResult};

/// An ACTOR found in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorDecl {
    pub name: String,
    /// Line of the `ACTOR` keyword
    pub line: usize,
    /// False for forward declarations ending in `;`
    pub has_body: bool,
    /// `wait`/`waitNext` occurrences in the body
    pub waits: usize,
}

/// Open `{`, remembering which actor (if any) it starts
struct Frame {
    line: usize,
    actor: Option<usize>,
}

pub struct ActorScanner<'a> {
    lexer: Lexer<'a>,
    frames: Vec<Frame>,
    actors: Vec<ActorDecl>,
    current: Option<usize>,
}

impl<'a> ActorScanner<'a> {
    pub fn new(name: &'a str, source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(name, source),
            frames: Vec::new(),
            actors: Vec::new(),
            current: None,
        }
    }

    /// Scan the whole file, returning actors in source order
    pub fn scan(mut self) -> CompileResult<Vec<ActorDecl>> {
        loop {
            let token = self.lexer.next_token()?;
            match token.kind {
                TokenKind::Actor => self.actor(&token)?,
                TokenKind::LBrace => {
                    let line = self.line(&token);
                    self.frames.push(Frame { line, actor: None });
                }
                TokenKind::RBrace => self.close_block(&token)?,
                TokenKind::Wait | TokenKind::WaitNext => self.wait(&token)?,
                TokenKind::Eof => return self.finish(),
                _ => {}
            }
        }
    }

    fn line(&self, token: &Token) -> usize {
        self.lexer.line_of(token.span.start)
    }

    fn actor(&mut self, keyword: &Token) -> CompileResult<()> {
        let line = self.line(keyword);
        if self.current.is_some() {
            return Err(CompileError::source_error(line, "ACTOR declared inside another ACTOR"));
        }

        let mut header = Vec::new();
        let mut parens = 0usize;
        let terminator = loop {
            let token = self.lexer.next_token()?;
            match token.kind {
                TokenKind::Eof => {
                    return Err(CompileError::source_error(line, "unterminated ACTOR declaration"));
                }
                TokenKind::LParen => parens += 1,
                TokenKind::RParen => parens = parens.saturating_sub(1),
                TokenKind::LBrace | TokenKind::Semi if parens == 0 => break token,
                _ => {}
            }
            header.push(token.kind);
        };

        if !returns_future_or_void(&header) {
            return Err(CompileError::source_error(line, "ACTOR must return Future<T> or void"));
        }
        let name = actor_name(&header)
            .ok_or_else(|| CompileError::source_error(line, "expected ACTOR name"))?;

        let has_body = matches!(terminator.kind, TokenKind::LBrace);
        let index = self.actors.len();
        log::trace!("ACTOR {name} at line {line} (body: {has_body})");
        self.actors.push(ActorDecl {
            name,
            line,
            has_body,
            waits: 0,
        });

        if has_body {
            let line = self.line(&terminator);
            self.frames.push(Frame {
                line,
                actor: Some(index),
            });
            self.current = Some(index);
        }
        Ok(())
    }

    fn close_block(&mut self, token: &Token) -> CompileResult<()> {
        match self.frames.pop() {
            Some(frame) => {
                if frame.actor.is_some() {
                    self.current = None;
                }
                Ok(())
            }
            None => Err(self.lexer.error_at(token.span.start, "unmatched '}'")),
        }
    }

    fn wait(&mut self, token: &Token) -> CompileResult<()> {
        match self.current {
            Some(index) => {
                self.actors[index].waits += 1;
                Ok(())
            }
            // A bare `wait` identifier is fine; a call is not.
            None if self.lexer.check(&TokenKind::LParen)? => {
                Err(self.lexer.error_at(token.span.start, "wait() used outside of an ACTOR"))
            }
            None => Ok(()),
        }
    }

    fn finish(self) -> CompileResult<Vec<ActorDecl>> {
        match self.frames.last() {
            Some(frame) => Err(CompileError::source_error(frame.line, "unmatched '{'")),
            None => Ok(self.actors),
        }
    }
}

/// Header must start with `Future` or `void`, after an optional
/// `template<...>` clause and `static`/`UNCANCELLABLE`/`inline` modifiers.
fn returns_future_or_void(header: &[TokenKind]) -> bool {
    let mut rest = header;
    if let [TokenKind::Template, TokenKind::Lt, tail @ ..] = rest {
        let mut depth = 1usize;
        let mut consumed = 0;
        for kind in tail {
            consumed += 1;
            match kind {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        rest = &tail[consumed..];
    }

    let return_type = rest.iter().find(|kind| match kind {
        TokenKind::Static | TokenKind::Uncancellable => false,
        TokenKind::Identifier(name) => name != "inline",
        _ => true,
    });
    matches!(return_type, Some(TokenKind::Future | TokenKind::Void))
}

/// Identifier directly before the parameter list
fn actor_name(header: &[TokenKind]) -> Option<String> {
    let mut angles = 0usize;
    let mut previous: Option<&TokenKind> = None;
    for kind in header {
        match kind {
            TokenKind::Lt => angles += 1,
            TokenKind::Gt => angles = angles.saturating_sub(1),
            TokenKind::LParen if angles == 0 => {
                return match previous {
                    Some(TokenKind::Identifier(name)) => Some(name.clone()),
                    _ => None,
                };
            }
            _ => {}
        }
        previous = Some(kind);
    }
    None
}

/// Engine shipped with the binary: validates actor structure and emits the
/// source behind a generated-file banner.
#[derive(Debug, Default)]
pub struct ActorEngine;

impl ActorEngine {
    pub fn new() -> Self {
        Self
    }
}

impl TranslationEngine for ActorEngine {
    fn name(&self) -> &'static str {
        "actor"
    }

    fn translate(
        &self,
        unit: &SourceUnit<'_>,
        options: &EngineOptions,
    ) -> CompileResult<Translation> {
        let actors = ActorScanner::new(&unit.input_path, unit.text).scan()?;
        log::debug!("{}: {} actor(s)", unit.input_path, actors.len());

        let warnings = if options.warn_actor_without_wait {
            actors
                .iter()
                .filter(|actor| actor.has_body && actor.waits == 0)
                .map(|actor| {
                    Warning::new(
                        actor.line,
                        format!("ACTOR {} does not contain a wait() statement", actor.name),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(Translation {
            text: emit::render(unit),
            warnings,
        })
    }
}
