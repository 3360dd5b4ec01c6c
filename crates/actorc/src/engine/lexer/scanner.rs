//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult};
use codespan_reporting::files::{Files, SimpleFile};
use logos::Logos;

/// Lexer for actor source files
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    file: SimpleFile<&'a str, &'a str>,
    peeked: Option<Token>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(name: &'a str, source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            file: SimpleFile::new(name, source),
            peeked: None,
            at_eof: false,
        }
    }

    /// Get the next token
    ///
    /// Unterminated literals and comments are reported here so callers never
    /// see them as tokens.
    pub fn next_token(&mut self) -> CompileResult<Token> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }

        if self.at_eof {
            let len = self.inner.source().len();
            return Ok(Token::new(TokenKind::Eof, len..len));
        }

        match self.inner.next() {
            Some(Ok(TokenKind::UnterminatedString)) => {
                Err(self.error_at(self.inner.span().start, "unterminated string literal"))
            }
            Some(Ok(TokenKind::UnterminatedComment)) => {
                Err(self.error_at(self.inner.span().start, "unterminated block comment"))
            }
            Some(Ok(kind)) => Ok(Token::new(kind, self.inner.span())),
            Some(Err(())) => {
                // The failed span can run far past the offending character.
                let found = self.inner.slice().chars().next().unwrap_or_default();
                let message = format!("unexpected character '{found}'");
                Err(self.error_at(self.inner.span().start, message))
            }
            None => {
                self.at_eof = true;
                let len = self.inner.source().len();
                Ok(Token::new(TokenKind::Eof, len..len))
            }
        }
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> CompileResult<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Check if the next token matches the expected kind
    pub fn check(&mut self, expected: &TokenKind) -> CompileResult<bool> {
        Ok(std::mem::discriminant(&self.peek()?.kind) == std::mem::discriminant(expected))
    }

    /// 1-based line containing `offset`
    pub fn line_of(&self, offset: usize) -> usize {
        self.file.line_index((), offset).map_or(1, |index| index + 1)
    }

    /// Source error attributed to the line containing `offset`
    pub fn error_at(&self, offset: usize, message: impl Into<String>) -> CompileError {
        CompileError::source_error(self.line_of(offset), message)
    }
}
