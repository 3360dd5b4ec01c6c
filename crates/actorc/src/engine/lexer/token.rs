//! Token definitions for actor source files
//!
//! Only what the structural scan needs is distinguished; everything else in
//! the host language collapses into `Number` or `Punct`.

use logos::{Filter, Logos};
use std::ops::Range;

/// Token with byte range into the source
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]  // Skip whitespace
#[logos(skip r"//[^\n]*")]      // Skip line comments
#[logos(skip r"#(?:[^\\\n]|\\\r?\n|\\[^\n])*")]  // Skip directives, honoring `\` continuations
pub enum TokenKind {
    // === Actor keywords ===
    #[token("ACTOR")]
    Actor,
    #[token("wait")]
    Wait,
    #[token("waitNext")]
    WaitNext,
    #[token("UNCANCELLABLE")]
    Uncancellable,

    // === Host keywords relevant to actor headers ===
    #[token("Future")]
    Future,
    #[token("void")]
    Void,
    #[token("static")]
    Static,
    #[token("template")]
    Template,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[regex(r"[0-9][0-9a-zA-Z_.']*")]
    Number,

    #[regex(r#""(?:[^"\\\n]|\\(?:.|\n))*""#)]
    StringLiteral,
    #[regex(r#""(?:[^"\\\n]|\\(?:.|\n))*"#)]
    UnterminatedString,
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    CharLiteral,
    /// Complete block comments are skipped by the callback
    #[token("/*", block_comment)]
    UnterminatedComment,

    // === Delimiters ===
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(";")]
    Semi,
    #[token("/")]
    Slash,
    #[token("'")]
    Quote,

    /// Any other single character
    #[regex(r#"[^a-zA-Z0-9_{}()<>;"'/# \t\n\r\f]"#)]
    Punct,

    Eof,
}

/// Skip past the closing `*/`, or emit the rest of the file as unterminated
fn block_comment(lex: &mut logos::Lexer<'_, TokenKind>) -> Filter<()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Filter::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            Filter::Emit(())
        }
    }
}
