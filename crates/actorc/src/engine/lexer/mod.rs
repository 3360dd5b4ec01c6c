//! Lexer module for tokenizing actor source files

mod scanner;
mod token;

pub use scanner::Lexer;
pub use token::{Token, TokenKind};
