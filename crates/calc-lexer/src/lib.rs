//! Calculator lexer: normalizes display glyphs and converts expression text
//! into a token stream.

pub mod lexer;
pub mod normalize;
pub mod token;

pub use lexer::Lexer;
pub use normalize::normalize;
pub use token::{Token, TokenKind, RESERVED_WORDS};
