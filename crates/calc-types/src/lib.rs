//! Shared types for the calculator pipeline.
//!
//! This crate defines the AST node types, source spans, error types,
//! and the evaluation limits used across the lexer, parser and evaluator.

mod error;
mod limits;
mod span;
pub mod ast;

pub use error::{
    is_error_display, CalcError, ErrorCode, ErrorKind, DIVISION_BY_ZERO_DISPLAY, ERROR_DISPLAY,
    SYNTAX_ERROR_DISPLAY,
};
pub use limits::Limits;
pub use span::Span;

/// Result type used throughout the calculator pipeline.
pub type CalcResult<T> = std::result::Result<T, CalcError>;
