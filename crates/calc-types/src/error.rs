use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Displayed for malformed or disallowed expressions.
pub const SYNTAX_ERROR_DISPLAY: &str = "Syntax Error";
/// Displayed when any division has a zero divisor.
pub const DIVISION_BY_ZERO_DISPLAY: &str = "Cannot divide by zero";
/// Displayed for every other evaluation failure.
pub const ERROR_DISPLAY: &str = "Error";

/// Returns `true` if `result` is one of the fixed error display strings.
///
/// Identifier rejections are deliberately absent: their message names the
/// offending identifier and is not part of this fixed set.
pub fn is_error_display(result: &str) -> bool {
    matches!(
        result,
        ERROR_DISPLAY | SYNTAX_ERROR_DISPLAY | DIVISION_BY_ZERO_DISPLAY
    )
}

/// Error kind, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Syntax,
    DisallowedConstruct,
    NameNotAllowed,
    DivisionByZero,
    Evaluation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::DisallowedConstruct => write!(f, "disallowed construct"),
            Self::NameNotAllowed => write!(f, "name not allowed"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::Evaluation => write!(f, "evaluation"),
        }
    }
}

/// Numeric error code (E100–E499).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const UNEXPECTED_TOKEN: Self = Self(100);
    pub const UNCLOSED_PAREN: Self = Self(101);
    pub const UNEXPECTED_CHARACTER: Self = Self(102);
    pub const INVALID_NUMBER: Self = Self(103);
    pub const UNEXPECTED_END: Self = Self(104);
    pub const DISALLOWED_CONSTRUCT: Self = Self(110);
    pub const NESTING_LIMIT_EXCEEDED: Self = Self(120);
    pub const INPUT_TOO_LONG: Self = Self(121);

    // ── Name errors (E200–E299) ──
    pub const NAME_NOT_ALLOWED: Self = Self(200);

    // ── Division errors (E300–E399) ──
    pub const DIVISION_BY_ZERO: Self = Self(300);

    // ── Evaluation errors (E400–E499) ──
    pub const DOMAIN_ERROR: Self = Self(400);
    pub const OVERFLOW: Self = Self(401);
    pub const TYPE_MISMATCH: Self = Self(402);
    pub const WRONG_ARG_COUNT: Self = Self(403);
    pub const GAS_EXHAUSTED: Self = Self(404);

    /// Get the kind for this error code.
    pub fn kind(self) -> ErrorKind {
        match self.0 {
            110 => ErrorKind::DisallowedConstruct,
            100..=199 => ErrorKind::Syntax,
            200..=299 => ErrorKind::NameNotAllowed,
            300..=399 => ErrorKind::DivisionByZero,
            _ => ErrorKind::Evaluation,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Any failure of the expression pipeline.
///
/// The `Display` impl carries diagnostic detail for logs. Callers that show
/// the error to a user go through [`CalcError::display_message`] instead.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalcError {
    /// Malformed expression or a structural limit was exceeded.
    #[error("{code}: {message} ({span})")]
    Syntax {
        code: ErrorCode,
        message: String,
        span: Span,
    },

    /// Well-formed text that is not an arithmetic expression.
    #[error("{construct} is not allowed ({span})")]
    DisallowedConstruct { construct: String, span: Span },

    /// Identifier outside the whitelist.
    #[error("Use of {name} not allowed")]
    NameNotAllowed { name: String, span: Span },

    /// Zero divisor.
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Any other runtime failure.
    #[error("{code}: {message}")]
    Evaluation { code: ErrorCode, message: String },
}

impl CalcError {
    pub fn syntax(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self::Syntax {
            code,
            message: message.into(),
            span,
        }
    }

    pub fn disallowed(construct: impl Into<String>, span: Span) -> Self {
        Self::DisallowedConstruct {
            construct: construct.into(),
            span,
        }
    }

    pub fn name_not_allowed(name: impl Into<String>, span: Span) -> Self {
        Self::NameNotAllowed {
            name: name.into(),
            span,
        }
    }

    pub fn evaluation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Evaluation {
            code,
            message: message.into(),
        }
    }

    /// The error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Syntax { code, .. } | Self::Evaluation { code, .. } => *code,
            Self::DisallowedConstruct { .. } => ErrorCode::DISALLOWED_CONSTRUCT,
            Self::NameNotAllowed { .. } => ErrorCode::NAME_NOT_ALLOWED,
            Self::DivisionByZero => ErrorCode::DIVISION_BY_ZERO,
        }
    }

    /// The error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::DisallowedConstruct { .. } => ErrorKind::DisallowedConstruct,
            Self::NameNotAllowed { .. } => ErrorKind::NameNotAllowed,
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::Evaluation { .. } => ErrorKind::Evaluation,
        }
    }

    /// Source location, when the error is tied to one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Syntax { span, .. }
            | Self::DisallowedConstruct { span, .. }
            | Self::NameNotAllowed { span, .. } => Some(*span),
            Self::DivisionByZero | Self::Evaluation { .. } => None,
        }
    }

    /// The user-visible message. No internal detail leaks through here.
    pub fn display_message(&self) -> String {
        match self {
            Self::Syntax { .. } | Self::DisallowedConstruct { .. } => {
                SYNTAX_ERROR_DISPLAY.to_string()
            }
            Self::NameNotAllowed { name, .. } => format!("Use of {name} not allowed"),
            Self::DivisionByZero => DIVISION_BY_ZERO_DISPLAY.to_string(),
            Self::Evaluation { .. } => ERROR_DISPLAY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_ranges_map_to_kinds() {
        assert_eq!(ErrorCode::UNEXPECTED_TOKEN.kind(), ErrorKind::Syntax);
        assert_eq!(ErrorCode::INPUT_TOO_LONG.kind(), ErrorKind::Syntax);
        assert_eq!(
            ErrorCode::DISALLOWED_CONSTRUCT.kind(),
            ErrorKind::DisallowedConstruct
        );
        assert_eq!(ErrorCode::NAME_NOT_ALLOWED.kind(), ErrorKind::NameNotAllowed);
        assert_eq!(ErrorCode::DIVISION_BY_ZERO.kind(), ErrorKind::DivisionByZero);
        assert_eq!(ErrorCode::GAS_EXHAUSTED.kind(), ErrorKind::Evaluation);
    }

    #[test]
    fn code_matches_kind_for_every_variant() {
        let errors = [
            CalcError::syntax(ErrorCode::UNCLOSED_PAREN, "missing ')'", Span::new(0, 1)),
            CalcError::disallowed("assignment", Span::new(2, 3)),
            CalcError::name_not_allowed("foo", Span::new(0, 3)),
            CalcError::DivisionByZero,
            CalcError::evaluation(ErrorCode::DOMAIN_ERROR, "math domain error"),
        ];
        for err in &errors {
            assert_eq!(err.code().kind(), err.kind(), "{err}");
        }
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            CalcError::syntax(ErrorCode::UNEXPECTED_TOKEN, "x", Span::default()).display_message(),
            "Syntax Error"
        );
        assert_eq!(
            CalcError::disallowed("keyword 'import'", Span::default()).display_message(),
            "Syntax Error"
        );
        assert_eq!(
            CalcError::name_not_allowed("os", Span::default()).display_message(),
            "Use of os not allowed"
        );
        assert_eq!(CalcError::DivisionByZero.display_message(), "Cannot divide by zero");
        assert_eq!(
            CalcError::evaluation(ErrorCode::OVERFLOW, "too big").display_message(),
            "Error"
        );
    }

    #[test]
    fn diagnostic_display_carries_detail() {
        let err = CalcError::syntax(ErrorCode::UNCLOSED_PAREN, "expected ')'", Span::new(3, 3));
        assert_eq!(err.to_string(), "E101: expected ')' (col 4)");
    }

    #[test]
    fn error_display_set() {
        assert!(is_error_display("Error"));
        assert!(is_error_display("Syntax Error"));
        assert!(is_error_display("Cannot divide by zero"));
        assert!(!is_error_display("Use of foo not allowed"));
        assert!(!is_error_display("0"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(CalcError::name_not_allowed("foo", Span::new(0, 3))).unwrap();
        assert_eq!(json["kind"], "name_not_allowed");
        assert_eq!(json["name"], "foo");
    }
}
