//! Display-glyph normalization.
//!
//! Calculator keypads show `×`, `÷` and `−`; the grammar only knows the
//! ASCII operators. Nothing else in the input is touched.

use std::borrow::Cow;

/// Display glyph → canonical ASCII operator.
pub const GLYPHS: &[(char, char)] = &[
    ('\u{00D7}', '*'), // ×
    ('\u{00F7}', '/'), // ÷
    ('\u{2212}', '-'), // −
];

fn canonical(ch: char) -> Option<char> {
    GLYPHS
        .iter()
        .find(|(glyph, _)| *glyph == ch)
        .map(|(_, ascii)| *ascii)
}

/// Replace display glyphs with their ASCII operators.
///
/// Borrows the input when there is nothing to replace.
pub fn normalize(expression: &str) -> Cow<'_, str> {
    if !expression.chars().any(|c| canonical(c).is_some()) {
        return Cow::Borrowed(expression);
    }
    Cow::Owned(
        expression
            .chars()
            .map(|c| canonical(c).unwrap_or(c))
            .collect(),
    )
}
