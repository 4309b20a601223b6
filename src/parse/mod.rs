mod error;
mod grammar;

pub use error::ParseError;

use crate::types::Part;

pub(crate) use grammar::is_space;

/// Split `text` into whitespace-separated words.
#[must_use]
pub fn words(text: &str) -> Vec<&str> {
    use winnow::Parser;
    // The word grammar accepts every input.
    grammar::words.parse(text).unwrap_or_default()
}

/// Parse deferred-expression text into its parts.
///
/// # Errors
///
/// Returns [`ParseError`] if a variable reference is not terminated.
pub fn parse_expr(text: &str) -> Result<Vec<Part>, ParseError> {
    use winnow::Parser;
    grammar::expr.parse(text).map_err(|e| {
        ParseError::at(e.offset(), "unterminated variable reference")
    })
}
