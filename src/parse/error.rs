use std::fmt;

/// Errors produced when parsing deferred-expression text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
    offset: Option<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
        }
    }

    pub(crate) fn at(offset: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: Some(offset),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset into the parsed text, when known.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "parse error at byte {offset}: {}", self.message),
            None => write!(f, "parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ParseError::new("unterminated variable reference");
        assert_eq!(err.to_string(), "parse error: unterminated variable reference");
    }

    #[test]
    fn error_display_with_offset() {
        let err = ParseError::at(5, "unterminated variable reference");
        assert_eq!(err.offset(), Some(5));
        assert_eq!(
            err.to_string(),
            "parse error at byte 5: unterminated variable reference"
        );
    }
}
