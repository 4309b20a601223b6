use thiserror::Error;

use crate::parse::ParseError;
use crate::RuleError;

/// Unified error type covering expression parsing and rule resolution.
#[derive(Debug, Error)]
pub enum MkruleError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

impl MkruleError {
    /// The location the error refers to, if it has one.
    #[must_use]
    pub fn loc(&self) -> Option<&crate::Loc> {
        match self {
            MkruleError::Parse(_) => None,
            MkruleError::Rule(err) => Some(err.loc()),
        }
    }
}
