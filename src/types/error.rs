use thiserror::Error;

use super::Loc;
use crate::parse::ParseError;

/// Fatal conditions raised while resolving a rule. Each one ends the current
/// build-file pass.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("{loc}: *** mixed implicit and normal rules: deprecated syntax")]
    MixedRules { loc: Loc },

    #[error("{loc}: *** missing target pattern.")]
    MissingTargetPattern { loc: Loc },

    #[error("{loc}: *** multiple target patterns.")]
    MultipleTargetPatterns { loc: Loc },

    #[error("{loc}: *** target pattern contains no '%'.")]
    NoWildcard { loc: Loc, pattern: String },

    #[error("{loc}: separator at byte {pos} is not ';'")]
    BadSeparator { loc: Loc, pos: usize },

    #[error("{loc}: target `{output}' doesn't match pattern `{pattern}'")]
    PatternMismatch {
        loc: Loc,
        pattern: String,
        output: String,
    },

    #[error("{loc}: {source}")]
    Expr {
        loc: Loc,
        #[source]
        source: ParseError,
    },
}

impl RuleError {
    /// Where the error was detected.
    #[must_use]
    pub fn loc(&self) -> &Loc {
        match self {
            RuleError::MixedRules { loc }
            | RuleError::MissingTargetPattern { loc }
            | RuleError::MultipleTargetPatterns { loc }
            | RuleError::NoWildcard { loc, .. }
            | RuleError::BadSeparator { loc, .. }
            | RuleError::PatternMismatch { loc, .. }
            | RuleError::Expr { loc, .. } => loc,
        }
    }
}
