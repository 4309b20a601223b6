use std::fmt;

use super::{Loc, RuleError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A message tied to a source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub loc: Loc,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(loc: Loc, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            loc,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "{}: warning: {}", self.loc, self.message),
            Severity::Error => write!(f, "{}: {}", self.loc, self.message),
        }
    }
}

impl From<&RuleError> for Diagnostic {
    fn from(err: &RuleError) -> Self {
        let loc = err.loc().clone();
        // The error's Display already leads with the location.
        let rendered = err.to_string();
        let prefix = format!("{loc}: ");
        let message = rendered
            .strip_prefix(&prefix)
            .map_or_else(|| rendered.clone(), str::to_owned);
        Self {
            severity: Severity::Error,
            loc,
            message,
        }
    }
}

/// Ordered collector for the diagnostics of one build-file pass.
///
/// Warnings are recorded here and also logged through `tracing`; the caller
/// decides what to print.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a non-fatal warning.
    pub fn warn(&mut self, loc: &Loc, message: impl Into<String>) {
        let diag = Diagnostic::warning(loc.clone(), message);
        tracing::warn!(
            file = %diag.loc.filename,
            line = diag.loc.line,
            "{}",
            diag.message
        );
        self.entries.push(diag);
    }

    /// Record a fatal error that was returned to the caller.
    pub fn error(&mut self, err: &RuleError) {
        self.entries.push(Diagnostic::from(err));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
