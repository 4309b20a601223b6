use std::fmt;
use std::sync::Arc;

/// A position in a build file: file name and 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Loc {
    pub filename: Arc<str>,
    pub line: u32,
}

impl Loc {
    #[must_use]
    pub fn new(filename: impl Into<Arc<str>>, line: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
        }
    }

    /// The same file at a different line.
    #[must_use]
    pub fn with_line(&self, line: u32) -> Self {
        Self {
            filename: Arc::clone(&self.filename),
            line,
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Loc::new("Makefile", 12).to_string(), "Makefile:12");
    }

    #[test]
    fn with_line_shares_filename() {
        let loc = Loc::new("build.mk", 3);
        let cmd = loc.with_line(4);
        assert!(Arc::ptr_eq(&loc.filename, &cmd.filename));
        assert_eq!(cmd.to_string(), "build.mk:4");
    }
}
