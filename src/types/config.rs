use crate::inputs::{Expansion, Glob};

/// Settings for resolving rules.
///
/// # Example
///
/// ```
/// use mkrule::{Config, Expansion, FsGlob};
///
/// let glob = FsGlob::new();
/// let config = Config::new().export_mode(true);
/// assert!(matches!(config.expansion(&glob), Expansion::Suppressed));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    export_mode: bool,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules are being exported to a toolchain that expands wildcards
    /// itself, so inputs must not be globbed eagerly.
    #[must_use]
    pub fn export_mode(mut self, enabled: bool) -> Self {
        self.export_mode = enabled;
        self
    }

    #[must_use]
    pub fn is_export_mode(&self) -> bool {
        self.export_mode
    }

    /// The input expansion these settings call for.
    #[must_use]
    pub fn expansion<'g>(&self, glob: &'g dyn Glob) -> Expansion<'g> {
        if self.export_mode {
            Expansion::Suppressed
        } else {
            Expansion::Eager(glob)
        }
    }
}
