//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show every verdict along with what each check looked at.
    Verbose,
    /// Show progress and every verdict.
    #[default]
    Normal,
    /// Show verdicts only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows headers and other decoration.
    pub fn shows_decoration(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode lists each check's target under its verdict.
    pub fn shows_targets(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}
