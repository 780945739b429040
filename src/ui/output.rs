//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show progress and status.
    #[default]
    Normal,
    /// Show only the final status line.
    Quiet,
    /// Show nothing except errors (used when stdout carries JSON).
    Silent,
}

impl OutputMode {
    /// Check if this mode shows per-image progress lines.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
