use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    /// Camera preview showing through the cut-out.
    Background,

    /// Dimmed overlay outside the scan frame.
    Scrim,
    FrameBorder,
    SweepLine,
}
