use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The overlay emits a `Vec<RenderCommand>` for each frame. Renderers
/// consume this list sequentially, in order. Later commands paint over
/// (or erase) the output of earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Fill a rectangle.
    DrawRect { rect: Rect, color: ThemeToken },

    /// Outline a rectangle with a stroke centered on its edges.
    StrokeRect {
        rect: Rect,
        color: ThemeToken,
        width: f64,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Clear pixels back to transparent. With `stroke_width: None` the whole
    /// rect is cleared; with `Some(w)` only an outline of width `w` centered
    /// on the rect edges is cleared.
    EraseRect {
        rect: Rect,
        stroke_width: Option<f64>,
    },
}
