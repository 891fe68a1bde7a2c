use scan_frame_protocol::{Point, Rect};

/// Pixels per density-independent unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density(pub f64);

impl Density {
    #[inline]
    pub fn to_px(self, dp: f64) -> f64 {
        dp * self.0
    }
}

/// Derives the scan-frame rectangle from the surface size.
///
/// The frame is a fixed fraction of each surface dimension, centered on
/// both axes. Nothing is cached: the surface may resize between draws, so
/// callers recompute on every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    pub width_fraction: f64,
    pub height_fraction: f64,
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self {
            width_fraction: 0.80,
            height_fraction: 0.40,
        }
    }
}

impl FrameGeometry {
    pub fn new(width_fraction: f64, height_fraction: f64) -> Self {
        Self {
            width_fraction,
            height_fraction,
        }
    }

    /// Compute the frame for a `view_width` x `view_height` surface.
    ///
    /// Negative (or NaN) dimensions are treated as zero, which yields a
    /// zero-area rect at the center.
    pub fn compute_frame_rect(&self, view_width: f64, view_height: f64) -> Rect {
        let view_width = view_width.max(0.0);
        let view_height = view_height.max(0.0);

        let frame_width = view_width * self.width_fraction;
        let frame_height = view_height * self.height_fraction;

        let left = (view_width - frame_width) / 2.0;
        let top = (view_height - frame_height) / 2.0;

        Rect::new(left, top, frame_width, frame_height)
    }
}

/// Endpoints of the horizontal sweep line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBounds {
    pub start: Point,
    pub end: Point,
}

/// Place the sweep line inside `frame`, `offset` pixels below its top edge.
///
/// The line is inset by `padding` plus half the border stroke on each side
/// so it never touches the frame outline.
pub fn line_bounds(frame: &Rect, padding: f64, stroke_width: f64, offset: i32) -> LineBounds {
    let inset = padding + stroke_width / 2.0;
    let y = frame.top() + f64::from(offset);
    LineBounds {
        start: Point::new(frame.left() + inset, y),
        end: Point::new(frame.right() - inset, y),
    }
}

/// Whole-pixel travel range of the sweep line for `frame`.
pub fn sweep_bound(frame: &Rect) -> i32 {
    // `as` saturates and truncates toward zero.
    frame.h as i32
}
