use scan_frame_protocol::{Rect, RenderCommand, Size, ThemeToken};
use tracing::{debug, trace};

use crate::config::{ConfigError, OverlayConfig};
use crate::geometry::{self, FrameGeometry};
use crate::scheduler::{Scheduler, TickHandle};
use crate::sweep::{SweepAnimator, SweepState};

/// Scanning-frame overlay: scrim with a cut-out, frame border, and a sweep
/// line bouncing inside the frame.
///
/// The redraw loop runs as draw → schedule tick → tick → request redraw →
/// draw. Only [`draw`](Self::draw) schedules, and only into an empty slot,
/// so at most one tick is ever outstanding.
#[derive(Debug)]
pub struct ScanOverlay<S> {
    config: OverlayConfig,
    geometry: FrameGeometry,
    size: Size,
    animator: SweepAnimator,
    running: bool,
    line_visible: bool,
    pending: Option<TickHandle>,
    redraw_requested: bool,
    scheduler: S,
}

impl<S: Scheduler> ScanOverlay<S> {
    /// A new overlay starts animating, like a freshly attached view.
    ///
    /// Fails if `config` does not pass [`OverlayConfig::validate`].
    pub fn new(config: OverlayConfig, scheduler: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            geometry: FrameGeometry::new(config.frame_width_fraction, config.frame_height_fraction),
            animator: SweepAnimator::new(config.step_px),
            config,
            size: Size::default(),
            running: true,
            line_visible: true,
            pending: None,
            redraw_requested: true,
            scheduler,
        })
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Layout change. Negative dimensions are treated as zero.
    pub fn resize(&mut self, width: i32, height: i32) {
        let size = Size::new(width, height);
        if size != self.size {
            debug!(width = size.width, height = size.height, "overlay resized");
            self.size = size;
        }
        self.redraw_requested = true;
    }

    pub fn view_size(&self) -> Size {
        self.size
    }

    /// The region a decoder should analyze, in surface pixels.
    pub fn scan_rect(&self) -> Rect {
        self.geometry
            .compute_frame_rect(f64::from(self.size.width), f64::from(self.size.height))
    }

    pub fn sweep_state(&self) -> SweepState {
        self.animator.state()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_line_visible(&self) -> bool {
        self.line_visible
    }

    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Produce one frame and, while running, arm the next tick.
    pub fn draw(&mut self) -> Vec<RenderCommand> {
        self.redraw_requested = false;

        let frame = self.scan_rect();
        let border_width = self.config.border_width_px();
        let mut commands = Vec::with_capacity(5);

        commands.push(RenderCommand::DrawRect {
            rect: self.size.bounds(),
            color: ThemeToken::Scrim,
        });
        // Clearing the outline as well keeps the border pixels crisp where
        // the stroke overlaps the scrim.
        commands.push(RenderCommand::EraseRect {
            rect: frame,
            stroke_width: None,
        });
        commands.push(RenderCommand::EraseRect {
            rect: frame,
            stroke_width: Some(border_width),
        });

        if self.line_visible {
            // A resize since the last tick may have shrunk the frame under
            // the line; the next tick clamps the state itself.
            let offset = self.animator.offset().min(geometry::sweep_bound(&frame));
            let line = geometry::line_bounds(
                &frame,
                self.config.line_padding_px(),
                border_width,
                offset,
            );
            commands.push(RenderCommand::DrawLine {
                from: line.start,
                to: line.end,
                color: ThemeToken::SweepLine,
                width: self.config.line_width_px(),
            });
        }

        commands.push(RenderCommand::StrokeRect {
            rect: frame,
            color: ThemeToken::FrameBorder,
            width: border_width,
        });

        if self.running && self.pending.is_none() {
            self.pending = Some(self.scheduler.schedule_after(self.config.tick_delay()));
        }

        commands
    }

    /// Deliver a due tick. Returns `false` and changes nothing unless
    /// `handle` is the tick this overlay is waiting on.
    pub fn tick(&mut self, handle: TickHandle) -> bool {
        if self.pending != Some(handle) {
            trace!(?handle, "ignoring stale tick");
            return false;
        }
        self.pending = None;

        let bound = geometry::sweep_bound(&self.scan_rect());
        let state = self.animator.tick(bound);
        trace!(offset = state.offset, direction = ?state.direction, "sweep tick");

        self.redraw_requested = true;
        true
    }

    /// Resume animating. Keeps the current offset and any pending tick.
    pub fn start(&mut self) {
        if !self.running {
            debug!("scan animation started");
        }
        self.running = true;
        self.line_visible = true;
        self.redraw_requested = true;
    }

    /// Halt animating, hide the line and rewind it to the top.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        if self.running {
            debug!("scan animation stopped");
        }
        self.running = false;
        self.line_visible = false;
        self.animator.reset();
        self.redraw_requested = true;
    }
}
