pub mod config;
pub mod geometry;
pub mod overlay;
pub mod scheduler;
pub mod sweep;

pub use config::{ConfigError, OverlayConfig};
pub use geometry::{Density, FrameGeometry, LineBounds};
pub use overlay::ScanOverlay;
pub use scheduler::{DeadlineScheduler, ManualScheduler, Scheduler, TickHandle};
pub use sweep::{Direction, Sweep, SweepAnimator, SweepState};
