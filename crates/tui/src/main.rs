mod raster;
mod renderer;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use scan_frame_core::OverlayConfig;

/// Log file path; logging is off when unset since the terminal belongs to
/// the UI.
const LOG_ENV: &str = "SCAN_FRAME_LOG";

fn main() -> Result<()> {
    init_logging()?;

    let config = match std::env::args().nth(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            let data = std::fs::read(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            OverlayConfig::from_json(&data)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => terminal_config(),
    };

    renderer::run_tui(config)
}

/// One terminal cell is one pixel, so the stock dp lengths are scaled down
/// and the sweep slowed to a pace a terminal can show.
fn terminal_config() -> OverlayConfig {
    OverlayConfig {
        tick_delay_ms: 40,
        step_px: 1,
        density: 0.25,
        ..OverlayConfig::default()
    }
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", PathBuf::from(&path).display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .init();
    Ok(())
}
