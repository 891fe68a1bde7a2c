use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Density;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidFraction { name: &'static str, value: f64 },
    #[error("step_px must be positive")]
    ZeroStep,
    #[error("tick_delay_ms must be positive")]
    ZeroDelay,
    #[error("density must be a positive finite number, got {0}")]
    InvalidDensity(f64),
    #[error("{name} must be a non-negative finite number, got {value}")]
    InvalidLength { name: &'static str, value: f64 },
}

/// Tunables for a [`ScanOverlay`](crate::ScanOverlay).
///
/// Lengths suffixed `_dp` are density-independent and converted to pixels
/// with [`density`](Self::density). Missing JSON fields fall back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Delay between a draw and the tick it schedules.
    pub tick_delay_ms: u64,
    /// Pixels the sweep line moves per tick.
    pub step_px: i32,
    pub frame_width_fraction: f64,
    pub frame_height_fraction: f64,
    /// Horizontal inset of the sweep line from the frame edges.
    pub line_padding_dp: f64,
    pub border_width_dp: f64,
    pub line_width_dp: f64,
    /// Display density (pixels per dp).
    pub density: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tick_delay_ms: 7,
            step_px: 5,
            frame_width_fraction: 0.80,
            frame_height_fraction: 0.40,
            line_padding_dp: 20.0,
            border_width_dp: 4.0,
            line_width_dp: 2.0,
            density: 1.0,
        }
    }
}

impl OverlayConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Same defaults at another display density.
    pub fn with_density(density: f64) -> Self {
        Self {
            density,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("frame_width_fraction", self.frame_width_fraction),
            ("frame_height_fraction", self.frame_height_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidFraction { name, value });
            }
        }
        if self.step_px <= 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.tick_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay);
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ConfigError::InvalidDensity(self.density));
        }
        for (name, value) in [
            ("line_padding_dp", self.line_padding_dp),
            ("border_width_dp", self.border_width_dp),
            ("line_width_dp", self.line_width_dp),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidLength { name, value });
            }
        }
        Ok(())
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }

    pub fn density(&self) -> Density {
        Density(self.density)
    }

    pub fn line_padding_px(&self) -> f64 {
        self.density().to_px(self.line_padding_dp)
    }

    pub fn border_width_px(&self) -> f64 {
        self.density().to_px(self.border_width_dp)
    }

    pub fn line_width_px(&self) -> f64 {
        self.density().to_px(self.line_width_dp)
    }
}
