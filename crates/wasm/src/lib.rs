use std::cell::RefCell;
use std::time::Duration;

use scan_frame_core::{ManualScheduler, OverlayConfig, ScanOverlay};
use serde::Serialize;
use wasm_bindgen::prelude::*;

type Overlay = ScanOverlay<ManualScheduler>;

thread_local! {
    // Slots are never reused so a destroyed handle stays invalid.
    static OVERLAYS: RefCell<Vec<Option<Overlay>>> = const { RefCell::new(Vec::new()) };
}

fn with_overlay<T>(
    handle: usize,
    f: impl FnOnce(&mut Overlay) -> Result<T, JsError>,
) -> Result<T, JsError> {
    OVERLAYS.with(|overlays| {
        let mut overlays = overlays.borrow_mut();
        let overlay = overlays
            .get_mut(handle)
            .and_then(Option::as_mut)
            .ok_or_else(|| JsError::new("invalid overlay handle"))?;
        f(overlay)
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

fn register(overlay: Overlay) -> usize {
    OVERLAYS.with(|overlays| {
        let mut overlays = overlays.borrow_mut();
        overlays.push(Some(overlay));
        overlays.len() - 1
    })
}

/// Create an overlay for a `width` x `height` canvas at the given device
/// pixel ratio. Returns a handle for later calls.
#[wasm_bindgen]
pub fn create_overlay(width: i32, height: i32, density: f64) -> Result<usize, JsError> {
    let overlay = ScanOverlay::new(OverlayConfig::with_density(density), ManualScheduler::new())
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(register(overlay.with_size(width, height)))
}

/// Create an overlay from a JSON config (missing fields use defaults).
#[wasm_bindgen]
pub fn create_overlay_with_config(
    width: i32,
    height: i32,
    config_json: &str,
) -> Result<usize, JsError> {
    let config = OverlayConfig::from_json(config_json.as_bytes())
        .map_err(|e| JsError::new(&e.to_string()))?;
    let overlay = ScanOverlay::new(config, ManualScheduler::new())
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(register(overlay.with_size(width, height)))
}

#[wasm_bindgen]
pub fn destroy_overlay(handle: usize) -> Result<(), JsError> {
    OVERLAYS.with(|overlays| {
        let mut overlays = overlays.borrow_mut();
        let slot = overlays
            .get_mut(handle)
            .filter(|slot| slot.is_some())
            .ok_or_else(|| JsError::new("invalid overlay handle"))?;
        *slot = None;
        Ok(())
    })
}

#[wasm_bindgen]
pub fn resize(handle: usize, width: i32, height: i32) -> Result<(), JsError> {
    with_overlay(handle, |o| {
        o.resize(width, height);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn start_animation(handle: usize) -> Result<(), JsError> {
    with_overlay(handle, |o| {
        o.start();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn stop_animation(handle: usize) -> Result<(), JsError> {
    with_overlay(handle, |o| {
        o.stop();
        Ok(())
    })
}

/// Advance the overlay's clock by `elapsed_ms` and deliver due ticks.
/// Returns whether the canvas should be redrawn.
#[wasm_bindgen]
pub fn advance_clock(handle: usize, elapsed_ms: f64) -> Result<bool, JsError> {
    if !elapsed_ms.is_finite() {
        return Err(JsError::new("elapsed_ms must be finite"));
    }
    with_overlay(handle, |o| {
        let elapsed = Duration::from_secs_f64(elapsed_ms.max(0.0) / 1000.0);
        for tick in o.scheduler_mut().advance(elapsed) {
            o.tick(tick);
        }
        Ok(o.needs_redraw())
    })
}

/// Render the current frame, returning render commands as JSON.
#[wasm_bindgen]
pub fn render(handle: usize) -> Result<String, JsError> {
    with_overlay(handle, |o| to_json(&o.draw()))
}

/// Current scan region as JSON `{x, y, w, h}` in canvas pixels.
#[wasm_bindgen]
pub fn scan_rect(handle: usize) -> Result<String, JsError> {
    with_overlay(handle, |o| to_json(&o.scan_rect()))
}

#[wasm_bindgen]
pub fn view_size(handle: usize) -> Result<String, JsError> {
    with_overlay(handle, |o| to_json(&o.view_size()))
}
