//! Integration test: drive a scan overlay through its redraw loop on a
//! virtual clock, the way a host event loop would.

use std::time::Duration;

use scan_frame_core::{Direction, ManualScheduler, OverlayConfig, ScanOverlay, SweepState};
use scan_frame_protocol::{RenderCommand, Size};

const MS: Duration = Duration::from_millis(1);

/// Advance the clock one millisecond at a time for `ms` milliseconds,
/// delivering due ticks and redrawing whenever a redraw was requested.
/// Returns the sweep line's y for every frame drawn.
fn run(overlay: &mut ScanOverlay<ManualScheduler>, ms: u32) -> Vec<f64> {
    let mut line_ys = Vec::new();
    for _ in 0..ms {
        for handle in overlay.scheduler_mut().advance(MS) {
            overlay.tick(handle);
        }
        if overlay.needs_redraw() {
            for cmd in overlay.draw() {
                if let RenderCommand::DrawLine { from, .. } = cmd {
                    line_ys.push(from.y);
                }
            }
        }
    }
    line_ys
}

fn overlay_with_travel(travel_px: i32) -> ScanOverlay<ManualScheduler> {
    // Frame height is 40% of the surface height.
    let height = travel_px * 5 / 2;
    ScanOverlay::new(OverlayConfig::default(), ManualScheduler::new())
        .unwrap()
        .with_size(100, height)
}

#[test]
fn line_bounces_inside_the_frame() {
    let mut overlay = overlay_with_travel(20);
    let top = overlay.scan_rect().top();

    // Initial draw plus one frame every 7ms.
    let ys = run(&mut overlay, 1 + 7 * 12);
    let offsets: Vec<i32> = ys.iter().map(|y| (y - top).round() as i32).collect();
    assert_eq!(
        offsets,
        vec![0, 5, 10, 15, 20, 20, 15, 10, 5, 0, 0, 5, 10]
    );
}

#[test]
fn never_more_than_one_pending_tick() {
    let mut overlay = overlay_with_travel(240);
    for _ in 0..200 {
        run(&mut overlay, 3);
        overlay.start();
        assert!(overlay.scheduler().pending_count() <= 1);
        let state = overlay.sweep_state();
        assert!((0..=240).contains(&state.offset));
    }
}

#[test]
fn stop_then_start_resumes_from_top() {
    let mut overlay = overlay_with_travel(240);
    run(&mut overlay, 1 + 7 * 10);
    assert_eq!(
        overlay.sweep_state(),
        SweepState {
            offset: 50,
            direction: Direction::Down
        }
    );

    overlay.stop();
    assert_eq!(overlay.scheduler().pending_count(), 0);
    assert!(run(&mut overlay, 100).is_empty(), "no line while stopped");
    assert_eq!(overlay.sweep_state(), SweepState::INITIAL);

    overlay.start();
    let top = overlay.scan_rect().top();
    let ys = run(&mut overlay, 1 + 7 * 3);
    let offsets: Vec<i32> = ys.iter().map(|y| (y - top).round() as i32).collect();
    assert_eq!(offsets, vec![0, 5, 10, 15]);
}

#[test]
fn tick_fired_after_stop_cannot_revive_animation() {
    let mut overlay = overlay_with_travel(240);
    run(&mut overlay, 1);
    let pending = overlay.pending_tick();
    assert!(pending.is_some());

    // The host collected the due tick but stop() runs before delivery.
    let due = overlay.scheduler_mut().advance(7 * MS);
    overlay.stop();
    for handle in due {
        assert!(!overlay.tick(handle));
    }
    assert!(!overlay.is_running());
    assert_eq!(overlay.sweep_state(), SweepState::INITIAL);
    run(&mut overlay, 50);
    assert!(overlay.pending_tick().is_none());
}

#[test]
fn resize_mid_sweep_narrows_range() {
    let mut overlay = overlay_with_travel(240);
    run(&mut overlay, 1 + 7 * 20);
    assert_eq!(overlay.sweep_state().offset, 100);

    overlay.resize(100, 100);
    assert_eq!(overlay.view_size(), Size::new(100, 100));
    run(&mut overlay, 7 * 20);
    let state = overlay.sweep_state();
    assert!((0..=40).contains(&state.offset), "offset={}", state.offset);
}

#[test]
fn resize_while_rising_keeps_line_inside_frame() {
    // 250px tall surface → 100px of travel. 21 ticks reach {100, Up}.
    let mut overlay = overlay_with_travel(100);
    run(&mut overlay, 1 + 7 * 21);
    assert_eq!(
        overlay.sweep_state(),
        SweepState {
            offset: 100,
            direction: Direction::Up
        }
    );

    overlay.resize(100, 100);
    let frame = overlay.scan_rect();
    for y in run(&mut overlay, 7 * 10) {
        assert!(y >= frame.top() && y <= frame.bottom(), "y={y} frame={frame:?}");
    }
    let state = overlay.sweep_state();
    assert!((0..=40).contains(&state.offset), "offset={}", state.offset);
}
