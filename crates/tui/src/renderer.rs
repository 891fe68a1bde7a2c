use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};
use scan_frame_core::{DeadlineScheduler, OverlayConfig, ScanOverlay};
use scan_frame_protocol::ThemeToken;
use tracing::info;

use crate::raster;

/// Upper bound on how long to wait for input when no tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn theme_to_cell(token: Option<ThemeToken>) -> (char, Color) {
    match token {
        None | Some(ThemeToken::Background) => (' ', Color::Reset),
        Some(ThemeToken::Scrim) => ('░', Color::DarkGray),
        Some(ThemeToken::FrameBorder) => ('█', Color::Blue),
        Some(ThemeToken::SweepLine) => ('━', Color::Red),
    }
}

pub fn run_tui(config: OverlayConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: OverlayConfig,
) -> Result<()> {
    let mut overlay = ScanOverlay::new(config, DeadlineScheduler::new())?;
    info!("scan-frame demo started");

    loop {
        // Row 0 is the header; the overlay owns the rest of the screen.
        let term_size = terminal.size()?;
        let width = i32::from(term_size.width);
        let height = i32::from(term_size.height.saturating_sub(1));
        if overlay.view_size().width != width || overlay.view_size().height != height {
            overlay.resize(width, height);
        }

        for handle in overlay.scheduler_mut().due(Instant::now()) {
            overlay.tick(handle);
        }

        if overlay.needs_redraw() {
            let cmds = overlay.draw();
            let size = overlay.view_size();
            let grid = raster::rasterize(&cmds, size.width as usize, size.height as usize);
            let scan = overlay.scan_rect();
            let running = overlay.is_running();

            terminal.draw(|frame| {
                let area = frame.area();

                let header_area = Rect::new(0, 0, area.width, 1);
                let header = Block::default()
                    .title(format!(
                        " scan-frame | scan rect ({:.0},{:.0})-({:.0},{:.0}) | {} | s start/stop | q quit ",
                        scan.left(),
                        scan.top(),
                        scan.right(),
                        scan.bottom(),
                        if running { "scanning" } else { "stopped" },
                    ))
                    .style(Style::default().fg(Color::White).bg(Color::DarkGray));
                frame.render_widget(header, header_area);

                let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
                let buf = frame.buffer_mut();
                for row in 0..grid.height().min(usize::from(content_area.height)) {
                    for col in 0..grid.width().min(usize::from(content_area.width)) {
                        let (ch, fg) = theme_to_cell(grid.get(col, row));
                        let x = content_area.x + col as u16;
                        let y = content_area.y + row as u16;
                        buf[(x, y)].set_char(ch).set_fg(fg).set_bg(Color::Reset);
                    }
                }
            })?;
        }

        let timeout = overlay
            .scheduler()
            .time_until_next(Instant::now())
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('s') => {
                        if overlay.is_running() {
                            overlay.stop();
                        } else {
                            overlay.start();
                        }
                    }
                    _ => {}
                },
                Event::Resize(width, height) => {
                    overlay.resize(i32::from(width), i32::from(height.saturating_sub(1)));
                }
                _ => {}
            }
        }
    }

    info!("scan-frame demo exiting");
    Ok(())
}
