use scan_frame_protocol::{Point, Rect, RenderCommand, ThemeToken};

/// Cell-resolution canvas. `None` is a transparent cell through which the
/// camera preview would show.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<ThemeToken>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<ThemeToken> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    fn set(&mut self, x: usize, y: usize, value: Option<ThemeToken>) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    /// Paint every cell whose center satisfies `hit`.
    fn paint_where(&mut self, value: Option<ThemeToken>, hit: impl Fn(Point) -> bool) {
        for y in 0..self.height {
            for x in 0..self.width {
                if hit(Point::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    self.set(x, y, value);
                }
            }
        }
    }
}

/// Rasterize a command list in order onto a fresh grid.
pub fn rasterize(commands: &[RenderCommand], width: usize, height: usize) -> Grid {
    let mut grid = Grid::new(width, height);
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, color } => {
                grid.paint_where(Some(*color), |p| rect.contains(p));
            }
            RenderCommand::EraseRect {
                rect,
                stroke_width: None,
            } => {
                grid.paint_where(None, |p| rect.contains(p));
            }
            RenderCommand::EraseRect {
                rect,
                stroke_width: Some(width),
            } => {
                grid.paint_where(None, |p| on_outline(rect, *width, p));
            }
            RenderCommand::StrokeRect { rect, color, width } => {
                grid.paint_where(Some(*color), |p| on_outline(rect, *width, p));
            }
            RenderCommand::DrawLine {
                from, to, color, ..
            } => {
                draw_line(&mut grid, *from, *to, *color);
            }
        }
    }
    grid
}

/// Whether `p` lies in the band of `width` centered on the rect's edges.
/// Bands narrower than a cell are widened to one cell.
fn on_outline(rect: &Rect, width: f64, p: Point) -> bool {
    let half = (width / 2.0).max(0.5);
    let outer = Rect::from_edges(
        rect.left() - half,
        rect.top() - half,
        rect.right() + half,
        rect.bottom() + half,
    );
    let inner = Rect::from_edges(
        rect.left() + half,
        rect.top() + half,
        rect.right() - half,
        rect.bottom() - half,
    );
    outer.contains(p) && !(!inner.is_empty() && strictly_inside(&inner, p))
}

fn strictly_inside(rect: &Rect, p: Point) -> bool {
    p.x > rect.left() && p.x < rect.right() && p.y > rect.top() && p.y < rect.bottom()
}

fn draw_line(grid: &mut Grid, from: Point, to: Point, color: ThemeToken) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = from.x + dx * t;
        let y = from.y + dy * t;
        if x < 0.0 || y < 0.0 {
            continue;
        }
        grid.set(x as usize, y as usize, Some(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_out_leaves_transparent_interior() {
        let cmds = vec![
            RenderCommand::DrawRect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                color: ThemeToken::Scrim,
            },
            RenderCommand::EraseRect {
                rect: Rect::new(2.0, 2.0, 6.0, 6.0),
                stroke_width: None,
            },
        ];
        let grid = rasterize(&cmds, 10, 10);
        assert_eq!(grid.get(0, 0), Some(ThemeToken::Scrim));
        assert_eq!(grid.get(5, 5), None);
        assert_eq!(grid.get(9, 9), Some(ThemeToken::Scrim));
    }

    #[test]
    fn stroke_covers_edges_only() {
        let cmds = vec![RenderCommand::StrokeRect {
            rect: Rect::new(2.0, 2.0, 6.0, 6.0),
            color: ThemeToken::FrameBorder,
            width: 1.0,
        }];
        let grid = rasterize(&cmds, 10, 10);
        assert_eq!(grid.get(2, 5), Some(ThemeToken::FrameBorder));
        assert_eq!(grid.get(5, 2), Some(ThemeToken::FrameBorder));
        assert_eq!(grid.get(5, 5), None);
        assert_eq!(grid.get(0, 0), None);
    }

    #[test]
    fn horizontal_line_spans_endpoints() {
        let cmds = vec![RenderCommand::DrawLine {
            from: Point::new(2.5, 4.5),
            to: Point::new(7.5, 4.5),
            color: ThemeToken::SweepLine,
            width: 1.0,
        }];
        let grid = rasterize(&cmds, 10, 10);
        for x in 2..=7 {
            assert_eq!(grid.get(x, 4), Some(ThemeToken::SweepLine), "x={x}");
        }
        assert_eq!(grid.get(1, 4), None);
        assert_eq!(grid.get(8, 4), None);
    }

    #[test]
    fn off_grid_commands_are_clipped() {
        let cmds = vec![RenderCommand::DrawLine {
            from: Point::new(-5.0, 1.0),
            to: Point::new(50.0, 1.0),
            color: ThemeToken::SweepLine,
            width: 1.0,
        }];
        let grid = rasterize(&cmds, 4, 4);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.get(0, 1), Some(ThemeToken::SweepLine));
        assert_eq!(grid.get(3, 1), Some(ThemeToken::SweepLine));
    }
}
