/// ASCII point-cloud rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use pathviz_core::{Camera, Path, ScreenPoint};
use std::io::Write;

/// Glyphs from far to near
const DEPTH_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Particle colours, cycled along grid diagonals
pub const PALETTE: [Color; 8] = [
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Rgb { r: 0xff, g: 0x80, b: 0x00 },
    Color::Rgb { r: 0x80, g: 0x00, b: 0xff },
];

const PATH_COLOR: Color = Color::Rgb { r: 0xcc, g: 0x00, b: 0x6f };
const ENDPOINT_COLOR: Color = Color::Red;
const PATH_SAMPLES: usize = 96;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    color: Color::Reset,
};

/// Depth-buffered character canvas for projected points
pub struct PointRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
    projected: Vec<(ScreenPoint, Color)>,
}

impl PointRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
            projected: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width over height in display units; terminal cells are about twice as tall as wide
    pub fn aspect(&self) -> f32 {
        self.width as f32 / (2.0 * self.height.max(1) as f32)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    /// Draw the path spine with its two endpoint markers
    pub fn render_path(&mut self, path: &Path, mvp: &Matrix4<f32>) {
        for i in 0..=PATH_SAMPLES {
            let t = i as f32 / PATH_SAMPLES as f32;
            if let Some(p) = Camera::project(mvp, &path.lerp(t), self.width, self.height) {
                self.plot(&p, Cell {
                    glyph: '.',
                    color: PATH_COLOR,
                });
            }
        }
        for end in [path.start(), path.end()] {
            if let Some(p) = Camera::project(mvp, end, self.width, self.height) {
                self.plot_marker(&p, Cell {
                    glyph: 'O',
                    color: ENDPOINT_COLOR,
                });
            }
        }
    }

    /// Like `plot`, but also replaces spine samples at the same depth or nearer
    fn plot_marker(&mut self, point: &ScreenPoint, cell: Cell) {
        if let Some(idx) = self.index(point) {
            if self.cells[idx].color == PATH_COLOR {
                self.depth_buffer[idx] = f32::INFINITY;
            }
        }
        self.plot(point, cell);
    }

    /// Draw particles, shading each by its depth within this batch
    pub fn render_points<F>(&mut self, points: &[Point3<f32>], mvp: &Matrix4<f32>, color_of: F)
    where
        F: Fn(usize) -> Color,
    {
        let mut projected = std::mem::take(&mut self.projected);
        projected.clear();
        projected.extend(points.iter().enumerate().filter_map(|(i, point)| {
            Camera::project(mvp, point, self.width, self.height).map(|p| (p, color_of(i)))
        }));

        let (nearest, farthest) = projected
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), (p, _)| {
                (lo.min(p.depth), hi.max(p.depth))
            });
        let span = (farthest - nearest).max(f32::EPSILON);

        for (point, color) in &projected {
            let closeness = 1.0 - (point.depth - nearest) / span;
            self.plot(point, Cell {
                glyph: depth_glyph(closeness),
                color: *color,
            });
        }
        self.projected = projected;
    }

    fn index(&self, point: &ScreenPoint) -> Option<usize> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    fn plot(&mut self, point: &ScreenPoint, cell: Cell) {
        let Some(idx) = self.index(point) else {
            return;
        };
        if point.depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = point.depth;
            self.cells[idx] = cell;
        }
    }

    /// Glyph drawn at a cell
    pub fn glyph_at(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x].glyph
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = Color::Reset;
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                if cell.glyph != ' ' && cell.color != current {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = cell.color;
                }
                writer.queue(Print(cell.glyph))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// `closeness` 0 is the farthest point in the batch, 1 the nearest
fn depth_glyph(closeness: f32) -> char {
    let index = (closeness.clamp(0.0, 1.0) * (DEPTH_RAMP.len() - 1) as f32).round() as usize;
    DEPTH_RAMP[index.min(DEPTH_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centred_mvp(renderer: &PointRenderer) -> Matrix4<f32> {
        Camera::new(renderer.aspect()).mvp(&Matrix4::identity())
    }

    #[test]
    fn test_point_at_target_lands_in_centre() {
        let mut renderer = PointRenderer::new(81, 41);
        let mvp = centred_mvp(&renderer);
        renderer.render_points(&[Point3::origin()], &mvp, |_| Color::Green);
        assert_eq!(renderer.glyph_at(40, 20), '@');
    }

    #[test]
    fn test_nearer_point_wins_the_cell() {
        let mut renderer = PointRenderer::new(81, 41);
        let mvp = centred_mvp(&renderer);
        let points = [Point3::new(0.0, 0.0, -3.0), Point3::new(0.0, 0.0, 1.0)];
        renderer.render_points(&points, &mvp, |i| PALETTE[i]);
        assert_eq!(renderer.glyph_at(40, 20), '@');
        assert_eq!(renderer.cells[20 * 81 + 40].color, PALETTE[1]);
    }

    #[test]
    fn test_path_endpoints_marked() {
        let mut renderer = PointRenderer::new(81, 41);
        let mvp = centred_mvp(&renderer);
        let path = Path::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)).unwrap();
        renderer.render_path(&path, &mvp);
        assert!(renderer.cells.iter().filter(|c| c.glyph == 'O').count() >= 2);
        assert!(renderer.cells.iter().any(|c| c.glyph == '.'));

        renderer.clear();
        assert!(renderer.cells.iter().all(|c| *c == EMPTY));
    }

    #[test]
    fn test_draw_emits_every_row() {
        let renderer = PointRenderer::new(4, 3);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), 3);
    }

    #[test]
    fn test_depth_glyph_ends() {
        assert_eq!(depth_glyph(0.0), '.');
        assert_eq!(depth_glyph(1.0), '@');
        assert_eq!(depth_glyph(7.0), '@');
    }
}
