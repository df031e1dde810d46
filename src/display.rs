use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Display is the read-only consumer of the framebuffer: the driver
/// hands it the 64x32 pixel grid once per frame, after the instruction
/// batch and the timer tick. It should abstract the implementation
/// details, so a variety of kinds of screen would work.
pub trait Display {
    /// render one frame; `pixels` is row-major, one byte per pixel,
    /// 0 dark and 1 lit
    fn draw(&mut self, pixels: &[u8]) -> Result<(), io::Error>;

    /// how many pixels a frame must carry
    fn pixel_count(&self) -> usize;
}

// width and height of the pixel grid
struct Resolution(usize, usize);

impl Resolution {
    fn pixel_count(&self) -> usize {
        self.0 * self.1
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// the (x, y) canvas coordinates of every pixel whose value is
    /// `wanted`; y is negated because the canvas origin is bottom-left
    fn points<'a>(
        &self,
        pixels: &'a [u8],
        wanted: u8,
    ) -> impl std::iter::Iterator<Item = (f64, f64)> + 'a {
        let w = self.0;
        pixels
            .iter()
            .enumerate()
            .filter(move |(_, px)| **px == wanted)
            .map(move |(count, _)| ((count % w) as f64, -1.0 * (count / w) as f64))
    }
}

/// monochrome display in a terminal, rendered using TUI over crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new(width: usize, height: usize) -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(width, height),
        })
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, pixels: &[u8]) -> Result<(), io::Error> {
        // make sure we're given exactly the right amount of data to draw
        assert_eq!(
            pixels.len(),
            self.resolution.pixel_count(),
            "MonoTermDisplay must have correct-sized data to draw"
        );

        // 1:1 ratio between terminal cells, machine pixels and the
        // internal TUI canvas
        self.terminal.draw(|f| {
            let size = Rect::new(
                0,
                0,
                2 + self.resolution.0 as u16,
                2 + self.resolution.1 as u16,
            );

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("COSMAC8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(self.resolution.x_bounds())
                .y_bounds(self.resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    // dark points first so a stale cell can't stay lit
                    ctx.draw(&Points {
                        coords: &self.resolution.points(pixels, 0).collect::<Vec<_>>(),
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &self.resolution.points(pixels, 1).collect::<Vec<_>>(),
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }

    fn pixel_count(&self) -> usize {
        self.resolution.pixel_count()
    }
}

/// useful for testing non-display routines
pub struct DummyDisplay {
    resolution: Resolution,
    pub frames_drawn: usize,
}

impl DummyDisplay {
    pub fn new(width: usize, height: usize) -> Self {
        DummyDisplay {
            resolution: Resolution(width, height),
            frames_drawn: 0,
        }
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, pixels: &[u8]) -> Result<(), io::Error> {
        assert_eq!(pixels.len(), self.resolution.pixel_count());
        self.frames_drawn += 1;
        Ok(())
    }

    fn pixel_count(&self) -> usize {
        self.resolution.pixel_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count() {
        let r = Resolution(64, 32);
        assert_eq!(r.pixel_count(), 2048)
    }

    #[test]
    fn test_x_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.x_bounds(), [0.0, 63.0]);
    }

    #[test]
    fn test_y_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.y_bounds(), [-31.0, 0.0]);
    }

    #[test]
    fn test_point_iterator_empty_frame() {
        let r = Resolution(64, 32);
        let pixels = [0u8; 2048];
        assert_eq!(r.points(&pixels, 1).count(), 0);
        assert_eq!(r.points(&pixels, 0).count(), 2048);
    }

    #[test]
    fn test_point_iterator_coordinates() {
        let r = Resolution(64, 32);
        let mut pixels = [0u8; 2048];
        pixels[0] = 1; // top-left
        pixels[1 * 64 + 5] = 1; // (5, 1)
        let lit: Vec<_> = r.points(&pixels, 1).collect();
        assert_eq!(lit, vec![(0.0, 0.0), (5.0, -1.0)]);
    }

    #[test]
    fn test_dummy_display_counts_frames() {
        let mut d = DummyDisplay::new(64, 32);
        d.draw(&[0; 2048]).unwrap();
        d.draw(&[0; 2048]).unwrap();
        assert_eq!(d.frames_drawn, 2);
        assert_eq!(d.pixel_count(), 2048);
    }

    #[test]
    #[should_panic]
    fn test_dummy_draw_rejects_wrong_size() {
        let mut d = DummyDisplay::new(64, 32);
        let _ = d.draw(&[0; 100]);
    }
}
