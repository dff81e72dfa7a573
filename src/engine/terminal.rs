//! Terminal raster backend.
//!
//! One terminal cell is two vertically stacked pixels, drawn with the upper
//! half block: the foreground carries the top pixel and the background the
//! bottom one. Shapes are alpha-composited into an RGB pixel grid; text is
//! kept in a cell-granular overlay and stamped over the blocks at render
//! time, since glyphs cannot be subdivided.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::surface::{RasterSurface, Rgba};

const HALF_BLOCK: &str = "\u{2580}";

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pixel {
    r: u8,
    g: u8,
    b: u8,
}

impl Pixel {
    fn from_rgba(c: Rgba) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }

    /// Source-over composite of a straight-alpha color onto this pixel.
    fn blend(&mut self, c: Rgba) {
        let a = c.a.clamp(0.0, 1.0);
        let mix = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
        self.r = mix(c.r, self.r);
        self.g = mix(c.g, self.g);
        self.b = mix(c.b, self.b);
    }

    fn color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TextCell {
    ch: char,
    color: Rgba,
}

/// Pixel raster over a cols x rows cell area, `cols` pixels wide and
/// `2 * rows` pixels tall.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    background: Pixel,
    pixels: Vec<Pixel>,
    overlay: Vec<Option<TextCell>>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, background: Rgba) -> Self {
        let background = Pixel::from_rgba(background);
        Self {
            cols,
            rows,
            background,
            pixels: vec![background; cols as usize * rows as usize * 2],
            overlay: vec![None; cols as usize * rows as usize],
        }
    }

    /// Match a new terminal size; contents are discarded.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if cols != self.cols || rows != self.rows {
            *self = Self::new(cols, rows, Rgba::rgba(
                self.background.r,
                self.background.g,
                self.background.b,
                1.0,
            ));
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.cols as i32 || y >= self.rows as i32 * 2 {
            return;
        }
        let index = y as usize * self.cols as usize + x as usize;
        self.pixels[index].blend(color);
    }

    fn put_cell(&mut self, col: i32, row: i32, cell: TextCell) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.overlay[row as usize * self.cols as usize + col as usize] = Some(cell);
    }
}

impl RasterSurface for TerminalSurface {
    fn width(&self) -> f32 {
        self.cols as f32
    }

    fn height(&self) -> f32 {
        self.rows as f32 * 2.0
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background);
        self.overlay.fill(None);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let x0 = x.round() as i32;
        let y0 = y.round() as i32;
        let x1 = (x + w).round() as i32;
        let y1 = (y + h).round() as i32;
        for py in y0..y1.max(y0 + 1) {
            for px in x0..x1.max(x0 + 1) {
                self.blend_pixel(px, py, color);
            }
        }
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.blend_pixel(x.round() as i32, y.round() as i32, color);
        }
    }

    fn fill_dot(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        if radius <= 0.5 {
            self.blend_pixel(x.round() as i32, y.round() as i32, color);
            return;
        }
        let r2 = radius * radius;
        let x0 = (x - radius).floor() as i32;
        let x1 = (x + radius).ceil() as i32;
        let y0 = (y - radius).floor() as i32;
        let y1 = (y + radius).ceil() as i32;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 - x;
                let dy = py as f32 - y;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.width() as f32 * size * 0.5
    }

    fn draw_text(
        &mut self,
        text: &str,
        center_x: f32,
        center_y: f32,
        max_width: f32,
        size: f32,
        color: Rgba,
    ) {
        // Glyphs land on whole cells whatever the fitted size asked for; the
        // size only matters for centering and clipping math.
        let width = self.measure_text(text, size).min(max_width);
        let mut col = (center_x - width / 2.0).round() as i32;
        let right = (center_x + width / 2.0).round() as i32;
        let row = (center_y / 2.0).floor() as i32;

        for ch in text.chars() {
            let cells = ch.width().unwrap_or(0) as i32;
            if cells == 0 {
                continue;
            }
            if col + cells > right + 1 {
                break;
            }
            self.put_cell(col, row, TextCell { ch, color });
            col += cells;
        }
    }
}

impl Widget for &TerminalSurface {
    /// Stamp the raster into the buffer, one upper half block per cell, then
    /// overlay the text cells.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.cols.min(area.width);
        let rows = self.rows.min(area.height);
        for row in 0..rows {
            for col in 0..cols {
                let top = self.pixels[row as usize * 2 * self.cols as usize + col as usize];
                let bottom =
                    self.pixels[(row as usize * 2 + 1) * self.cols as usize + col as usize];
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    match self.overlay[row as usize * self.cols as usize + col as usize] {
                        Some(text) => {
                            cell.set_char(text.ch).set_style(
                                Style::default()
                                    .fg(Color::Rgb(text.color.r, text.color.g, text.color.b))
                                    .bg(bottom.color()),
                            );
                        }
                        None => {
                            cell.set_symbol(HALF_BLOCK)
                                .set_style(Style::default().fg(top.color()).bg(bottom.color()));
                        }
                    }
                }
            }
        }
    }
}
