//! Drawing-surface contract the engine renders through.
//!
//! All coordinates are f32 pixels with the origin at the top-left. A concrete
//! surface decides what a pixel is; the terminal backend maps one cell to two
//! vertical pixels. Text is measured by the surface so the font fitter stays
//! deterministic against whatever metrics the surface reports.

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 = transparent, 1.0 = opaque.
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// HSL color, hue in degrees, saturation/lightness in 0..=1.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        Self::rgb(
            ((r1 + m) * 255.0).round() as u8,
            ((g1 + m) * 255.0).round() as u8,
            ((b1 + m) * 255.0).round() as u8,
        )
    }
}

/// A 2D raster the engine draws one frame onto.
///
/// Implementations blend by alpha on write and report their current pixel
/// dimensions every frame; the engine recomputes layout from those, so a
/// resize between frames simply takes effect on the next one.
pub trait RasterSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Reset every pixel to the surface background.
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);

    /// One-pixel-wide line segment.
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba);

    /// Filled dot; a radius under one pixel plots a single pixel.
    fn fill_dot(&mut self, x: f32, y: f32, radius: f32, color: Rgba);

    /// Width in pixels `text` occupies at `size`. Deterministic for a given
    /// surface.
    fn measure_text(&self, text: &str, size: f32) -> f32;

    /// Draw `text` centered on (`center_x`, `center_y`), clipped to
    /// `max_width` pixels.
    fn draw_text(
        &mut self,
        text: &str,
        center_x: f32,
        center_y: f32,
        max_width: f32,
        size: f32,
        color: Rgba,
    );
}
