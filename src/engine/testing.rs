//! Test double for [`RasterSurface`]: records every draw call instead of
//! rasterizing, with the same text metrics as the terminal backend.
//!
//! Also used by the criterion benches, so this module is compiled
//! unconditionally.

use super::surface::{RasterSurface, Rgba};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgba,
    },
    Line {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: Rgba,
    },
    Dot {
        x: f32,
        y: f32,
        radius: f32,
        color: Rgba,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Rgba,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rect_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillRect { .. }))
            .count()
    }

    pub fn dot_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Dot { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }
}

impl RasterSurface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.ops.push(DrawOp::FillRect { x, y, w, h, color });
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
        self.ops.push(DrawOp::Line {
            x0,
            y0,
            x1,
            y1,
            color,
        });
    }

    fn fill_dot(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.ops.push(DrawOp::Dot {
            x,
            y,
            radius,
            color,
        });
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        // Same metric as the terminal surface: one cell per char, glyphs half
        // as wide as they are tall.
        text.chars().count() as f32 * size * 0.5
    }

    fn draw_text(
        &mut self,
        text: &str,
        center_x: f32,
        center_y: f32,
        _max_width: f32,
        size: f32,
        color: Rgba,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x: center_x,
            y: center_y,
            size,
            color,
        });
    }
}
