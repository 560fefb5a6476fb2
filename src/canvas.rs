// src/canvas.rs

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::{
    error::SigError,
    stroke::Point,
    surface::{PenStyle, Surface, SurfaceSize}
};

/// `<canvas>` backed surface.
///
/// The backing bitmap is `css size × devicePixelRatio`; the context carries
/// a matching scale transform so callers keep drawing in CSS pixels.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx:    CanvasRenderingContext2d,
    size:   SurfaceSize
}

impl CanvasSurface {
    /// Create a surface from an existing <canvas> element.
    pub fn new(canvas: HtmlCanvasElement, size: SurfaceSize) -> Result<Self, SigError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| SigError::NoContext2d)?
            .ok_or(SigError::NoContext2d)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SigError::NoContext2d)?;

        let mut surface = Self { canvas, ctx, size };
        surface.resize(size)?;
        Ok(surface)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), SigError> {
        let (width, height) = size.backing();
        if width == 0 || height == 0 {
            return Err(SigError::InvalidSize { width, height });
        }
        // Assigning width/height resets the whole context state.
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let ratio = size.pixel_ratio;
        self.ctx
            .set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0)
            .map_err(|_| SigError::OpFailed("setTransform".into()))?;
        self.ctx.set_line_join("round");
        self.ctx.set_line_cap("round");
        self.size = size;
        Ok(())
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn stroke_polyline(&mut self, points: &[Point], pen: &PenStyle) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        self.ctx.set_stroke_style_str(&pen.color);
        self.ctx.set_line_width(pen.line_width);
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        self.ctx.stroke();
    }

    fn to_png_data_url(&self) -> Result<String, SigError> {
        self.canvas
            .to_data_url()
            .map_err(|_| SigError::OpFailed("to_data_url".into()))
    }
}
