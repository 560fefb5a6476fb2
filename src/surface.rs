use crate::{error::SigError, stroke::Point};

pub const DEFAULT_PEN_COLOR: &str = "#000";
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

/// Pen used for every stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct PenStyle {
    /// CSS color, e.g. "#000" or "#1a1aff"
    pub color:      String,
    /// Line width in CSS pixels
    pub line_width: f64
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            color:      DEFAULT_PEN_COLOR.into(),
            line_width: DEFAULT_LINE_WIDTH
        }
    }
}

/// Logical (CSS) size of a surface plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width:       f64,
    pub height:      f64,
    pub pixel_ratio: f64
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio
        }
    }

    /// Backing bitmap size in device pixels.
    pub fn backing(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).ceil() as u32,
            (self.height * self.pixel_ratio).ceil() as u32
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Something strokes can be drawn onto and exported from.
///
/// All coordinates handed to a surface are CSS pixels; implementations apply
/// the pixel ratio themselves.
pub trait Surface {
    fn size(&self) -> SurfaceSize;

    /// Reallocate the backing bitmap. Clears the surface.
    fn resize(&mut self, size: SurfaceSize) -> Result<(), SigError>;

    fn clear(&mut self);

    /// Draw a connected polyline with round caps and joins. Fewer than two
    /// points draws nothing.
    fn stroke_polyline(&mut self, points: &[Point], pen: &PenStyle);

    /// Current contents as a `data:image/png;base64,` URL.
    fn to_png_data_url(&self) -> Result<String, SigError>;
}
