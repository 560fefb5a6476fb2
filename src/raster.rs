// src/raster.rs

use tiny_skia::{Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::{
    data_url,
    error::SigError,
    stroke::Point,
    surface::{PenStyle, Surface, SurfaceSize}
};

/// Off-DOM surface backed by a `tiny_skia::Pixmap`.
///
/// Renders exactly what the browser canvas would (transparent background,
/// round caps/joins, pixel-ratio scaling) so the pad can be driven and
/// exported without a browser.
pub struct RasterSurface {
    pixmap: Pixmap,
    size:   SurfaceSize
}

impl RasterSurface {
    pub fn new(size: SurfaceSize) -> Result<Self, SigError> {
        Ok(Self {
            pixmap: alloc_pixmap(size)?,
            size
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// True when no pixel has been painted.
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Raw PNG bytes of the current contents.
    pub fn encode_png(&self) -> Result<Vec<u8>, SigError> {
        self.pixmap
            .encode_png()
            .map_err(|e| SigError::Encode(e.to_string()))
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), SigError> {
        self.pixmap = alloc_pixmap(size)?;
        self.size = size;
        Ok(())
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn stroke_polyline(&mut self, points: &[Point], pen: &PenStyle) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        // Zero-length paths (all points equal) have no bounds.
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(pen_color(&pen.color));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: pen.line_width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        let ratio = self.size.pixel_ratio as f32;
        self.pixmap.stroke_path(
            &path,
            &paint,
            &stroke,
            Transform::from_scale(ratio, ratio),
            None
        );
    }

    fn to_png_data_url(&self) -> Result<String, SigError> {
        Ok(data_url::encode_png(&self.encode_png()?))
    }
}

fn alloc_pixmap(size: SurfaceSize) -> Result<Pixmap, SigError> {
    let (width, height) = size.backing();
    Pixmap::new(width, height).ok_or(SigError::InvalidSize { width, height })
}

/// Resolve a CSS color string the way the browser canvas would. Unparseable
/// colors paint black, like an invalid `strokeStyle` keeps the default.
fn pen_color(css: &str) -> Color {
    match csscolorparser::parse(css) {
        Ok(parsed) => {
            let [r, g, b, a] = parsed.to_rgba8();
            Color::from_rgba8(r, g, b, a)
        }
        Err(e) => {
            log::warn!("unparseable pen color {css:?}, using black: {e}");
            Color::BLACK
        }
    }
}
