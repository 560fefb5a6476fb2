// src/signature_core.rs

use crate::{
    data_url,
    error::SigError,
    stroke::{Point, StrokeStore},
    surface::{PenStyle, Surface, SurfaceSize}
};

/// Receives the PNG data URL whenever committed content changes, or `None`
/// once the pad is empty again.
pub type ChangeCallback = Box<dyn FnMut(Option<String>)>;

/// Encapsulates drawing logic and export of signature.
///
/// Input is fed through `pointer_*`; every mutation ends with a full
/// [`SignaturePad::render`]. The change callback fires after release, undo
/// and clear.
pub struct SignaturePad<S: Surface> {
    surface:   S,
    strokes:   StrokeStore,
    pen:       PenStyle,
    on_change: Option<ChangeCallback>
}

impl<S: Surface> SignaturePad<S> {
    pub fn new(surface: S, pen: PenStyle) -> Self {
        let mut pad = Self {
            surface,
            strokes: StrokeStore::new(),
            pen,
            on_change: None
        };
        pad.render();
        pad
    }

    /// Register the change callback.
    pub fn with_on_change(mut self, on_change: ChangeCallback) -> Self {
        self.on_change = Some(on_change);
        self
    }

    pub fn set_on_change(&mut self, on_change: Option<ChangeCallback>) {
        self.on_change = on_change;
    }

    /// Handle pointer down: start drawing.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.strokes.begin(Point::new(x, y));
        self.render();
    }

    /// Handle pointer move: extend the stroke if drawing.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if self.strokes.extend(Point::new(x, y)) {
            self.render();
        }
    }

    /// Handle pointer up: finish the stroke and report.
    pub fn pointer_up(&mut self) {
        if !self.strokes.is_drawing() {
            return;
        }
        self.strokes.release();
        self.render();
        self.notify();
    }

    /// Pointer left the surface while pressed; same as releasing.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Remove the most recent stroke.
    pub fn undo(&mut self) {
        self.strokes.undo();
        self.render();
        self.notify();
    }

    /// Clear the canvas.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.render();
        log::debug!("signature cleared");
        self.notify();
    }

    /// Follow a new container size. Stored points are scaled with the CSS
    /// size so the drawing keeps its place.
    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), SigError> {
        let old = self.surface.size();
        if old == size {
            return Ok(());
        }
        self.surface.resize(size)?;
        if !old.is_empty() && !size.is_empty() {
            self.strokes
                .rescale(size.width / old.width, size.height / old.height);
        }
        log::debug!(
            "surface resized to {}x{} @{}",
            size.width,
            size.height,
            size.pixel_ratio
        );
        self.render();
        Ok(())
    }

    /// Clear and redraw every stroke, committed first, then the active one.
    pub fn render(&mut self) {
        self.surface.clear();
        for stroke in self.strokes.strokes() {
            self.surface.stroke_polyline(stroke.points(), &self.pen);
        }
    }

    /// Is pad empty (nothing committed)?
    pub fn is_empty(&self) -> bool {
        !self.has_content()
    }

    pub fn has_content(&self) -> bool {
        self.strokes.has_content()
    }

    pub fn is_drawing(&self) -> bool {
        self.strokes.is_drawing()
    }

    pub fn strokes(&self) -> &StrokeStore {
        &self.strokes
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn pen(&self) -> &PenStyle {
        &self.pen
    }

    /// Export as PNG data URL (for <img src="...">).
    pub fn to_png_data_url(&self) -> Result<String, SigError> {
        if !self.has_content() {
            return Err(SigError::Empty);
        }
        self.surface.to_png_data_url()
    }

    /// Export raw PNG bytes (without data URL).
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, SigError> {
        data_url::decode_png(&self.to_png_data_url()?)
    }

    /// Current value as reported to the change callback.
    pub fn value(&self) -> Result<Option<String>, SigError> {
        if self.has_content() {
            self.surface.to_png_data_url().map(Some)
        } else {
            Ok(None)
        }
    }

    /// A failed export is reported as `None`, like an empty pad.
    fn notify(&mut self) {
        if self.on_change.is_none() {
            return;
        }
        let value = self.value().unwrap_or_else(|e| {
            log::warn!("signature export failed, reporting empty: {e}");
            None
        });
        if let Some(cb) = self.on_change.as_mut() {
            cb(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::raster::RasterSurface;

    type Log = Rc<RefCell<Vec<Option<String>>>>;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Polyline(Vec<Point>)
    }

    /// Surface that records draw calls instead of painting.
    struct RecordingSurface {
        ops:         Rc<RefCell<Vec<Op>>>,
        size:        SurfaceSize,
        fail_export: bool
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> SurfaceSize {
            self.size
        }

        fn resize(&mut self, size: SurfaceSize) -> Result<(), SigError> {
            self.size = size;
            Ok(())
        }

        fn clear(&mut self) {
            self.ops.borrow_mut().push(Op::Clear);
        }

        fn stroke_polyline(&mut self, points: &[Point], _pen: &PenStyle) {
            self.ops.borrow_mut().push(Op::Polyline(points.to_vec()));
        }

        fn to_png_data_url(&self) -> Result<String, SigError> {
            if self.fail_export {
                Err(SigError::Encode("no encoder".into()))
            } else {
                Ok(data_url::encode_png(b"png"))
            }
        }
    }

    fn recording_pad(
        fail_export: bool
    ) -> (SignaturePad<RecordingSurface>, Rc<RefCell<Vec<Op>>>, Log) {
        let ops: Rc<RefCell<Vec<Op>>> = Rc::default();
        let surface = RecordingSurface {
            ops: Rc::clone(&ops),
            size: SurfaceSize::new(100.0, 60.0, 1.0),
            fail_export
        };
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        let pad = SignaturePad::new(surface, PenStyle::default())
            .with_on_change(Box::new(move |v: Option<String>| sink.borrow_mut().push(v)));
        (pad, ops, log)
    }

    fn pad() -> (SignaturePad<RasterSurface>, Log) {
        let surface = RasterSurface::new(SurfaceSize::new(100.0, 60.0, 1.0)).unwrap();
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        let pad = SignaturePad::new(surface, PenStyle::default())
            .with_on_change(Box::new(move |v: Option<String>| sink.borrow_mut().push(v)));
        (pad, log)
    }

    fn draw(pad: &mut SignaturePad<RasterSurface>, points: &[(f64, f64)]) {
        let (x, y) = points[0];
        pad.pointer_down(x, y);
        for &(x, y) in &points[1..] {
            pad.pointer_move(x, y);
        }
        pad.pointer_up();
    }

    fn is_image(v: &Option<String>) -> bool {
        v.as_deref()
            .is_some_and(|s| s.len() > data_url::PNG_DATA_URL_PREFIX.len())
    }

    #[test_log::test]
    fn one_stroke_reports_an_image() {
        let (mut pad, log) = pad();
        draw(&mut pad, &[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)]);

        assert!(pad.has_content());
        assert_eq!(pad.strokes().len(), 1);
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert!(is_image(&log[0]));
        assert!(!pad.surface().is_blank());
    }

    #[test_log::test]
    fn tap_without_movement_reports_empty() {
        let (mut pad, log) = pad();
        draw(&mut pad, &[(5.0, 5.0)]);

        assert!(!pad.has_content());
        assert_eq!(pad.strokes().len(), 0);
        assert_eq!(*log.borrow(), vec![None::<String>]);
        assert!(pad.surface().is_blank());
    }

    #[test_log::test]
    fn undo_removes_the_latest_stroke() {
        let (mut pad, log) = pad();
        draw(&mut pad, &[(10.0, 10.0), (40.0, 10.0)]);
        let after_a = log.borrow().last().cloned().flatten();
        draw(&mut pad, &[(10.0, 40.0), (40.0, 40.0)]);

        pad.undo();
        assert_eq!(pad.strokes().len(), 1);
        assert_eq!(pad.strokes().committed()[0].points()[0], Point::new(10.0, 10.0));

        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert_eq!(log[2], after_a);
    }

    #[test_log::test]
    fn undo_after_clear_stays_empty() {
        let (mut pad, log) = pad();
        draw(&mut pad, &[(10.0, 10.0), (40.0, 10.0)]);
        pad.clear();
        pad.undo();

        assert_eq!(pad.strokes().len(), 0);
        assert!(pad.surface().is_blank());
        let log = log.borrow();
        assert_eq!(log[1..].to_vec(), vec![None::<String>, None]);
    }

    #[test_log::test]
    fn gestures_commit_one_stroke_each() {
        let (mut pad, log) = pad();
        for i in 0..5 {
            let y = 5.0 + f64::from(i) * 10.0;
            draw(&mut pad, &[(5.0, y), (50.0, y)]);
        }
        draw(&mut pad, &[(70.0, 30.0)]);

        assert_eq!(pad.strokes().len(), 5);
        assert_eq!(log.borrow().len(), 6);
        assert!(log.borrow().iter().all(is_image));
    }

    #[test_log::test]
    fn excess_undo_is_a_no_op() {
        let (mut pad, log) = pad();
        draw(&mut pad, &[(10.0, 10.0), (40.0, 10.0)]);
        pad.undo();
        pad.undo();
        pad.undo();

        assert_eq!(pad.strokes().len(), 0);
        assert_eq!(log.borrow()[1..].to_vec(), vec![None::<String>, None, None]);
    }

    #[test_log::test]
    fn active_stroke_is_rendered_but_not_reported() {
        let (mut pad, log) = pad();
        pad.pointer_down(10.0, 10.0);
        pad.pointer_move(50.0, 10.0);

        assert!(pad.is_drawing());
        assert!(!pad.has_content());
        assert!(!pad.surface().is_blank());
        assert!(log.borrow().is_empty());
    }

    #[test_log::test]
    fn move_and_release_while_idle_are_ignored() {
        let (mut pad, log) = pad();
        pad.pointer_move(10.0, 10.0);
        pad.pointer_leave();
        pad.pointer_up();

        assert!(log.borrow().is_empty());
        assert!(pad.surface().is_blank());
    }

    #[test_log::test]
    fn leave_commits_like_release() {
        let (mut pad, log) = pad();
        pad.pointer_down(10.0, 10.0);
        pad.pointer_move(30.0, 30.0);
        pad.pointer_leave();

        assert_eq!(pad.strokes().len(), 1);
        assert!(!pad.is_drawing());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test_log::test]
    fn export_requires_content() {
        let (mut pad, _) = pad();
        assert!(matches!(pad.to_png_data_url(), Err(SigError::Empty)));
        assert!(matches!(pad.to_png_bytes(), Err(SigError::Empty)));

        draw(&mut pad, &[(10.0, 10.0), (40.0, 10.0)]);
        let bytes = pad.to_png_bytes().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(pad.strokes().len(), 1);
    }

    #[test_log::test]
    fn resize_rescales_strokes_and_backing() {
        let (mut pad, _) = pad();
        draw(&mut pad, &[(10.0, 10.0), (50.0, 30.0)]);

        pad.resize(SurfaceSize::new(200.0, 30.0, 2.0)).unwrap();
        let pixmap = pad.surface().pixmap();
        assert_eq!((pixmap.width(), pixmap.height()), (400, 60));
        assert_eq!(
            pad.strokes().committed()[0].points(),
            &[Point::new(20.0, 5.0), Point::new(100.0, 15.0)]
        );
        assert!(!pad.surface().is_blank());
    }

    #[test_log::test]
    fn resize_to_zero_fails_without_touching_strokes() {
        let (mut pad, _) = pad();
        draw(&mut pad, &[(10.0, 10.0), (50.0, 30.0)]);

        assert!(pad.resize(SurfaceSize::new(0.0, 0.0, 1.0)).is_err());
        assert_eq!(pad.strokes().committed()[0].points()[0], Point::new(10.0, 10.0));
    }

    #[test_log::test]
    fn render_redraws_committed_then_active() {
        let (mut pad, ops, _) = recording_pad(false);
        pad.pointer_down(1.0, 1.0);
        pad.pointer_move(2.0, 2.0);
        pad.pointer_up();
        pad.pointer_down(5.0, 5.0);
        pad.pointer_move(6.0, 6.0);

        ops.borrow_mut().clear();
        pad.render();
        assert_eq!(
            *ops.borrow(),
            vec![
                Op::Clear,
                Op::Polyline(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]),
                Op::Polyline(vec![Point::new(5.0, 5.0), Point::new(6.0, 6.0)])
            ]
        );
    }

    #[test_log::test]
    fn failed_export_reports_empty() {
        let (mut pad, _, log) = recording_pad(true);
        pad.pointer_down(1.0, 1.0);
        pad.pointer_move(20.0, 20.0);
        pad.pointer_up();

        assert!(pad.has_content());
        assert_eq!(*log.borrow(), vec![None::<String>]);
    }

    #[test_log::test]
    fn release_after_cancelled_gesture_ends_drawing() {
        let (mut pad, _, log) = recording_pad(false);
        pad.pointer_down(1.0, 1.0);
        pad.pointer_move(20.0, 20.0);
        assert!(pad.is_drawing());

        pad.pointer_up();
        assert!(!pad.is_drawing());
        assert!(pad.strokes().active().is_empty());
        assert_eq!(log.borrow().len(), 1);
    }
}
