// src/stroke.rs

/// Surface-local position in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn scaled(self, sx: f64, sy: f64) -> Self {
        Self::new(self.x * sx, self.y * sy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// One pointer-down to pointer-up drag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stroke {
    points: Vec<Point>
}

impl Stroke {
    /// Smallest number of points that renders as a line.
    pub const MIN_POINTS: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_renderable(&self) -> bool {
        self.points.len() >= Self::MIN_POINTS
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }
}

impl FromIterator<Point> for Stroke {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect()
        }
    }
}

/// Committed strokes plus the stroke currently being drawn.
///
/// Committed strokes only grow by [`StrokeStore::release`] and only shrink by
/// [`StrokeStore::undo`] and [`StrokeStore::clear`]. The active stroke is
/// non-empty only while a gesture is in progress.
#[derive(Debug, Clone, Default)]
pub struct StrokeStore {
    committed: Vec<Stroke>,
    active:    Stroke,
    drawing:   bool
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture at `point`. A gesture already in progress is dropped.
    pub fn begin(&mut self, point: Point) {
        self.active = Stroke::new();
        self.active.push(point);
        self.drawing = true;
    }

    /// Append a point to the active stroke. Returns false outside a gesture.
    pub fn extend(&mut self, point: Point) -> bool {
        if !self.drawing {
            return false;
        }
        self.active.push(point);
        true
    }

    /// Finish the gesture. Returns the index of the committed stroke, or
    /// `None` when there was no gesture or it had too few points to keep.
    pub fn release(&mut self) -> Option<usize> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        let stroke = std::mem::take(&mut self.active);
        if !stroke.is_renderable() {
            log::debug!("discarding stroke with {} point(s)", stroke.len());
            return None;
        }
        self.committed.push(stroke);
        let index = self.committed.len() - 1;
        log::debug!("committed stroke #{index}");
        Some(index)
    }

    /// Remove the most recently committed stroke.
    pub fn undo(&mut self) -> Option<Stroke> {
        let removed = self.committed.pop();
        if removed.is_some() {
            log::debug!("undo: {} stroke(s) left", self.committed.len());
        }
        removed
    }

    pub fn clear(&mut self) {
        self.committed.clear();
        self.active = Stroke::new();
        self.drawing = false;
    }

    pub fn has_content(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Number of committed strokes.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn active(&self) -> &Stroke {
        &self.active
    }

    /// Every stroke in drawing order: committed first, then the active one.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.committed
            .iter()
            .chain(std::iter::once(&self.active).filter(|s| !s.is_empty()))
    }

    /// Scale every stored point, used when the surface changes size.
    pub fn rescale(&mut self, sx: f64, sy: f64) {
        for stroke in self
            .committed
            .iter_mut()
            .chain(std::iter::once(&mut self.active))
        {
            for point in &mut stroke.points {
                *point = point.scaled(sx, sy);
            }
        }
    }
}
