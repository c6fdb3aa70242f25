//! Stroke capture for the drawing surface.
//!
//! A stroke is one continuous pointer-down-to-pointer-up gesture stored as an
//! ordered point sequence; the drawing is the append-only log of strokes since
//! the last clear. All mutation happens on the UI loop, so no locking is
//! involved.

use egui::Pos2;

/// One continuous gesture, recorded as an ordered point sequence.
///
/// Non-empty from creation; points are appended while the gesture is open and
/// the stroke is frozen once the pointer lifts.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
}

impl Stroke {
    fn new(first: Pos2) -> Self {
        Self {
            points: vec![first],
        }
    }

    /// Ordered points of the gesture, oldest first.
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }
}

/// Everything drawn since the last clear, oldest stroke first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Drawing {
    strokes: Vec<Stroke>,
}

impl Drawing {
    /// Strokes in draw order, including a still-open gesture if any.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// True when nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// Accumulates raw pointer samples into strokes.
///
/// Out-of-order pointer events are tolerated as no-ops rather than corrupting
/// state: extending without an open gesture, opening twice, or ending twice
/// all leave the drawing unchanged. Each mutator reports whether the drawing
/// changed so the caller knows when to re-rasterize.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    drawing: Drawing,
    gesture_open: bool,
}

impl StrokeRecorder {
    /// Start a new stroke at `point`. No-op if a gesture is already open.
    pub fn begin_stroke(&mut self, point: Pos2) -> bool {
        if self.gesture_open {
            return false;
        }
        self.drawing.strokes.push(Stroke::new(point));
        self.gesture_open = true;
        true
    }

    /// Append `point` to the open stroke. No-op if no gesture is open.
    pub fn extend_stroke(&mut self, point: Pos2) -> bool {
        if !self.gesture_open {
            return false;
        }
        if let Some(open) = self.drawing.strokes.last_mut() {
            open.points.push(point);
            return true;
        }
        false
    }

    /// Close the open stroke, freezing it. No-op if no gesture is open.
    pub fn end_stroke(&mut self) -> bool {
        if !self.gesture_open {
            return false;
        }
        self.gesture_open = false;
        true
    }

    /// Discard all strokes, returning the drawing to empty.
    pub fn clear(&mut self) -> bool {
        self.gesture_open = false;
        if self.drawing.is_empty() {
            return false;
        }
        self.drawing.strokes.clear();
        true
    }

    /// Current drawing, including the in-progress stroke so repaints track
    /// the pointer.
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// True while a pointer-down gesture has not yet been ended.
    pub fn gesture_open(&self) -> bool {
        self.gesture_open
    }
}
