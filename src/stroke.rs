use crate::state::DrawState;
use egui::Pos2;

/// Immutable committed gesture: the pointer samples in order, plus the full
/// style snapshot they were drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    style: DrawState,
}

impl Stroke {
    pub fn new(points: Vec<Pos2>, style: DrawState) -> Self {
        Self { points, style }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn style(&self) -> DrawState {
        self.style
    }
}

/// Accumulator for the gesture in flight. Samples collect here until the
/// gesture either finishes (yielding the points for a [`Stroke`]) or is
/// cancelled, e.g. by a style change mid-drag.
#[derive(Debug, Default)]
pub struct PendingStroke {
    points: Vec<Pos2>,
    active: bool,
}

impl PendingStroke {
    /// Start a fresh gesture, discarding any leftover samples.
    pub fn begin(&mut self) {
        self.points.clear();
        self.active = true;
    }

    pub fn add_point(&mut self, point: Pos2) {
        if self.active {
            self.points.push(point);
        }
    }

    /// End the gesture. Returns the accumulated samples, or `None` when no
    /// gesture was active or no samples arrived; either way the accumulator
    /// is reset.
    pub fn finish(&mut self) -> Option<Vec<Pos2>> {
        let committed = if self.active && !self.points.is_empty() {
            Some(std::mem::take(&mut self.points))
        } else {
            None
        };
        self.points.clear();
        self.active = false;
        committed
    }

    /// Drop the gesture without producing anything.
    pub fn cancel(&mut self) {
        self.points.clear();
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }
}
