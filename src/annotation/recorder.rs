//! Stroke capture state machine.
//!
//! Raw pointer samples for a single gesture are gated against the current
//! [`CanvasFrame`], converted into drawing space and buffered. When the gesture
//! ends the buffer becomes an [`Annotation`]: a dot if it holds only a tap's
//! worth of samples, a polyline otherwise.

use bevy::prelude::*;

use crate::constants::DOT_SAMPLE_LIMIT;

use super::mapper::CanvasFrame;
use super::model::{Annotation, Point};

/// Whether a gesture is currently being captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Active,
}

/// In-progress gesture buffer
#[derive(Resource, Debug, Default)]
pub struct StrokeRecorder {
    points: Vec<Point>,
}

impl StrokeRecorder {
    pub fn state(&self) -> GestureState {
        if self.points.is_empty() {
            GestureState::Idle
        } else {
            GestureState::Active
        }
    }

    /// Points accepted so far, in drawing space (for live preview)
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Pointer pressed. Returns whether the sample was accepted.
    pub fn on_sample_start(&mut self, point: Vec2, frame: &CanvasFrame) -> bool {
        self.accept(point, frame)
    }

    /// Pointer dragged. Returns whether the sample was accepted.
    pub fn on_sample_move(&mut self, point: Vec2, frame: &CanvasFrame) -> bool {
        self.accept(point, frame)
    }

    /// Pointer released. Produces an annotation in `color` if anything was
    /// accepted during the gesture; the buffer is empty afterwards either way.
    pub fn on_gesture_end(&mut self, color: Color) -> Option<Annotation> {
        let points = std::mem::take(&mut self.points);
        Annotation::from_gesture(points, color, DOT_SAMPLE_LIMIT)
    }

    /// Drop the in-progress gesture without producing anything
    pub fn cancel(&mut self) {
        self.points.clear();
    }

    fn accept(&mut self, point: Vec2, frame: &CanvasFrame) -> bool {
        // Outside samples are dropped, never clipped to the edge
        if !frame.contains(point) {
            return false;
        }
        self.points.push(frame.to_drawing_space(point));
        true
    }
}
