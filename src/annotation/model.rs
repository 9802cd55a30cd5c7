//! Finalized annotation type.

use std::sync::atomic::{AtomicU64, Ordering};

use bevy::prelude::*;

/// A point in drawing space (image pixels, origin top-left, y down).
pub type Point = Vec2;

static NEXT_ANNOTATION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for an annotation. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(u64);

impl AnnotationId {
    /// Allocate a fresh identifier
    pub fn fresh() -> Self {
        Self(NEXT_ANNOTATION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One finalized stroke or dot.
///
/// Fields are private so that consumers only ever get read-only access once
/// the annotation has been committed to history.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    id: AnnotationId,
    points: Vec<Point>,
    is_dot: bool,
    color: Color,
}

impl Annotation {
    /// Build an annotation from a finished gesture.
    ///
    /// Returns `None` for an empty point list. The gesture is classified as a
    /// dot when it has at most `dot_sample_limit` samples.
    pub fn from_gesture(points: Vec<Point>, color: Color, dot_sample_limit: usize) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let is_dot = points.len() <= dot_sample_limit;
        Some(Self {
            id: AnnotationId::fresh(),
            points,
            is_dot,
            color,
        })
    }

    pub fn id(&self) -> AnnotationId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_dot(&self) -> bool {
        self.is_dot
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Where a dot is drawn. Always present since `points` is never empty.
    pub fn anchor(&self) -> Point {
        self.points[0]
    }
}
