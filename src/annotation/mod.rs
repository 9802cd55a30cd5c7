//! Annotation model: the part of the app with real invariants.
//!
//! Pointer samples flow through the [`mapper`] (is the sample on the image?),
//! into the [`recorder`] (accumulate one gesture, classify dot vs stroke) and
//! finally into the [`store`], which wraps the undo/redo [`history`] and tells
//! observers about every change.
//!
//! Nothing in here touches ECS queries, windows or egui, so every piece is
//! testable with plain values.
//!
//! ## Module Structure
//!
//! - [`model`] - Annotation and its identifier
//! - [`mapper`] - Aspect-fit drawable area and drawing-space conversion
//! - [`recorder`] - Idle/Active gesture state machine
//! - [`history`] - Two-stack undo/redo log
//! - [`store`] - Observable aggregate the rest of the app reads from

pub mod history;
pub mod mapper;
pub mod model;
pub mod recorder;
pub mod store;

#[cfg(test)]
mod tests;

pub use mapper::CanvasFrame;
pub use model::{Annotation, AnnotationId, Point};
pub use recorder::{GestureState, StrokeRecorder};
pub use store::{AnnotationChange, AnnotationStore, ObserverId};
