//! The annotation store: history plus synchronous change notification.

use bevy::prelude::*;

use super::history::AnnotationHistory;
use super::model::{Annotation, AnnotationId};

/// What a mutation did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationChange {
    Added(AnnotationId),
    Undone(AnnotationId),
    Redone(AnnotationId),
    Cleared,
}

/// Handle returned by [`AnnotationStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&AnnotationChange, &[Annotation]) + Send + Sync>;

/// Single source of truth for what is currently drawn.
///
/// Every mutation that changes state notifies all observers, in registration
/// order, before returning. Undo and redo with nothing to move change nothing
/// and notify nobody.
#[derive(Resource, Default)]
pub struct AnnotationStore {
    history: AnnotationHistory,
    observers: Vec<(ObserverId, Observer)>,
    next_observer_id: u64,
    revision: u64,
}

impl AnnotationStore {
    pub fn add(&mut self, annotation: Annotation) {
        let id = annotation.id();
        self.history.add(annotation);
        self.notify(AnnotationChange::Added(id));
    }

    /// Returns whether anything was undone
    pub fn undo(&mut self) -> bool {
        match self.history.undo().map(Annotation::id) {
            Some(id) => {
                self.notify(AnnotationChange::Undone(id));
                true
            }
            None => false,
        }
    }

    /// Returns whether anything was redone
    pub fn redo(&mut self) -> bool {
        match self.history.redo().map(Annotation::id) {
            Some(id) => {
                self.notify(AnnotationChange::Redone(id));
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.notify(AnnotationChange::Cleared);
    }

    /// Visible annotations, oldest first
    pub fn committed(&self) -> &[Annotation] {
        self.history.committed()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn len(&self) -> usize {
        self.history.committed().len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.committed().is_empty()
    }

    /// Bumped on every notifying mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&AnnotationChange, &[Annotation]) + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the observer was not registered
    #[cfg(test)]
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    fn notify(&mut self, change: AnnotationChange) {
        self.revision += 1;
        let committed = self.history.committed();
        for (_, observer) in self.observers.iter_mut() {
            observer(&change, committed);
        }
    }
}
