//! Two-stack undo/redo log of finalized annotations.

use super::model::Annotation;

/// Committed annotations plus the redo branch.
///
/// `committed` is what is visible, oldest first. `pending_redo` holds undone
/// annotations with the most recently undone last. Any `add` discards the redo
/// branch, so an undo immediately followed by a redo is always an exact
/// inverse.
#[derive(Debug, Default, Clone)]
pub struct AnnotationHistory {
    committed: Vec<Annotation>,
    pending_redo: Vec<Annotation>,
}

impl AnnotationHistory {
    /// Append a new annotation on top and drop the redo branch
    pub fn add(&mut self, annotation: Annotation) {
        self.pending_redo.clear();
        self.committed.push(annotation);
    }

    /// Move the newest committed annotation onto the redo stack
    pub fn undo(&mut self) -> Option<&Annotation> {
        let annotation = self.committed.pop()?;
        self.pending_redo.push(annotation);
        self.pending_redo.last()
    }

    /// Move the most recently undone annotation back on top
    pub fn redo(&mut self) -> Option<&Annotation> {
        let annotation = self.pending_redo.pop()?;
        self.committed.push(annotation);
        self.committed.last()
    }

    /// Empty both stacks
    pub fn clear(&mut self) {
        self.committed.clear();
        self.pending_redo.clear();
    }

    pub fn committed(&self) -> &[Annotation] {
        &self.committed
    }

    #[cfg(test)]
    pub fn pending_redo(&self) -> &[Annotation] {
        &self.pending_redo
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.pending_redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::*;
    use crate::annotation::AnnotationId;

    fn dot(x: f32) -> Annotation {
        Annotation::from_gesture(vec![Vec2::new(x, 0.0)], Color::BLACK, 2).unwrap()
    }

    fn ids(annotations: &[Annotation]) -> Vec<AnnotationId> {
        annotations.iter().map(Annotation::id).collect()
    }

    #[test]
    fn test_starts_empty() {
        let history = AnnotationHistory::default();
        assert!(history.committed().is_empty());
        assert!(history.pending_redo().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_add_appends_on_top() {
        let mut history = AnnotationHistory::default();
        let a = dot(1.0);
        let b = dot(2.0);
        history.add(a.clone());
        history.add(b.clone());
        assert_eq!(ids(history.committed()), vec![a.id(), b.id()]);
    }

    #[test]
    fn test_undo_moves_last_to_redo() {
        let mut history = AnnotationHistory::default();
        let a = dot(1.0);
        let b = dot(2.0);
        history.add(a.clone());
        history.add(b.clone());

        let undone = history.undo().map(Annotation::id);
        assert_eq!(undone, Some(b.id()));
        assert_eq!(ids(history.committed()), vec![a.id()]);
        assert_eq!(ids(history.pending_redo()), vec![b.id()]);
    }

    #[test]
    fn test_undo_then_redo_restores_exactly() {
        let mut history = AnnotationHistory::default();
        for i in 0..4 {
            history.add(dot(i as f32));
        }
        let before = history.committed().to_vec();

        history.undo();
        history.redo();

        assert_eq!(history.committed(), before.as_slice());
        assert!(history.pending_redo().is_empty());
    }

    #[test]
    fn test_redo_order_is_lifo() {
        let mut history = AnnotationHistory::default();
        let a = dot(1.0);
        let b = dot(2.0);
        let c = dot(3.0);
        history.add(a.clone());
        history.add(b.clone());
        history.add(c.clone());

        history.undo();
        history.undo();
        assert_eq!(ids(history.pending_redo()), vec![c.id(), b.id()]);

        assert_eq!(history.redo().map(Annotation::id), Some(b.id()));
        assert_eq!(history.redo().map(Annotation::id), Some(c.id()));
        assert_eq!(ids(history.committed()), vec![a.id(), b.id(), c.id()]);
    }

    #[test]
    fn test_add_clears_redo() {
        let mut history = AnnotationHistory::default();
        history.add(dot(1.0));
        history.add(dot(2.0));
        history.undo();
        history.undo();
        assert_eq!(history.pending_redo().len(), 2);

        history.add(dot(3.0));
        assert!(history.pending_redo().is_empty());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history = AnnotationHistory::default();
        assert!(history.undo().is_none());
        assert!(history.committed().is_empty());
        assert!(history.pending_redo().is_empty());
    }

    #[test]
    fn test_redo_on_empty_is_noop() {
        let mut history = AnnotationHistory::default();
        let a = dot(1.0);
        history.add(a.clone());
        assert!(history.redo().is_none());
        assert_eq!(ids(history.committed()), vec![a.id()]);
        assert!(history.pending_redo().is_empty());
    }

    #[test]
    fn test_clear_empties_both() {
        let mut history = AnnotationHistory::default();
        history.add(dot(1.0));
        history.add(dot(2.0));
        history.undo();
        history.clear();
        assert!(history.committed().is_empty());
        assert!(history.pending_redo().is_empty());
    }
}
