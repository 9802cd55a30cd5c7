//! Export state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;

use crate::annotation::{Annotation, AnnotationStore};

use super::flatten::StrokeStyle;

/// What gets exported, captured when the user asks to save.
///
/// Later edits made while the save dialog is open do not leak into the file.
pub struct ExportSnapshot {
    pub background: Arc<RgbaImage>,
    pub annotations: Vec<Annotation>,
    pub style: StrokeStyle,
    /// Store revision the annotations were taken at
    pub revision: u64,
}

/// Result of a background export
pub struct ExportResult {
    pub path: PathBuf,
    pub result: Result<(), String>,
    pub revision: u64,
}

#[derive(Resource, Default)]
pub struct ExportState {
    /// Save dialog currently showing
    pub pending_dialog: Option<Task<Option<PathBuf>>>,
    /// Snapshot waiting for the dialog to return a path
    pub snapshot: Option<ExportSnapshot>,
    /// An encode/write task is running
    pub is_exporting: bool,
    /// File written by the last successful export
    pub last_exported: Option<PathBuf>,
    /// Store revision written by the last successful export
    pub exported_revision: Option<u64>,
    /// Whether to show the export confirmation
    pub show_success: bool,
    /// Error from the last failed export, for display to user
    pub error: Option<String>,
}

impl ExportState {
    pub fn is_busy(&self) -> bool {
        self.pending_dialog.is_some() || self.is_exporting
    }

    /// Annotations exist that the last export did not include
    pub fn has_unsaved_changes(&self, store: &AnnotationStore) -> bool {
        !store.is_empty() && self.exported_revision != Some(store.revision())
    }
}

/// Component for export task
#[derive(Component)]
pub struct ExportTask(pub Task<ExportResult>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DOT_SAMPLE_LIMIT;

    fn dot() -> Annotation {
        Annotation::from_gesture(vec![Vec2::new(1.0, 1.0)], Color::BLACK, DOT_SAMPLE_LIMIT).unwrap()
    }

    #[test]
    fn test_empty_store_has_nothing_unsaved() {
        let state = ExportState::default();
        assert!(!state.has_unsaved_changes(&AnnotationStore::default()));
    }

    #[test]
    fn test_unsaved_until_exported_revision_matches() {
        let mut store = AnnotationStore::default();
        let mut state = ExportState::default();
        store.add(dot());
        assert!(state.has_unsaved_changes(&store));

        state.exported_revision = Some(store.revision());
        assert!(!state.has_unsaved_changes(&store));

        store.add(dot());
        assert!(state.has_unsaved_changes(&store));
        store.undo();
        // Undoing back to the exported content still counts as a change
        assert!(state.has_unsaved_changes(&store));
    }
}
