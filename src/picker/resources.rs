//! Resource types for picker state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

use super::decode::LoadResult;

/// Pending native open dialog
#[derive(Resource, Default)]
pub struct ImagePicker {
    pub pending_pick: Option<Task<Option<PathBuf>>>,
}

impl ImagePicker {
    pub fn is_open(&self) -> bool {
        self.pending_pick.is_some()
    }
}

/// Resource tracking image load errors for display to user.
#[derive(Resource, Default)]
pub struct ImageLoadError {
    pub message: Option<String>,
}

/// Resource tracking an in-flight image decode for the busy modal
#[derive(Resource, Default)]
pub struct ImageLoadState {
    pub is_loading: bool,
    pub description: Option<String>,
}

/// Component for decode task
#[derive(Component)]
pub struct LoadImageTask(pub Task<LoadResult>);
