//! Message types for image picking and loading.

use bevy::prelude::*;
use std::path::PathBuf;

/// Message to show the native open dialog
#[derive(Message)]
pub struct OpenImageRequest;

/// Message to decode `path` and make it the background
#[derive(Message)]
pub struct LoadImageRequest {
    pub path: PathBuf,
}
