use bevy::prelude::*;

/// Message to export the annotated image (opens the save dialog first)
#[derive(Message)]
pub struct ExportRequest;
