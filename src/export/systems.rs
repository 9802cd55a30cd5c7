//! Save dialog, background export, and task polling.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, IoTaskPool};
use bevy::window::PrimaryWindow;
use futures_lite::future;

use crate::annotation::AnnotationStore;
use crate::config::{AppConfig, UpdateLastExportDirRequest};
use crate::editor::{Background, CanvasLayout};
use crate::paths;

use super::flatten::{flatten, with_png_extension, write_png, StrokeStyle};
use super::messages::ExportRequest;
use super::resources::{ExportResult, ExportSnapshot, ExportState, ExportTask};

/// Captures what is on screen and opens the save dialog
pub fn export_request_system(
    mut events: MessageReader<ExportRequest>,
    mut export_state: ResMut<ExportState>,
    background: Res<Background>,
    layout: Res<CanvasLayout>,
    store: Res<AnnotationStore>,
    config: Res<AppConfig>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    if events.read().count() == 0 {
        return;
    }

    if export_state.is_busy() {
        warn!("Export already in progress");
        return;
    }

    let Some(loaded) = background.image.as_ref() else {
        debug!("Nothing to export without an image");
        return;
    };

    // Minimized windows have no frame; fall back to one image pixel per screen pixel
    let scale = window_query
        .single()
        .ok()
        .and_then(|window| layout.frame(window, &background))
        .map(|frame| frame.scale())
        .unwrap_or(1.0);

    export_state.snapshot = Some(ExportSnapshot {
        background: loaded.pixels.clone(),
        annotations: store.committed().to_vec(),
        style: StrokeStyle::for_scale(scale),
        revision: store.revision(),
    });
    export_state.error = None;
    export_state.show_success = false;

    let file_name = paths::export_file_name(Some(&loaded.path));
    let start_dir = config
        .data
        .last_export_dir
        .clone()
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(paths::default_export_dir);

    let task_pool = AsyncComputeTaskPool::get();
    export_state.pending_dialog = Some(task_pool.spawn(async move {
        rfd::AsyncFileDialog::new()
            .set_title("Save Annotated Image")
            .add_filter("PNG Image", &["png"])
            .set_directory(start_dir)
            .set_file_name(file_name)
            .save_file()
            .await
            .map(|h| h.path().to_path_buf())
    }));
}

/// Polls the save dialog and starts the encode on IoTaskPool
pub fn poll_export_dialog(mut commands: Commands, mut export_state: ResMut<ExportState>) {
    let Some(ref mut task) = export_state.pending_dialog else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(task)) else {
        return;
    };
    export_state.pending_dialog = None;

    let snapshot = export_state.snapshot.take();
    let (Some(path), Some(snapshot)) = (result, snapshot) else {
        debug!("Save dialog cancelled");
        return;
    };

    let path = with_png_extension(&path);
    export_state.is_exporting = true;

    let task_pool = IoTaskPool::get();
    let revision = snapshot.revision;
    let task = task_pool.spawn(async move {
        let result = flatten(&snapshot.background, &snapshot.annotations, snapshot.style)
            .and_then(|flattened| write_png(&flattened, &path));
        ExportResult {
            path,
            result,
            revision,
        }
    });

    commands.spawn(ExportTask(task));
}

/// Polls export tasks and reports the outcome
pub fn poll_export_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ExportTask)>,
    mut export_state: ResMut<ExportState>,
    mut config_events: MessageWriter<UpdateLastExportDirRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(outcome) = future::block_on(future::poll_once(&mut task.0)) {
            export_state.is_exporting = false;

            match outcome.result {
                Ok(()) => {
                    info!("Exported annotated image to {:?}", outcome.path);
                    if let Some(dir) = outcome.path.parent() {
                        config_events.write(UpdateLastExportDirRequest {
                            dir: dir.to_path_buf(),
                        });
                    }
                    export_state.error = None;
                    export_state.exported_revision = Some(outcome.revision);
                    export_state.last_exported = Some(outcome.path);
                    export_state.show_success = true;
                }
                Err(error) => {
                    error!("{}", error);
                    export_state.error = Some(error);
                }
            }

            commands.entity(entity).despawn();
        }
    }
}
