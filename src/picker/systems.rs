//! Open dialog, background decode, and background replacement.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, IoTaskPool};
use futures_lite::future;
use std::sync::Arc;

use crate::annotation::{AnnotationStore, StrokeRecorder};
use crate::config::{AddRecentImageRequest, AppConfig};
use crate::constants::IMAGE_EXTENSIONS;
use crate::editor::{Background, DrawState, LoadedImage};

use super::decode::{decode_image, to_bevy_image, LoadResult};
use super::messages::{LoadImageRequest, OpenImageRequest};
use super::resources::{ImageLoadError, ImageLoadState, ImagePicker, LoadImageTask};

/// Spawns the native open dialog unless one is already showing
pub fn open_image_dialog_system(
    mut events: MessageReader<OpenImageRequest>,
    mut picker: ResMut<ImagePicker>,
    config: Res<AppConfig>,
) {
    // Several requests in one frame still open a single dialog
    if events.read().count() == 0 || picker.is_open() {
        return;
    }

    let start_dir = config.data.last_image_dir.clone();
    let task_pool = AsyncComputeTaskPool::get();
    picker.pending_pick = Some(task_pool.spawn(async move {
        let mut dialog = rfd::AsyncFileDialog::new()
            .set_title("Open Image")
            .add_filter("Images", IMAGE_EXTENSIONS);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_file().await.map(|h| h.path().to_path_buf())
    }));
}

/// Polls the open dialog; a cancelled dialog changes nothing
pub fn poll_image_pick(
    mut picker: ResMut<ImagePicker>,
    mut load_events: MessageWriter<LoadImageRequest>,
) {
    if let Some(ref mut task) = picker.pending_pick
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        picker.pending_pick = None;
        match result {
            Some(path) => {
                load_events.write(LoadImageRequest { path });
            }
            None => debug!("Open dialog cancelled"),
        }
    }
}

/// Starts an async decode
pub fn load_image_system(
    mut commands: Commands,
    mut events: MessageReader<LoadImageRequest>,
    mut load_state: ResMut<ImageLoadState>,
) {
    for event in events.read() {
        if load_state.is_loading {
            warn!("Image load already in progress");
            continue;
        }

        let path = event.path.clone();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        load_state.is_loading = true;
        load_state.description = Some(format!("Loading {}...", name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let pixels = decode_image(&path);
            LoadResult { path, pixels }
        });

        commands.spawn(LoadImageTask(task));
    }
}

/// Polls decode tasks and swaps in the new background on success
#[allow(clippy::too_many_arguments)]
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadImageTask)>,
    mut load_state: ResMut<ImageLoadState>,
    mut load_error: ResMut<ImageLoadError>,
    mut images: ResMut<Assets<Image>>,
    mut background: ResMut<Background>,
    mut store: ResMut<AnnotationStore>,
    mut recorder: ResMut<StrokeRecorder>,
    mut draw_state: ResMut<DrawState>,
    mut config_events: MessageWriter<AddRecentImageRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            load_state.is_loading = false;
            load_state.description = None;

            match result.pixels {
                Ok(pixels) => {
                    info!(
                        "Loaded {:?} ({}x{})",
                        result.path,
                        pixels.width(),
                        pixels.height()
                    );
                    load_error.message = None;

                    if let Some(previous) = background.image.take() {
                        images.remove(&previous.handle);
                    }
                    let handle = images.add(to_bevy_image(&pixels));
                    background.image = Some(LoadedImage {
                        handle,
                        pixels: Arc::new(pixels),
                        path: result.path.clone(),
                    });

                    // A new image starts a fresh session
                    recorder.cancel();
                    draw_state.reset();
                    store.clear();

                    config_events.write(AddRecentImageRequest { path: result.path });
                }
                Err(error) => {
                    error!("{}", error);
                    load_error.message = Some(error);
                }
            }

            commands.entity(entity).despawn();
        }
    }
}
