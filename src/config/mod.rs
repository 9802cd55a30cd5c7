use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::MAX_RECENT_IMAGES;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfigData {
    /// Directory the open dialog starts in
    #[serde(default)]
    pub last_image_dir: Option<PathBuf>,

    /// Recently opened images, newest first
    #[serde(default)]
    pub recent_images: Vec<PathBuf>,

    /// Last selected stroke color (sRGBA)
    #[serde(default)]
    pub stroke_color: Option<[f32; 4]>,

    /// Directory the save dialog starts in
    #[serde(default)]
    pub last_export_dir: Option<PathBuf>,
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to record a successfully opened image
#[derive(Message)]
pub struct AddRecentImageRequest {
    pub path: PathBuf,
}

/// Message to remember where the last export was written
#[derive(Message)]
pub struct UpdateLastExportDirRequest {
    pub dir: PathBuf,
}

/// Message to persist the active stroke color
#[derive(Message)]
pub struct SetStrokeColorRequest {
    pub color: [f32; 4],
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: AppConfigData,
    config_path: PathBuf,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Parse config JSON, describing what went wrong on failure
fn parse_config(json: &str) -> Result<AppConfigData, String> {
    serde_json::from_str(json).map_err(|e| format!("Configuration file was corrupted: {}", e))
}

/// Load configuration from disk
fn load_config() -> LoadConfigResult {
    let config_path = get_config_path();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match parse_config(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(reason) => {
                    warn!("Failed to parse config file: {}", reason);
                    (AppConfigData::default(), Some(reason))
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        data,
        config_path,
        reset_reason,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Move `path` to the front of `recent`, dropping duplicates and trimming to `max`
fn push_recent(recent: &mut Vec<PathBuf>, path: &Path, max: usize) {
    recent.retain(|p| p != path);
    recent.insert(0, path.to_path_buf());
    recent.truncate(max);
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    if let Err(e) = crate::paths::ensure_directories() {
        warn!("Failed to create app directories: {}", e);
    }

    let result = load_config();
    config.data = result.data;
    config.config_path = result.config_path;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Startup system to drop recent images that no longer exist
fn prune_missing_recent_images(
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    let before = config.data.recent_images.len();
    config.data.recent_images.retain(|p| p.exists());
    let removed = before - config.data.recent_images.len();
    if removed > 0 {
        info!("Removed {} missing image(s) from recent list", removed);
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to add an image to the recent list
fn add_recent_image_system(
    mut events: MessageReader<AddRecentImageRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        push_recent(&mut config.data.recent_images, &event.path, MAX_RECENT_IMAGES);
        config.data.last_image_dir = event.path.parent().map(Path::to_path_buf);
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to update the last export directory
fn update_last_export_dir_system(
    mut events: MessageReader<UpdateLastExportDirRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_export_dir = Some(event.dir.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to persist the stroke color
fn set_stroke_color_system(
    mut events: MessageReader<SetStrokeColorRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.stroke_color == Some(event.color) {
            continue;
        }
        config.data.stroke_color = Some(event.color);
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<AddRecentImageRequest>()
            .add_message::<UpdateLastExportDirRequest>()
            .add_message::<SetStrokeColorRequest>()
            .add_systems(
                Startup,
                (load_config_system, prune_missing_recent_images)
                    .chain()
                    .in_set(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    add_recent_image_system.run_if(on_message::<AddRecentImageRequest>),
                    update_last_export_dir_system.run_if(on_message::<UpdateLastExportDirRequest>),
                    set_stroke_color_system.run_if(on_message::<SetStrokeColorRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
