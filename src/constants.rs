//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Gestures with at most this many accepted samples become dots.
/// A tap rarely yields more than one or two samples before release.
pub const DOT_SAMPLE_LIMIT: usize = 2;

/// On-screen stroke width in viewport pixels
pub const STROKE_WIDTH: f32 = 2.0;

/// On-screen dot radius in viewport pixels (a 4px filled circle)
pub const DOT_RADIUS: f32 = 2.0;

/// Maximum number of recently opened images to remember in config
pub const MAX_RECENT_IMAGES: usize = 5;

/// File extensions offered by the open dialog
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp", "tiff", "tif"];

/// Suffix appended to the source file stem when exporting
pub const EXPORT_SUFFIX: &str = "-annotated";
