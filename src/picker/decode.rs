//! Image decoding, run off the main thread.

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Outcome of a background decode
pub struct LoadResult {
    pub path: PathBuf,
    pub pixels: Result<RgbaImage, String>,
}

/// Reject images that have nothing to draw on
pub fn check_dimensions(pixels: &RgbaImage) -> Result<(), String> {
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(format!(
            "Image has no drawable area ({}x{})",
            pixels.width(),
            pixels.height()
        ));
    }
    Ok(())
}

/// Decode any supported format into 8-bit RGBA
pub fn decode_image(path: &Path) -> Result<RgbaImage, String> {
    let decoded = image::open(path)
        .map_err(|e| format!("Could not open {}: {}", path.display(), e))?
        .to_rgba8();
    check_dimensions(&decoded)?;
    Ok(decoded)
}

/// Upload-ready copy of the decoded pixels
pub fn to_bevy_image(pixels: &RgbaImage) -> Image {
    Image::new(
        Extent3d {
            width: pixels.width(),
            height: pixels.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        pixels.as_raw().clone(),
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}
