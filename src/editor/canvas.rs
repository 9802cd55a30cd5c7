//! The background image and the on-screen region it is fitted into.

use std::path::PathBuf;
use std::sync::Arc;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use image::RgbaImage;

use crate::annotation::CanvasFrame;

use super::params::CameraParams;

/// A decoded image currently shown as the drawing background
pub struct LoadedImage {
    pub handle: Handle<Image>,
    /// CPU-side pixels, kept for export
    pub pixels: Arc<RgbaImage>,
    pub path: PathBuf,
}

impl LoadedImage {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.pixels.width() as f32, self.pixels.height() as f32)
    }
}

/// The image being annotated. Drawing is disabled while this is empty.
#[derive(Resource, Default)]
pub struct Background {
    pub image: Option<LoadedImage>,
}

impl Background {
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn size(&self) -> Option<Vec2> {
        self.image.as_ref().map(LoadedImage::size)
    }
}

/// Space taken from the window by the egui control panel
#[derive(Resource, Default)]
pub struct CanvasLayout {
    pub bottom_inset: f32,
}

impl CanvasLayout {
    /// Container available to the image, in window logical pixels
    pub fn container_size(&self, window: &Window) -> Vec2 {
        Vec2::new(window.width(), (window.height() - self.bottom_inset).max(0.0))
    }

    /// Drawable frame for the current background, if drawing is possible
    pub fn frame(&self, window: &Window, background: &Background) -> Option<CanvasFrame> {
        let image_size = background.size()?;
        CanvasFrame::fit(image_size, self.container_size(window))
    }
}

#[derive(Component)]
pub struct BackgroundSprite;

/// Keep the background sprite sized and centered on the drawable area
pub fn fit_background_sprite(
    mut commands: Commands,
    background: Res<Background>,
    layout: Res<CanvasLayout>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera: CameraParams,
    mut sprites: Query<(Entity, &mut Sprite, &mut Transform), With<BackgroundSprite>>,
) {
    let Some(loaded) = background.image.as_ref() else {
        for (entity, _, _) in sprites.iter() {
            commands.entity(entity).despawn();
        }
        return;
    };

    let Ok(window) = window_query.single() else {
        return;
    };

    let Some(frame) = layout.frame(window, &background) else {
        return;
    };

    let Some(center) = camera.viewport_to_world(frame.area.center()) else {
        return;
    };
    let size = frame.area.size();

    if let Ok((_, mut sprite, mut transform)) = sprites.single_mut() {
        if sprite.image != loaded.handle {
            sprite.image = loaded.handle.clone();
        }
        if sprite.custom_size != Some(size) {
            sprite.custom_size = Some(size);
        }
        if transform.translation.truncate() != center {
            transform.translation = center.extend(0.0);
        }
    } else {
        commands.spawn((
            Sprite {
                image: loaded.handle.clone(),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            BackgroundSprite,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(width: u32, height: u32) -> Background {
        Background {
            image: Some(LoadedImage {
                handle: Handle::default(),
                pixels: Arc::new(RgbaImage::new(width, height)),
                path: PathBuf::from("test.png"),
            }),
        }
    }

    #[test]
    fn test_empty_background_has_no_size() {
        let background = Background::default();
        assert!(!background.is_loaded());
        assert!(background.size().is_none());
    }

    #[test]
    fn test_loaded_background_size() {
        let background = loaded(320, 200);
        assert_eq!(background.size(), Some(Vec2::new(320.0, 200.0)));
    }

    #[test]
    fn test_container_excludes_control_panel() {
        let mut window = Window::default();
        window.resolution.set(800.0, 600.0);
        let layout = CanvasLayout { bottom_inset: 100.0 };
        assert_eq!(layout.container_size(&window), Vec2::new(800.0, 500.0));
    }

    #[test]
    fn test_frame_requires_image() {
        let mut window = Window::default();
        window.resolution.set(800.0, 600.0);
        let layout = CanvasLayout::default();
        assert!(layout.frame(&window, &Background::default()).is_none());

        let frame = layout.frame(&window, &loaded(400, 600)).unwrap();
        assert_eq!(frame.area.min, Vec2::new(200.0, 0.0));
        assert_eq!(frame.area.size(), Vec2::new(400.0, 600.0));
    }
}
