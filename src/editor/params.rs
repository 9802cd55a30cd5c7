//! Common SystemParam bundles and helpers shared by editor systems.
//!
//! - [`CameraParams`]: camera access for viewport/world conversion
//! - [`is_cursor_over_ui`]: check if cursor is over egui UI (for input gating)

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::EditorCamera;

/// Bundled camera query for world calculations
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub camera: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<EditorCamera>>,
}

impl CameraParams<'_, '_> {
    /// Convert a window position into 2D world coordinates
    pub fn viewport_to_world(&self, viewport_pos: Vec2) -> Option<Vec2> {
        let (camera, transform) = self.camera.single().ok()?;
        camera.viewport_to_world_2d(transform, viewport_pos).ok()
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}
