//! State resources for the draw tool.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::annotation::{AnnotationStore, StrokeRecorder};
use crate::config::AppConfig;
use crate::theme::{self, array_to_color};
use crate::ui::DialogState;

use super::canvas::{Background, CanvasLayout};

/// Tracks the mouse side of a gesture (the recorder tracks accepted points)
#[derive(Resource, Default)]
pub struct DrawState {
    /// Left button went down over the canvas and has not been released yet
    pub is_drawing: bool,
    /// Last raw cursor position fed to the recorder, to skip stationary frames
    pub last_cursor: Option<Vec2>,
}

impl DrawState {
    pub fn reset(&mut self) {
        self.is_drawing = false;
        self.last_cursor = None;
    }
}

#[derive(Resource)]
pub struct AnnotationSettings {
    pub stroke_color: Color,
}

impl Default for AnnotationSettings {
    fn default() -> Self {
        Self {
            stroke_color: theme::ANNOTATION_DEFAULT,
        }
    }
}

/// Startup system: restore the last used stroke color
pub fn apply_config_settings(config: Res<AppConfig>, mut settings: ResMut<AnnotationSettings>) {
    if let Some(color) = config.data.stroke_color {
        settings.stroke_color = array_to_color(color);
    }
}

#[derive(SystemParam)]
pub(crate) struct DrawResources<'w> {
    pub mouse_button: Res<'w, ButtonInput<MouseButton>>,
    pub draw_state: ResMut<'w, DrawState>,
    pub recorder: ResMut<'w, StrokeRecorder>,
    pub store: ResMut<'w, AnnotationStore>,
    pub settings: Res<'w, AnnotationSettings>,
    pub background: Res<'w, Background>,
    pub layout: Res<'w, CanvasLayout>,
    pub dialog_state: Res<'w, DialogState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color_is_black() {
        let settings = AnnotationSettings::default();
        assert!(theme::same_color(settings.stroke_color, Color::BLACK));
    }

    #[test]
    fn test_draw_state_reset() {
        let mut state = DrawState {
            is_drawing: true,
            last_cursor: Some(Vec2::ONE),
        };
        state.reset();
        assert!(!state.is_drawing);
        assert!(state.last_cursor.is_none());
    }
}
