mod camera;
pub mod canvas;
mod conditions;
mod draw_tool;
mod gizmo;
pub mod params;
mod rendering;
mod shortcuts;
pub mod state;

pub use camera::EditorCamera;
pub use canvas::{Background, CanvasLayout, LoadedImage};
pub use state::{AnnotationSettings, DrawState};

use bevy::prelude::*;

use crate::annotation::{AnnotationChange, AnnotationStore, StrokeRecorder};
use crate::config::{ConfigLoaded, SetStrokeColorRequest};
use crate::theme::{self, color_to_array};

/// Startup system: log every history change at debug level
fn log_annotation_changes(mut store: ResMut<AnnotationStore>) {
    store.subscribe(|change, committed| match change {
        AnnotationChange::Added(id) => {
            debug!("Annotation {} added ({} visible)", id, committed.len())
        }
        AnnotationChange::Undone(id) => {
            debug!("Annotation {} undone ({} visible)", id, committed.len())
        }
        AnnotationChange::Redone(id) => {
            debug!("Annotation {} redone ({} visible)", id, committed.len())
        }
        AnnotationChange::Cleared => debug!("Annotations cleared"),
    });
}

/// Persist the stroke color whenever the user picks a new one
fn persist_stroke_color(
    settings: Res<AnnotationSettings>,
    mut events: MessageWriter<SetStrokeColorRequest>,
) {
    if settings.is_changed() && !settings.is_added() {
        events.write(SetStrokeColorRequest {
            color: color_to_array(settings.stroke_color),
        });
    }
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawState>()
            .init_resource::<AnnotationSettings>()
            .init_resource::<StrokeRecorder>()
            .init_resource::<AnnotationStore>()
            .init_resource::<Background>()
            .init_resource::<CanvasLayout>()
            .insert_resource(ClearColor(theme::CANVAS_BACKGROUND))
            // Register annotation gizmo group for annotation rendering
            .init_gizmo_group::<gizmo::AnnotationGizmoGroup>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    gizmo::configure_annotation_gizmos,
                    log_annotation_changes,
                    state::apply_config_settings.after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    shortcuts::handle_undo,
                    shortcuts::handle_redo,
                    shortcuts::handle_clear,
                    shortcuts::handle_file_shortcuts,
                )
                    .run_if(conditions::no_dialog_open),
            )
            .add_systems(
                Update,
                (
                    draw_tool::handle_draw.run_if(conditions::image_loaded),
                    canvas::fit_background_sprite,
                    rendering::render_annotations.run_if(conditions::image_loaded),
                    rendering::render_draw_preview.run_if(conditions::image_loaded),
                )
                    .chain(),
            )
            .add_systems(Update, persist_stroke_color);
    }
}
