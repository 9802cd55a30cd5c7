//! Exporting the background with its annotations as a PNG.
//!
//! - [`flatten`] - Rasterizing annotations in image space
//! - [`systems`] - Save dialog, export task, and polling
//!
//! Exporting reads the store but never changes it.

mod flatten;
mod messages;
mod resources;
mod systems;

pub use messages::ExportRequest;
pub use resources::ExportState;

use bevy::prelude::*;

pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExportState>()
            .add_message::<ExportRequest>()
            .add_systems(
                Update,
                (
                    systems::export_request_system.run_if(on_message::<ExportRequest>),
                    systems::poll_export_dialog,
                    systems::poll_export_tasks,
                )
                    .chain(),
            );
    }
}
