//! Choosing and decoding the background image.
//!
//! ## Module Structure
//!
//! - [`messages`] - Open/load requests
//! - [`resources`] - Pending dialog, load state, and error tracking
//! - [`decode`] - Decoding to RGBA and conversion to a Bevy [`Image`]
//! - [`systems`] - Dialog, decode task, and polling systems
//!
//! Loading a new image replaces the background and clears all annotations.

mod decode;
mod messages;
mod resources;
mod systems;

pub use messages::{LoadImageRequest, OpenImageRequest};
pub use resources::{ImageLoadError, ImageLoadState, ImagePicker};

use bevy::prelude::*;

pub struct PickerPlugin;

impl Plugin for PickerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ImagePicker>()
            .init_resource::<ImageLoadError>()
            .init_resource::<ImageLoadState>()
            .add_message::<OpenImageRequest>()
            .add_message::<LoadImageRequest>()
            .add_systems(
                Update,
                (
                    systems::open_image_dialog_system.run_if(on_message::<OpenImageRequest>),
                    systems::poll_image_pick,
                    systems::load_image_system.run_if(on_message::<LoadImageRequest>),
                    systems::poll_load_tasks,
                )
                    .chain(),
            );
    }
}
