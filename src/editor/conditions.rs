//! Run conditions for controlling when editor systems execute.

use bevy::prelude::*;

use crate::ui::DialogState;

use super::canvas::Background;

/// Run condition: returns true when an image is loaded and drawing is possible.
///
/// Usage: `.run_if(image_loaded)`
pub fn image_loaded(background: Res<Background>) -> bool {
    background.is_loaded()
}

/// Run condition: returns true when no modal dialog is open.
///
/// Use this to prevent editor input handlers from processing when
/// the user is interacting with a dialog.
///
/// Usage: `.run_if(no_dialog_open)`
pub fn no_dialog_open(dialog_state: Res<DialogState>) -> bool {
    !dialog_state.any_modal_open
}
