mod dialogs;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigResetNotification;
use crate::export::ExportState;
use crate::picker::{ImageLoadError, ImageLoadState, ImagePicker};

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers should check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// State owned by the control panel
#[derive(Resource, Default)]
pub struct ControlPanelState {
    pub show_clear_confirmation: bool,
}

/// Whether any dialog, native or egui, should block drawing and shortcuts
fn any_dialog_open(
    panel: &ControlPanelState,
    picker: &ImagePicker,
    load_state: &ImageLoadState,
    load_error: &ImageLoadError,
    export_state: &ExportState,
    config_reset: &ConfigResetNotification,
) -> bool {
    panel.show_clear_confirmation
        || picker.is_open()
        || load_state.is_loading
        || load_error.message.is_some()
        || export_state.is_busy()
        || export_state.error.is_some()
        || export_state.show_success
        || config_reset.show
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    panel: Res<ControlPanelState>,
    picker: Res<ImagePicker>,
    load_state: Res<ImageLoadState>,
    load_error: Res<ImageLoadError>,
    export_state: Res<ExportState>,
    config_reset: Res<ConfigResetNotification>,
    mut dialog_state: ResMut<DialogState>,
) {
    let open = any_dialog_open(
        &panel,
        &picker,
        &load_state,
        &load_error,
        &export_state,
        &config_reset,
    );
    if dialog_state.any_modal_open != open {
        dialog_state.any_modal_open = open;
    }
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<ControlPanelState>()
            // Panel first so the canvas inset is known before overlays
            .add_systems(
                EguiPrimaryContextPass,
                (toolbar::control_panel_ui, toolbar::empty_state_ui).chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    dialogs::clear_confirmation_ui,
                    dialogs::image_load_error_ui,
                    dialogs::export_result_ui,
                    dialogs::busy_modal_ui,
                    dialogs::config_reset_notification_ui,
                )
                    .after(toolbar::empty_state_ui),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
