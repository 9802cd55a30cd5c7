use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::annotation::AnnotationStore;
use crate::config::ConfigResetNotification;
use crate::export::ExportState;
use crate::picker::{ImageLoadError, ImageLoadState};
use crate::theme;

use super::ControlPanelState;

/// Confirmation before wiping every annotation
pub fn clear_confirmation_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<ControlPanelState>,
    mut store: ResMut<AnnotationStore>,
) -> Result {
    if !panel.show_clear_confirmation {
        return Ok(());
    }

    egui::Window::new("Clear Annotations")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(format!(
                "Remove all {} annotation(s)? This cannot be undone.",
                store.len()
            ));
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    store.clear();
                    panel.show_clear_confirmation = false;
                }
                if ui.button("Cancel").clicked() {
                    panel.show_clear_confirmation = false;
                }
            });
        });

    Ok(())
}

/// Shown when the chosen file could not be decoded
pub fn image_load_error_ui(
    mut contexts: EguiContexts,
    mut load_error: ResMut<ImageLoadError>,
) -> Result {
    let Some(error) = load_error.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Could Not Open Image")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, &error);
            });
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                load_error.message = None;
            }
        });

    Ok(())
}

/// Export outcome: the written path on success, the error otherwise
pub fn export_result_ui(
    mut contexts: EguiContexts,
    mut export_state: ResMut<ExportState>,
) -> Result {
    if let Some(error) = export_state.error.clone() {
        egui::Window::new("Export Failed")
            .collapsible(false)
            .resizable(true)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(contexts.ctx_mut()?, |ui| {
                egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    ui.colored_label(theme::ui::ERROR_TEXT, &error);
                });
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    export_state.error = None;
                }
            });
        return Ok(());
    }

    if !export_state.show_success {
        return Ok(());
    }
    let Some(path) = export_state.last_exported.clone() else {
        export_state.show_success = false;
        return Ok(());
    };

    egui::Window::new("Image Exported")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.colored_label(theme::ui::SUCCESS_TEXT, "Saved annotated image to:");
            ui.label(egui::RichText::new(path.to_string_lossy()).weak());
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    export_state.show_success = false;
                }
                if ui.button("Open").clicked() {
                    if let Err(e) = open::that(&path) {
                        warn!("Failed to open {:?}: {}", path, e);
                    }
                    export_state.show_success = false;
                }
            });
        });

    Ok(())
}

/// Blocking modal while an image is decoding or an export is being written
pub fn busy_modal_ui(
    mut contexts: EguiContexts,
    load_state: Res<ImageLoadState>,
    export_state: Res<ExportState>,
) -> Result {
    let message = if load_state.is_loading {
        load_state
            .description
            .clone()
            .unwrap_or_else(|| "Loading...".to_string())
    } else if export_state.is_exporting {
        "Exporting...".to_string()
    } else {
        return Ok(());
    };

    egui::Window::new("Please Wait")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(message);
            });
        });

    Ok(())
}

/// Renders a notification when the config file had to be reset
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).color(theme::ui::HINT_TEXT));
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}
