use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::annotation::AnnotationStore;
use crate::config::AppConfig;
use crate::editor::{AnnotationSettings, Background, CanvasLayout};
use crate::export::{ExportRequest, ExportState};
use crate::picker::{ImageLoadState, ImagePicker, LoadImageRequest, OpenImageRequest};
use crate::theme;

use super::ControlPanelState;

/// Shorten long paths from the left so the file name stays visible
fn display_path(path: &std::path::Path, max_chars: usize) -> String {
    let text = path.to_string_lossy();
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let tail: String = text.chars().skip(count - (max_chars - 3)).collect();
    format!("...{}", tail)
}

/// Bottom control panel: file commands, history, and the color palette
#[allow(clippy::too_many_arguments)]
pub fn control_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<ControlPanelState>,
    mut layout: ResMut<CanvasLayout>,
    mut settings: ResMut<AnnotationSettings>,
    mut store: ResMut<AnnotationStore>,
    background: Res<Background>,
    config: Res<AppConfig>,
    export_state: Res<ExportState>,
    picker: Res<ImagePicker>,
    load_state: Res<ImageLoadState>,
    mut open_events: MessageWriter<OpenImageRequest>,
    mut load_events: MessageWriter<LoadImageRequest>,
    mut export_events: MessageWriter<ExportRequest>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let file_busy = picker.is_open() || load_state.is_loading || export_state.is_busy();

    let response = egui::TopBottomPanel::bottom("control_panel")
        .frame(
            egui::Frame::side_top_panel(&ctx.style())
                .inner_margin(egui::Margin::symmetric(12, 8))
                .fill(theme::ui::PANEL_BACKGROUND),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                if ui
                    .add_enabled(
                        !file_busy,
                        egui::Button::new(egui::RichText::new("Open Image").strong())
                            .min_size(egui::vec2(0.0, 28.0)),
                    )
                    .on_hover_text("Ctrl+O")
                    .clicked()
                {
                    open_events.write(OpenImageRequest);
                }

                ui.add_enabled_ui(!file_busy && !config.data.recent_images.is_empty(), |ui| {
                    ui.menu_button("Recent", |ui| {
                        for path in &config.data.recent_images {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or_else(|| path.to_string_lossy().to_string());
                            if ui
                                .button(name)
                                .on_hover_text(display_path(path, 60))
                                .clicked()
                            {
                                load_events.write(LoadImageRequest { path: path.clone() });
                                ui.close();
                            }
                        }
                    });
                });

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if ui
                    .add_enabled(store.can_undo(), egui::Button::new("Undo"))
                    .on_hover_text("Ctrl+Z")
                    .clicked()
                {
                    store.undo();
                }
                if ui
                    .add_enabled(store.can_redo(), egui::Button::new("Redo"))
                    .on_hover_text("Ctrl+Y")
                    .clicked()
                {
                    store.redo();
                }
                if ui
                    .add_enabled(!store.is_empty(), egui::Button::new("Clear"))
                    .on_hover_text("Ctrl+Shift+Delete")
                    .clicked()
                {
                    panel.show_clear_confirmation = true;
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                ui.label(egui::RichText::new("Color:").color(theme::ui::LABEL_TEXT));
                for (color, name, egui_color) in theme::annotation_colors() {
                    let is_selected = theme::same_color(settings.stroke_color, color);

                    let button = egui::Button::new("")
                        .fill(egui_color)
                        .min_size(egui::vec2(18.0, 18.0))
                        .stroke(if is_selected {
                            egui::Stroke::new(2.0, theme::ui::SELECTED_BORDER)
                        } else {
                            egui::Stroke::new(1.0, theme::ui::UNSELECTED_BORDER)
                        });

                    let response = ui.add(button);
                    if response.clicked() && !is_selected {
                        settings.stroke_color = color;
                    }
                    response.on_hover_text(name);
                }

                let mut custom = theme::bevy_to_egui_opaque(settings.stroke_color);
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut custom,
                    egui::color_picker::Alpha::Opaque,
                )
                .on_hover_text("Custom color")
                .changed()
                {
                    settings.stroke_color = theme::egui_to_bevy(custom);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(
                            background.is_loaded() && !file_busy,
                            egui::Button::new(egui::RichText::new("Save").strong())
                                .min_size(egui::vec2(0.0, 28.0)),
                        )
                        .on_hover_text("Ctrl+S")
                        .clicked()
                    {
                        export_events.write(ExportRequest);
                    }

                    if let Some(loaded) = background.image.as_ref() {
                        let summary = format!(
                            "{}  {}x{}  {} annotation{}{}",
                            loaded
                                .path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or_default(),
                            loaded.pixels.width(),
                            loaded.pixels.height(),
                            store.len(),
                            if store.len() == 1 { "" } else { "s" },
                            if export_state.has_unsaved_changes(&store) {
                                "  (not exported)"
                            } else {
                                ""
                            }
                        );
                        ui.label(egui::RichText::new(summary).color(theme::ui::HINT_TEXT).size(11.0))
                            .on_hover_text(display_path(&loaded.path, 80));
                    }
                });
            });
        });

    let inset = response.response.rect.height();
    if layout.bottom_inset != inset {
        layout.bottom_inset = inset;
    }

    Ok(())
}

/// Centered prompt shown until an image has been opened
pub fn empty_state_ui(
    mut contexts: EguiContexts,
    background: Res<Background>,
    picker: Res<ImagePicker>,
    load_state: Res<ImageLoadState>,
    mut open_events: MessageWriter<OpenImageRequest>,
) -> Result {
    if background.is_loaded() {
        return Ok(());
    }

    egui::Area::new(egui::Id::new("empty_state"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("No image loaded")
                        .size(18.0)
                        .color(theme::ui::HINT_TEXT),
                );
                ui.add_space(8.0);
                if ui
                    .add_enabled(
                        !picker.is_open() && !load_state.is_loading,
                        egui::Button::new(egui::RichText::new("Select Image").size(16.0))
                            .min_size(egui::vec2(140.0, 36.0)),
                    )
                    .clicked()
                {
                    open_events.write(OpenImageRequest);
                }
            });
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_short_path_unchanged() {
        assert_eq!(display_path(Path::new("/a/b.png"), 20), "/a/b.png");
    }

    #[test]
    fn test_long_path_keeps_tail() {
        let shown = display_path(Path::new("/very/long/directory/name/picture.png"), 15);
        assert_eq!(shown.chars().count(), 15);
        assert!(shown.starts_with("..."));
        assert!(shown.ends_with("picture.png"));
    }
}
