//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor UI and rendering.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Canvas Colors
// ============================================================================

/// Light grey backdrop visible in the letterbox/pillarbox bars
pub const CANVAS_BACKGROUND: Color = Color::srgb(0.95, 0.95, 0.95);

// ============================================================================
// Annotation Colors
// ============================================================================

/// Default annotation stroke color (black)
pub const ANNOTATION_DEFAULT: Color = Color::srgb(0.0, 0.0, 0.0);

/// Annotation color palette for the toolbar picker
pub fn annotation_colors() -> [(Color, &'static str, egui::Color32); 8] {
    [
        (Color::srgb(0.0, 0.0, 0.0), "Black", egui::Color32::BLACK),
        (Color::srgb(1.0, 0.0, 0.0), "Red", egui::Color32::RED),
        (Color::srgb(0.0, 0.0, 1.0), "Blue", egui::Color32::BLUE),
        (
            Color::srgb(0.0, 0.8, 0.0),
            "Green",
            egui::Color32::from_rgb(0, 204, 0),
        ),
        (Color::srgb(1.0, 1.0, 0.0), "Yellow", egui::Color32::YELLOW),
        (Color::srgb(1.0, 1.0, 1.0), "White", egui::Color32::WHITE),
        (
            Color::srgb(1.0, 0.5, 0.0),
            "Orange",
            egui::Color32::from_rgb(255, 128, 0),
        ),
        (
            Color::srgb(0.5, 0.0, 0.5),
            "Purple",
            egui::Color32::from_rgb(128, 0, 128),
        ),
    ]
}

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Control panel background
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(45, 45, 48);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// White for selected swatch borders
    pub const SELECTED_BORDER: egui::Color32 = egui::Color32::WHITE;

    /// Dark grey for unselected swatch borders
    pub const UNSELECTED_BORDER: egui::Color32 = egui::Color32::DARK_GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Green for the export confirmation
    pub const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (fully opaque)
pub fn bevy_to_egui_opaque(color: Color) -> egui::Color32 {
    let [r, g, b, _] = color_to_rgba8(color);
    egui::Color32::from_rgb(r, g, b)
}

/// Convert an egui color picked in the toolbar back to a Bevy Color
pub fn egui_to_bevy(color: egui::Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::srgba_u8(r, g, b, a)
}

/// Convert a Bevy Color to 8-bit sRGBA channels
pub fn color_to_rgba8(color: Color) -> [u8; 4] {
    let srgba = color.to_srgba();
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        channel(srgba.red),
        channel(srgba.green),
        channel(srgba.blue),
        channel(srgba.alpha),
    ]
}

/// Persistable form of a color
pub fn color_to_array(color: Color) -> [f32; 4] {
    let srgba = color.to_srgba();
    [srgba.red, srgba.green, srgba.blue, srgba.alpha]
}

pub fn array_to_color(arr: [f32; 4]) -> Color {
    Color::srgba(arr[0], arr[1], arr[2], arr[3])
}

/// Whether two colors match closely enough to mark a palette swatch selected
pub fn same_color(a: Color, b: Color) -> bool {
    let a = a.to_srgba();
    let b = b.to_srgba();
    (a.red - b.red).abs() < 0.01
        && (a.green - b.green).abs() < 0.01
        && (a.blue - b.blue).abs() < 0.01
        && (a.alpha - b.alpha).abs() < 0.01
}
