//! Keyboard shortcuts for history and file commands.
//!
//! - **Ctrl+Z**: Undo the last annotation
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone annotation
//! - **Ctrl+Shift+Delete**: Clear all annotations (asks first)
//! - **Ctrl+O**: Open an image
//! - **Ctrl+S**: Export the annotated image

use bevy::prelude::*;

use crate::annotation::AnnotationStore;
use crate::export::ExportRequest;
use crate::picker::OpenImageRequest;
use crate::ui::ControlPanelState;

fn modifiers(keyboard: &ButtonInput<KeyCode>) -> (bool, bool) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft)
        || keyboard.pressed(KeyCode::ControlRight)
        || keyboard.pressed(KeyCode::SuperLeft)
        || keyboard.pressed(KeyCode::SuperRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    (ctrl, shift)
}

/// System to handle undo keyboard shortcut (Ctrl+Z)
pub fn handle_undo(keyboard: Res<ButtonInput<KeyCode>>, mut store: ResMut<AnnotationStore>) {
    let (ctrl, shift) = modifiers(&keyboard);

    // Ctrl+Z (without shift) = undo
    if ctrl && !shift && keyboard.just_pressed(KeyCode::KeyZ) && !store.undo() {
        debug!("Nothing to undo");
    }
}

/// System to handle redo keyboard shortcut (Ctrl+Y or Ctrl+Shift+Z)
pub fn handle_redo(keyboard: Res<ButtonInput<KeyCode>>, mut store: ResMut<AnnotationStore>) {
    let (ctrl, shift) = modifiers(&keyboard);

    let redo_pressed = (ctrl && keyboard.just_pressed(KeyCode::KeyY))
        || (ctrl && shift && keyboard.just_pressed(KeyCode::KeyZ));

    if redo_pressed && !store.redo() {
        debug!("Nothing to redo");
    }
}

/// System to handle the clear shortcut (Ctrl+Shift+Delete)
pub fn handle_clear(
    keyboard: Res<ButtonInput<KeyCode>>,
    store: Res<AnnotationStore>,
    mut panel: ResMut<ControlPanelState>,
) {
    let (ctrl, shift) = modifiers(&keyboard);

    if ctrl
        && shift
        && (keyboard.just_pressed(KeyCode::Delete) || keyboard.just_pressed(KeyCode::Backspace))
        && !store.is_empty()
    {
        panel.show_clear_confirmation = true;
    }
}

/// System to handle Ctrl+O / Ctrl+S
pub fn handle_file_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut open_events: MessageWriter<OpenImageRequest>,
    mut export_events: MessageWriter<ExportRequest>,
) {
    let (ctrl, shift) = modifiers(&keyboard);
    if !ctrl || shift {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyO) {
        open_events.write(OpenImageRequest);
    } else if keyboard.just_pressed(KeyCode::KeyS) {
        export_events.write(ExportRequest);
    }
}
