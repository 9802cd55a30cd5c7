//! Draw tool system: turns left-button drags into recorder calls.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::annotation::{AnnotationStore, CanvasFrame, StrokeRecorder};

use super::params::is_cursor_over_ui;
use super::state::{DrawResources, DrawState};

/// Left button and cursor as seen by the canvas during one frame
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PointerFrame {
    pub just_pressed: bool,
    pub pressed: bool,
    pub just_released: bool,
    pub cursor: Option<Vec2>,
    pub canvas: Option<CanvasFrame>,
    /// The press landed on egui or a dialog is open
    pub blocked: bool,
}

pub fn handle_draw(
    mut res: DrawResources,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
) {
    let window = window_query.single().ok();
    let just_pressed = res.mouse_button.just_pressed(MouseButton::Left);

    let input = PointerFrame {
        just_pressed,
        pressed: res.mouse_button.pressed(MouseButton::Left),
        just_released: res.mouse_button.just_released(MouseButton::Left),
        cursor: window.and_then(|w| w.cursor_position()),
        canvas: window.and_then(|w| res.layout.frame(w, &res.background)),
        blocked: just_pressed
            && (res.dialog_state.any_modal_open || is_cursor_over_ui(&mut contexts)),
    };

    let color = res.settings.stroke_color;
    step_gesture(
        &input,
        &mut res.draw_state,
        &mut res.recorder,
        &mut res.store,
        color,
    );
}

/// Advances the gesture by one frame of input.
///
/// A press and release that land in the same frame still produce a dot. A
/// release always ends the gesture in progress, wherever the cursor is.
pub(crate) fn step_gesture(
    input: &PointerFrame,
    draw_state: &mut DrawState,
    recorder: &mut StrokeRecorder,
    store: &mut AnnotationStore,
    color: Color,
) {
    if input.just_pressed {
        // An open gesture here missed its release before this press
        if draw_state.is_drawing && input.just_released {
            finish_gesture(draw_state, recorder, store, color);
        }
        recorder.cancel();
        draw_state.reset();

        if !input.blocked
            && let (Some(cursor), Some(canvas)) = (input.cursor, input.canvas)
        {
            draw_state.is_drawing = true;
            draw_state.last_cursor = Some(cursor);
            recorder.on_sample_start(cursor, &canvas);
        }

        // Tapped within a single frame
        if input.just_released && !input.pressed && draw_state.is_drawing {
            finish_gesture(draw_state, recorder, store, color);
        }
        return;
    }

    // Only real movement counts as a sample; a held tap stays a dot
    if input.pressed
        && draw_state.is_drawing
        && let (Some(cursor), Some(canvas)) = (input.cursor, input.canvas)
        && draw_state.last_cursor != Some(cursor)
    {
        draw_state.last_cursor = Some(cursor);
        recorder.on_sample_move(cursor, &canvas);
    }

    if input.just_released && draw_state.is_drawing {
        finish_gesture(draw_state, recorder, store, color);
    }
}

fn finish_gesture(
    draw_state: &mut DrawState,
    recorder: &mut StrokeRecorder,
    store: &mut AnnotationStore,
    color: Color,
) {
    draw_state.reset();
    if let Some(annotation) = recorder.on_gesture_end(color) {
        debug!(
            "Finished {} {} with {} point(s)",
            if annotation.is_dot() { "dot" } else { "stroke" },
            annotation.id(),
            annotation.points().len()
        );
        store.add(annotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::GestureState;

    struct Session {
        draw_state: DrawState,
        recorder: StrokeRecorder,
        store: AnnotationStore,
    }

    impl Session {
        fn new() -> Self {
            Self {
                draw_state: DrawState::default(),
                recorder: StrokeRecorder::default(),
                store: AnnotationStore::default(),
            }
        }

        fn frame(&mut self, input: PointerFrame) {
            step_gesture(
                &input,
                &mut self.draw_state,
                &mut self.recorder,
                &mut self.store,
                Color::BLACK,
            );
        }
    }

    fn canvas() -> Option<CanvasFrame> {
        CanvasFrame::fit(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0))
    }

    fn press(x: f32, y: f32) -> PointerFrame {
        PointerFrame {
            just_pressed: true,
            pressed: true,
            cursor: Some(Vec2::new(x, y)),
            canvas: canvas(),
            ..default()
        }
    }

    fn hold(x: f32, y: f32) -> PointerFrame {
        PointerFrame {
            pressed: true,
            cursor: Some(Vec2::new(x, y)),
            canvas: canvas(),
            ..default()
        }
    }

    fn release(x: f32, y: f32) -> PointerFrame {
        PointerFrame {
            just_released: true,
            cursor: Some(Vec2::new(x, y)),
            canvas: canvas(),
            ..default()
        }
    }

    fn tap(x: f32, y: f32) -> PointerFrame {
        PointerFrame {
            just_pressed: true,
            just_released: true,
            cursor: Some(Vec2::new(x, y)),
            canvas: canvas(),
            ..default()
        }
    }

    #[test]
    fn test_drag_becomes_stroke() {
        let mut session = Session::new();
        session.frame(press(10.0, 10.0));
        session.frame(hold(20.0, 10.0));
        session.frame(hold(30.0, 10.0));
        session.frame(release(30.0, 10.0));

        assert_eq!(session.store.len(), 1);
        let stroke = &session.store.committed()[0];
        assert!(!stroke.is_dot());
        assert_eq!(stroke.points().len(), 3);
        assert!(!session.draw_state.is_drawing);
        assert_eq!(session.recorder.state(), GestureState::Idle);
    }

    #[test]
    fn test_same_frame_tap_is_a_dot() {
        let mut session = Session::new();
        session.frame(tap(40.0, 40.0));

        assert_eq!(session.store.len(), 1);
        assert!(session.store.committed()[0].is_dot());
        assert!(!session.draw_state.is_drawing);
        assert_eq!(session.recorder.state(), GestureState::Idle);
    }

    #[test]
    fn test_drag_after_same_frame_tap_is_separate() {
        let mut session = Session::new();
        session.frame(tap(40.0, 40.0));
        session.frame(PointerFrame::default());
        session.frame(press(10.0, 10.0));
        session.frame(hold(20.0, 20.0));
        session.frame(hold(30.0, 30.0));
        session.frame(release(30.0, 30.0));

        let committed = session.store.committed();
        assert_eq!(committed.len(), 2);
        assert!(committed[0].is_dot());
        assert_eq!(committed[0].anchor(), Vec2::new(40.0, 40.0));
        assert!(!committed[1].is_dot());
        assert_eq!(committed[1].points()[0], Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_held_stationary_press_stays_a_dot() {
        let mut session = Session::new();
        session.frame(press(50.0, 50.0));
        for _ in 0..30 {
            session.frame(hold(50.0, 50.0));
        }
        session.frame(release(50.0, 50.0));

        assert_eq!(session.store.len(), 1);
        let dot = &session.store.committed()[0];
        assert!(dot.is_dot());
        assert_eq!(dot.points().len(), 1);
    }

    #[test]
    fn test_release_over_ui_finalizes() {
        let mut session = Session::new();
        session.frame(press(10.0, 10.0));
        session.frame(hold(20.0, 10.0));
        session.frame(hold(30.0, 10.0));
        // Cursor left the window and the canvas has no frame this tick
        session.frame(PointerFrame {
            just_released: true,
            blocked: true,
            ..default()
        });

        assert_eq!(session.store.len(), 1);
        assert!(!session.store.committed()[0].is_dot());
        assert!(!session.draw_state.is_drawing);
    }

    #[test]
    fn test_press_while_blocked_is_ignored() {
        let mut session = Session::new();
        session.frame(PointerFrame {
            blocked: true,
            ..press(10.0, 10.0)
        });
        session.frame(hold(20.0, 20.0));
        session.frame(release(20.0, 20.0));

        assert!(session.store.is_empty());
        assert_eq!(session.recorder.state(), GestureState::Idle);
    }

    #[test]
    fn test_new_press_drops_stale_gesture() {
        let mut session = Session::new();
        session.frame(press(10.0, 10.0));
        session.frame(hold(20.0, 20.0));
        // The release never arrived, so the next press starts over
        session.frame(press(60.0, 60.0));
        session.frame(release(60.0, 60.0));

        let committed = session.store.committed();
        assert_eq!(committed.len(), 1);
        assert!(committed[0].is_dot());
        assert_eq!(committed[0].anchor(), Vec2::new(60.0, 60.0));
    }

    #[test]
    fn test_release_and_press_in_one_frame_keeps_both() {
        let mut session = Session::new();
        session.frame(press(10.0, 10.0));
        session.frame(hold(20.0, 20.0));
        session.frame(hold(30.0, 30.0));
        session.frame(PointerFrame {
            just_released: true,
            ..press(70.0, 70.0)
        });
        session.frame(release(70.0, 70.0));

        let committed = session.store.committed();
        assert_eq!(committed.len(), 2);
        assert!(!committed[0].is_dot());
        assert!(committed[1].is_dot());
        assert_eq!(committed[1].anchor(), Vec2::new(70.0, 70.0));
    }
}
