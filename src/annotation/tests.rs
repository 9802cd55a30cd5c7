//! End-to-end tests for gesture capture feeding the store.

use bevy::prelude::*;

use super::history::AnnotationHistory;
use super::{Annotation, AnnotationStore, CanvasFrame, StrokeRecorder};

fn stroke(x: f32) -> Annotation {
    Annotation::from_gesture(
        vec![Vec2::new(x, 0.0), Vec2::new(x, 1.0), Vec2::new(x, 2.0)],
        Color::BLACK,
        2,
    )
    .unwrap()
}

#[test]
fn test_add_undo_add_loses_redo_branch() {
    let mut history = AnnotationHistory::default();
    let a = stroke(1.0);
    let b = stroke(2.0);
    let c = stroke(3.0);

    history.add(a.clone());
    history.add(b.clone());
    assert_eq!(history.committed(), &[a.clone(), b.clone()]);
    assert!(history.pending_redo().is_empty());

    history.undo();
    assert_eq!(history.committed(), &[a.clone()]);
    assert_eq!(history.pending_redo(), &[b.clone()]);

    history.add(c.clone());
    assert_eq!(history.committed(), &[a.clone(), c.clone()]);
    assert!(history.pending_redo().is_empty());

    // B is gone for good
    assert!(history.redo().is_none());
    assert_eq!(history.committed(), &[a, c]);
}

#[test]
fn test_gesture_with_rejected_sample_commits_dot() {
    let frame = CanvasFrame::fit(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0)).unwrap();
    let mut recorder = StrokeRecorder::default();
    let mut store = AnnotationStore::default();

    recorder.on_sample_start(Vec2::new(5.0, 5.0), &frame);
    recorder.on_sample_move(Vec2::new(200.0, 5.0), &frame);
    if let Some(annotation) = recorder.on_gesture_end(Color::BLACK) {
        store.add(annotation);
    }

    assert_eq!(store.len(), 1);
    let committed = &store.committed()[0];
    assert!(committed.is_dot());
    assert_eq!(committed.points().len(), 1);
}

#[test]
fn test_color_change_after_commit_does_not_recolor() {
    let frame = CanvasFrame::fit(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0)).unwrap();
    let mut recorder = StrokeRecorder::default();
    let mut store = AnnotationStore::default();
    let red = Color::srgb(1.0, 0.0, 0.0);
    let mut active_color = red;

    recorder.on_sample_start(Vec2::new(1.0, 1.0), &frame);
    store.add(recorder.on_gesture_end(active_color).unwrap());
    active_color = Color::srgb(0.0, 1.0, 0.0);

    assert_eq!(store.committed()[0].color(), red);
    assert_ne!(store.committed()[0].color(), active_color);
}

#[test]
fn test_empty_gesture_leaves_history_untouched() {
    let frame = CanvasFrame::fit(Vec2::new(100.0, 50.0), Vec2::new(100.0, 100.0)).unwrap();
    let mut recorder = StrokeRecorder::default();
    let mut store = AnnotationStore::default();
    store.add(stroke(1.0));
    store.undo();

    // Samples only in the letterbox bar above the image
    recorder.on_sample_start(Vec2::new(50.0, 5.0), &frame);
    recorder.on_sample_move(Vec2::new(60.0, 10.0), &frame);
    assert!(recorder.on_gesture_end(Color::BLACK).is_none());

    // The redo branch survives because nothing was added
    assert!(store.can_redo());
}

#[test]
fn test_strokes_survive_resize() {
    let image = Vec2::new(640.0, 480.0);
    let before = CanvasFrame::fit(image, Vec2::new(800.0, 600.0)).unwrap();
    let after = CanvasFrame::fit(image, Vec2::new(1200.0, 600.0)).unwrap();

    let mut recorder = StrokeRecorder::default();
    recorder.on_sample_start(Vec2::new(400.0, 300.0), &before);
    let annotation = recorder.on_gesture_end(Color::BLACK).unwrap();

    // Image center stays at the container center after the window widens
    let shown = after.to_viewport(annotation.anchor());
    assert!((shown - Vec2::new(600.0, 300.0)).length() < 1e-3);
}
