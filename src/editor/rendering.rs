//! Gizmo rendering for committed annotations and the live preview.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::annotation::{AnnotationStore, CanvasFrame, GestureState, Point, StrokeRecorder};
use crate::constants::{DOT_RADIUS, STROKE_WIDTH};

use super::canvas::{Background, CanvasLayout};
use super::gizmo::AnnotationGizmoGroup;
use super::params::CameraParams;
use super::state::AnnotationSettings;

/// Radii of concentric rings that, drawn with `line_width`, fill a disc of `radius`
pub fn dot_ring_radii(radius: f32, line_width: f32) -> Vec<f32> {
    let step = (line_width / 2.0).max(0.1);
    let mut radii = Vec::new();
    let mut r = radius - step;
    while r > 0.0 {
        radii.push(r);
        r -= step;
    }
    if radii.is_empty() {
        radii.push(radius.max(step) / 2.0);
    }
    radii
}

fn to_world(camera: &CameraParams, frame: &CanvasFrame, point: Point) -> Option<Vec2> {
    camera.viewport_to_world(frame.to_viewport(point))
}

fn draw_dot(gizmos: &mut Gizmos<AnnotationGizmoGroup>, center: Vec2, color: Color) {
    for r in dot_ring_radii(DOT_RADIUS, STROKE_WIDTH) {
        gizmos.circle_2d(Isometry2d::from_translation(center), r, color);
    }
}

fn draw_polyline(
    gizmos: &mut Gizmos<AnnotationGizmoGroup>,
    camera: &CameraParams,
    frame: &CanvasFrame,
    points: &[Point],
    color: Color,
) {
    let world: Vec<Vec2> = points
        .iter()
        .filter_map(|p| to_world(camera, frame, *p))
        .collect();
    gizmos.linestrip_2d(world, color);
}

pub fn render_annotations(
    mut gizmos: Gizmos<AnnotationGizmoGroup>,
    store: Res<AnnotationStore>,
    background: Res<Background>,
    layout: Res<CanvasLayout>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera: CameraParams,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(frame) = layout.frame(window, &background) else {
        return;
    };

    // Oldest first so later strokes land on top
    for annotation in store.committed() {
        if annotation.is_dot() {
            if let Some(center) = to_world(&camera, &frame, annotation.anchor()) {
                draw_dot(&mut gizmos, center, annotation.color());
            }
        } else {
            draw_polyline(
                &mut gizmos,
                &camera,
                &frame,
                annotation.points(),
                annotation.color(),
            );
        }
    }
}

pub fn render_draw_preview(
    mut gizmos: Gizmos<AnnotationGizmoGroup>,
    recorder: Res<StrokeRecorder>,
    settings: Res<AnnotationSettings>,
    background: Res<Background>,
    layout: Res<CanvasLayout>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera: CameraParams,
) {
    if recorder.state() == GestureState::Idle {
        return;
    }
    let points = recorder.points();

    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(frame) = layout.frame(window, &background) else {
        return;
    };

    if points.len() == 1 {
        if let Some(center) = to_world(&camera, &frame, points[0]) {
            draw_dot(&mut gizmos, center, settings.stroke_color);
        }
    } else {
        draw_polyline(&mut gizmos, &camera, &frame, points, settings.stroke_color);
    }
}
