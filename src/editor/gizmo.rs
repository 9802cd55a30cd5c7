//! Custom gizmo group for annotations.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use crate::constants::STROKE_WIDTH;

/// Custom gizmo group for annotations
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct AnnotationGizmoGroup;

/// Configure the annotation gizmo group with the fixed stroke width
pub fn configure_annotation_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<AnnotationGizmoGroup>();
    config.line.width = STROKE_WIDTH;
}
