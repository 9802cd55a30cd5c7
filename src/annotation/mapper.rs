//! Aspect-fit geometry between the viewport and the loaded image.
//!
//! The image is scaled to fit the container without cropping, so it occupies a
//! centered sub-rectangle (the drawable area) with letterbox bars above and
//! below or pillarbox bars to the left and right. Pointer samples arrive in
//! container coordinates (origin top-left, y down) and are gated against that
//! rectangle before being converted into image pixels.

use bevy::prelude::*;

use super::model::Point;

/// Compute the rectangle of `container_size` covered by an image of
/// `image_size` scaled to fit while preserving its aspect ratio.
///
/// Returns `None` when either size is not strictly positive, which is how
/// callers learn that drawing must stay disabled.
pub fn drawable_area(image_size: Vec2, container_size: Vec2) -> Option<Rect> {
    if !is_positive(image_size) || !is_positive(container_size) {
        return None;
    }

    let image_aspect = image_size.x / image_size.y;
    let container_aspect = container_size.x / container_size.y;

    let (origin, size) = if image_aspect > container_aspect {
        // Relatively wider: full width, centered vertically
        let height = container_size.x / image_aspect;
        let y_offset = (container_size.y - height) / 2.0;
        (Vec2::new(0.0, y_offset), Vec2::new(container_size.x, height))
    } else {
        // Relatively taller (or equal): full height, centered horizontally
        let width = container_size.y * image_aspect;
        let x_offset = (container_size.x - width) / 2.0;
        (Vec2::new(x_offset, 0.0), Vec2::new(width, container_size.y))
    };

    Some(Rect::from_corners(origin, origin + size))
}

/// Rectangle containment, inclusive of the boundary.
pub fn is_inside(point: Vec2, rect: Rect) -> bool {
    point.x >= rect.min.x && point.x <= rect.max.x && point.y >= rect.min.y && point.y <= rect.max.y
}

/// Viewport pixels per image pixel for a given drawable area.
pub fn display_scale(area: Rect, image_size: Vec2) -> f32 {
    if image_size.x <= 0.0 {
        return 1.0;
    }
    area.width() / image_size.x
}

/// Map a container point inside `area` into image pixel coordinates.
pub fn to_drawing_space(point: Vec2, area: Rect, image_size: Vec2) -> Point {
    let size = area.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    (point - area.min) * (image_size / size)
}

/// Inverse of [`to_drawing_space`]: image pixels back to container coordinates.
pub fn to_viewport(point: Point, area: Rect, image_size: Vec2) -> Vec2 {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return area.min;
    }
    area.min + point * (area.size() / image_size)
}

/// The drawable area paired with the image it displays.
///
/// Bundles the two inputs every conversion needs so the recorder and the
/// renderer cannot disagree about which layout they are working against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    pub area: Rect,
    pub image_size: Vec2,
}

impl CanvasFrame {
    /// Fit `image_size` into `container_size`, or `None` if drawing is disabled.
    pub fn fit(image_size: Vec2, container_size: Vec2) -> Option<Self> {
        drawable_area(image_size, container_size).map(|area| Self { area, image_size })
    }

    pub fn contains(&self, point: Vec2) -> bool {
        is_inside(point, self.area)
    }

    pub fn to_drawing_space(&self, point: Vec2) -> Point {
        to_drawing_space(point, self.area, self.image_size)
    }

    pub fn to_viewport(&self, point: Point) -> Vec2 {
        to_viewport(point, self.area, self.image_size)
    }

    pub fn scale(&self) -> f32 {
        display_scale(self.area, self.image_size)
    }
}

fn is_positive(size: Vec2) -> bool {
    size.x > 0.0 && size.y > 0.0 && size.is_finite()
}
