//! Rasterizes annotations onto a copy of the background image.
//!
//! Everything here works in image pixels. Strokes are round-capped,
//! round-joined polylines and dots are filled circles, drawn anti-aliased
//! with source-over blending.

use image::RgbaImage;
use std::path::{Path, PathBuf};
use tiny_skia::{
    ColorU8, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

use crate::annotation::Annotation;
use crate::constants::{DOT_RADIUS, STROKE_WIDTH};
use crate::theme::color_to_rgba8;

/// Thinnest stroke that still leaves a visible mark
const MIN_WIDTH: f32 = 1.0;

/// Stroke geometry in image pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub dot_radius: f32,
}

impl StrokeStyle {
    /// Matches what is on screen when the image is shown at `scale`
    /// viewport pixels per image pixel
    pub fn for_scale(scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            width: STROKE_WIDTH / scale,
            dot_radius: DOT_RADIUS / scale,
        }
    }
}

fn image_to_pixmap(image: &RgbaImage) -> Result<Pixmap, String> {
    let mut pixmap = Pixmap::new(image.width(), image.height()).ok_or_else(|| {
        format!(
            "Cannot allocate a {}x{} canvas",
            image.width(),
            image.height()
        )
    })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Ok(pixmap)
}

fn pixmap_to_image(pixmap: &Pixmap) -> Result<RgbaImage, String> {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or_else(|| "Flattened canvas has an unexpected size".to_string())
}

fn draw_annotation(pixmap: &mut Pixmap, annotation: &Annotation, style: StrokeStyle) {
    let [r, g, b, a] = color_to_rgba8(annotation.color());
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let points = annotation.points();
    if annotation.is_dot() || points.len() == 1 {
        let center = annotation.anchor();
        let radius = style.dot_radius.max(MIN_WIDTH / 2.0);
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        return;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(points[0].x, points[0].y);
    for point in &points[1..] {
        pb.line_to(point.x, point.y);
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let stroke = Stroke {
        width: style.width.max(MIN_WIDTH),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Background with every annotation drawn on top, oldest first
pub fn flatten(
    background: &RgbaImage,
    annotations: &[Annotation],
    style: StrokeStyle,
) -> Result<RgbaImage, String> {
    let mut pixmap = image_to_pixmap(background)?;
    for annotation in annotations {
        draw_annotation(&mut pixmap, annotation, style);
    }
    pixmap_to_image(&pixmap)
}

/// Exports are always PNG regardless of what the user typed
pub fn with_png_extension(path: &Path) -> PathBuf {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

pub fn write_png(image: &RgbaImage, path: &Path) -> Result<(), String> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DOT_SAMPLE_LIMIT;
    use bevy::prelude::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(20, 20, WHITE)
    }

    fn annotation(points: &[(f32, f32)], color: Color) -> Annotation {
        let points = points.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        Annotation::from_gesture(points, color, DOT_SAMPLE_LIMIT).unwrap()
    }

    fn is_near(pixel: &Rgba<u8>, expected: [u8; 4]) -> bool {
        pixel
            .0
            .iter()
            .zip(expected)
            .all(|(a, b)| (*a as i16 - b as i16).abs() <= 3)
    }

    #[test]
    fn test_no_annotations_is_a_copy() {
        let out = flatten(&canvas(), &[], StrokeStyle::for_scale(1.0)).unwrap();
        assert_eq!(out, canvas());
    }

    #[test]
    fn test_dot_fills_around_anchor() {
        let dot = annotation(&[(10.0, 10.0)], Color::BLACK);
        let out = flatten(&canvas(), &[dot], StrokeStyle::for_scale(1.0)).unwrap();

        assert!(is_near(out.get_pixel(10, 10), [0, 0, 0, 255]));
        assert!(is_near(out.get_pixel(9, 9), [0, 0, 0, 255]));
        assert_eq!(out.get_pixel(15, 10), &WHITE);
        assert_eq!(out.get_pixel(0, 0), &WHITE);
    }

    #[test]
    fn test_stroke_covers_path_only() {
        let red = Color::srgb(1.0, 0.0, 0.0);
        let stroke = annotation(&[(2.0, 5.0), (10.0, 5.0), (18.0, 5.0)], red);
        let out = flatten(&canvas(), &[stroke], StrokeStyle::for_scale(1.0)).unwrap();

        for x in 3..17 {
            let pixel = out.get_pixel(x, 4);
            assert!(is_near(pixel, [255, 0, 0, 255]), "x = {}: {:?}", x, pixel);
        }
        assert_eq!(out.get_pixel(10, 10), &WHITE);
        assert_eq!(out.get_pixel(10, 0), &WHITE);
    }

    #[test]
    fn test_later_annotations_draw_on_top() {
        let first = annotation(&[(10.0, 10.0)], Color::BLACK);
        let second = annotation(&[(10.0, 10.0)], Color::srgb(0.0, 0.0, 1.0));
        let out = flatten(&canvas(), &[first, second], StrokeStyle::for_scale(1.0)).unwrap();
        assert!(is_near(out.get_pixel(10, 10), [0, 0, 255, 255]));
    }

    #[test]
    fn test_translucent_stroke_blends_once() {
        let half = Color::srgba(0.0, 0.0, 0.0, 0.5);
        // Doubling back over the same pixels must not darken them twice
        let stroke = annotation(&[(2.0, 10.0), (18.0, 10.0), (2.0, 10.0)], half);
        let out = flatten(&canvas(), &[stroke], StrokeStyle::for_scale(1.0)).unwrap();
        let pixel = out.get_pixel(10, 10);
        assert!((120..=135).contains(&pixel[0]), "got {:?}", pixel);
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn test_transparent_background_keeps_straight_alpha() {
        let clear = RgbaImage::new(20, 20);
        let dot = annotation(&[(10.0, 10.0)], Color::srgb(1.0, 0.0, 0.0));
        let out = flatten(&clear, &[dot], StrokeStyle::for_scale(1.0)).unwrap();
        assert!(is_near(out.get_pixel(10, 10), [255, 0, 0, 255]));
        assert_eq!(out.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_points_outside_image_are_clipped() {
        let stroke = annotation(&[(-5.0, -5.0), (-1.0, -1.0), (30.0, -3.0)], Color::BLACK);
        let out = flatten(&canvas(), &[stroke], StrokeStyle::for_scale(1.0)).unwrap();
        assert_eq!(out.dimensions(), (20, 20));
    }

    #[test]
    fn test_long_stroke_on_large_image() {
        let photo = RgbaImage::from_pixel(2000, 1500, WHITE);
        let points: Vec<(f32, f32)> = (0..500)
            .map(|i| (i as f32 * 4.0, i as f32 * 3.0))
            .collect();
        let stroke = annotation(&points, Color::BLACK);
        let out = flatten(&photo, &[stroke], StrokeStyle::for_scale(1.0)).unwrap();
        assert!(is_near(out.get_pixel(1000, 750), [0, 0, 0, 255]));
        assert_eq!(out.get_pixel(1999, 0), &WHITE);
    }

    #[test]
    fn test_empty_image_is_an_error() {
        assert!(flatten(&RgbaImage::new(0, 0), &[], StrokeStyle::for_scale(1.0)).is_err());
    }

    #[test]
    fn test_style_follows_display_scale() {
        let style = StrokeStyle::for_scale(0.5);
        assert_eq!(style.width, STROKE_WIDTH * 2.0);
        assert_eq!(style.dot_radius, DOT_RADIUS * 2.0);

        assert_eq!(StrokeStyle::for_scale(0.0), StrokeStyle::for_scale(1.0));
    }

    #[test]
    fn test_png_extension_forced() {
        assert_eq!(
            with_png_extension(Path::new("/tmp/out.jpg")),
            PathBuf::from("/tmp/out.png")
        );
        assert_eq!(
            with_png_extension(Path::new("/tmp/out")),
            PathBuf::from("/tmp/out.png")
        );
        assert_eq!(
            with_png_extension(Path::new("/tmp/out.PNG")),
            PathBuf::from("/tmp/out.PNG")
        );
    }

    #[test]
    fn test_write_png_round_trip_file() {
        let path = std::env::temp_dir().join(format!("inkmark-export-{}.png", std::process::id()));
        let dot = annotation(&[(3.0, 3.0)], Color::BLACK);
        let out = flatten(&canvas(), &[dot], StrokeStyle::for_scale(1.0)).unwrap();
        write_png(&out, &path).unwrap();

        let reread = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reread, out);
        let _ = std::fs::remove_file(&path);
    }
}
