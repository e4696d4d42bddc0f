//! Integration tests for silica-skia: pixels produced through a GraphicsContext.

use rstest::rstest;
use silica_graphics::{
    BackendStatus, Color, FillRule, GraphicsContext, Image, Point, Rect, Size,
};
use silica_skia::SkiaBackend;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn context(width: u32, height: u32) -> GraphicsContext<SkiaBackend> {
    init_logger();
    SkiaBackend::new_context(width, height).unwrap()
}

fn pixel(ctx: &GraphicsContext<SkiaBackend>, x: u32, y: u32) -> [u8; 4] {
    ctx.backend().pixel(x, y).unwrap()
}

fn assert_close(actual: u8, expected: u8) {
    assert!(
        (actual as i32 - expected as i32).abs() <= 1,
        "{actual} is not within 1 of {expected}"
    );
}

const RED: [u8; 4] = [255, 0, 0, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

/// Test creating a surface and filling a rectangle.
#[test]
fn test_fill_rect() {
    let mut ctx = context(200, 200);
    ctx.set_fill_color(Color::RED);
    ctx.fill_rect(Rect::new(10.0, 10.0, 100.0, 100.0)).unwrap();

    assert_eq!(pixel(&ctx, 50, 50), RED);
    assert_eq!(pixel(&ctx, 5, 5), CLEAR);
    assert_eq!(pixel(&ctx, 150, 150), CLEAR);
}

#[rstest]
#[case(0, 10)]
#[case(40000, 10)]
fn test_invalid_size(#[case] width: u32, #[case] height: u32) {
    let Err(err) = SkiaBackend::new_context(width, height) else {
        panic!("{width}x{height} surface should be rejected");
    };
    assert_eq!(err.status, BackendStatus::InvalidSize);
}

/// Test path operations.
#[test]
fn test_path_operations() {
    let mut ctx = context(100, 100);
    ctx.set_fill_color(Color::GREEN);
    ctx.move_to(Point::new(10.0, 10.0));
    ctx.add_line(Point::new(90.0, 10.0));
    ctx.add_line(Point::new(90.0, 90.0));
    ctx.add_line(Point::new(10.0, 90.0));
    ctx.close_path();
    ctx.fill_path(FillRule::Winding).unwrap();

    assert_eq!(pixel(&ctx, 50, 50), [0, 255, 0, 255]);
    assert!(ctx.is_path_empty());
}

/// Test stroke operations.
#[test]
fn test_stroke_operations() {
    let mut ctx = context(100, 100);
    ctx.set_stroke_color(Color::BLUE);
    ctx.set_line_width(2.0);
    ctx.move_to(Point::new(10.0, 50.0));
    ctx.add_line(Point::new(90.0, 50.0));
    ctx.stroke_path().unwrap();

    assert_eq!(pixel(&ctx, 50, 50), [0, 0, 255, 255]);
    assert_eq!(pixel(&ctx, 50, 49), [0, 0, 255, 255]);
    assert_eq!(pixel(&ctx, 50, 45), CLEAR);
}

/// Line widths are in user space and scale with the transform.
#[test]
fn test_stroke_width_scales_with_transform() {
    let mut ctx = context(100, 100);
    ctx.scale(2.0, 2.0).unwrap();
    ctx.set_stroke_color(Color::BLUE);
    ctx.set_line_width(4.0);
    ctx.move_to(Point::new(5.0, 25.0));
    ctx.add_line(Point::new(45.0, 25.0));
    ctx.stroke_path().unwrap();

    // Device-space line at y = 50, 8 pixels wide.
    assert_eq!(pixel(&ctx, 50, 46)[3], 255);
    assert_eq!(pixel(&ctx, 50, 53)[3], 255);
    assert_eq!(pixel(&ctx, 50, 56)[3], 0);
}

/// Test save/restore state.
#[test]
fn test_save_restore_state() {
    let mut ctx = context(100, 100);
    ctx.set_fill_color(Color::RED);
    ctx.save().unwrap();
    ctx.set_fill_color(Color::GREEN);
    ctx.fill_rect(Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
    ctx.restore().unwrap();
    ctx.fill_rect(Rect::new(50.0, 50.0, 50.0, 50.0)).unwrap();

    assert_eq!(pixel(&ctx, 25, 25), [0, 255, 0, 255]);
    assert_eq!(pixel(&ctx, 75, 75), RED);
}

/// Test transforms.
#[test]
fn test_transforms() {
    let mut ctx = context(100, 100);
    ctx.translate(50.0, 50.0).unwrap();
    ctx.set_fill_color(Color::RED);
    ctx.fill_rect(Rect::new(-10.0, -10.0, 20.0, 20.0)).unwrap();

    assert_eq!(pixel(&ctx, 50, 50), RED);
    assert_eq!(pixel(&ctx, 45, 45), RED);
    assert_eq!(pixel(&ctx, 30, 30), CLEAR);
}

#[test]
fn test_clip_to_rect_restored() {
    let mut ctx = context(100, 100);
    ctx.set_fill_color(Color::RED);
    ctx.save().unwrap();
    ctx.clip_to_rect(Rect::new(0.0, 0.0, 50.0, 100.0)).unwrap();
    ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0)).unwrap();
    ctx.restore().unwrap();
    ctx.fill_rect(Rect::new(0.0, 50.0, 100.0, 50.0)).unwrap();

    assert_eq!(pixel(&ctx, 25, 25), RED);
    assert_eq!(pixel(&ctx, 75, 25), CLEAR);
    assert_eq!(pixel(&ctx, 75, 75), RED);
}

#[test]
fn test_nested_clips_intersect() {
    let mut ctx = context(100, 100);
    ctx.clip_to_rect(Rect::new(0.0, 0.0, 60.0, 100.0)).unwrap();
    ctx.clip_to_rect(Rect::new(40.0, 0.0, 60.0, 100.0)).unwrap();
    ctx.set_fill_color(Color::RED);
    ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();

    assert_eq!(pixel(&ctx, 50, 50), RED);
    assert_eq!(pixel(&ctx, 20, 50), CLEAR);
    assert_eq!(pixel(&ctx, 80, 50), CLEAR);
}

#[test]
fn test_clip_with_empty_path_hides_everything() {
    let mut ctx = context(20, 20);
    ctx.begin_path();
    ctx.clip(FillRule::Winding).unwrap();
    ctx.set_fill_color(Color::RED);
    ctx.fill_rect(Rect::new(0.0, 0.0, 20.0, 20.0)).unwrap();

    assert!(ctx.backend().image_data().iter().all(|&b| b == 0));
}

#[test]
fn test_clear() {
    let mut ctx = context(100, 100);
    ctx.set_fill_color(Color::RED);
    ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
    ctx.clear(Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();

    assert_eq!(pixel(&ctx, 25, 25), CLEAR);
    assert_eq!(pixel(&ctx, 75, 75), RED);
}

#[test]
fn test_fill_ellipse() {
    let mut ctx = context(100, 100);
    ctx.set_fill_color(Color::RED);
    ctx.fill_ellipse(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();

    assert_eq!(pixel(&ctx, 50, 50), RED);
    assert_eq!(pixel(&ctx, 2, 2), CLEAR);
    assert_eq!(pixel(&ctx, 97, 97), CLEAR);
}

#[test]
fn test_alpha_applies_to_fill() {
    let mut ctx = context(10, 10);
    ctx.set_fill_color(Color::RED);
    ctx.set_alpha(0.5);
    ctx.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();

    let [r, _, _, a] = pixel(&ctx, 5, 5);
    assert_eq!(r, 255);
    assert_close(a, 128);
}

/// A hard-edged shadow lands at the offset, under the painted shape.
#[test]
fn test_shadow_offset() {
    let mut ctx = context(100, 100);
    ctx.set_shadow_with_color(Size::new(10.0, 10.0), 0.0, Color::BLACK);
    ctx.set_fill_color(Color::RED);
    ctx.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0)).unwrap();

    assert_eq!(pixel(&ctx, 15, 15), RED);
    assert_eq!(pixel(&ctx, 25, 25), RED);
    assert_eq!(pixel(&ctx, 35, 35), [0, 0, 0, 255]);
    assert_eq!(pixel(&ctx, 5, 5), CLEAR);
    assert_eq!(pixel(&ctx, 45, 45), CLEAR);
    assert_eq!(ctx.backend().group_depth(), 0);
}

#[test]
fn test_shadow_respects_clip() {
    let mut ctx = context(100, 100);
    ctx.clip_to_rect(Rect::new(0.0, 0.0, 32.0, 100.0)).unwrap();
    ctx.set_shadow_with_color(Size::new(10.0, 10.0), 2.0, Color::BLACK);
    ctx.set_fill_color(Color::RED);
    ctx.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0)).unwrap();

    assert_eq!(pixel(&ctx, 31, 35), [0, 0, 0, 255]);
    assert_eq!(pixel(&ctx, 35, 35), CLEAR);
}

/// Overlapping shapes inside a layer composite as one at the outer alpha.
#[test]
fn test_transparency_layer_composites_uniformly() {
    let mut ctx = context(100, 100);
    ctx.set_alpha(0.5);
    ctx.begin_transparency_layer(None).unwrap();
    ctx.set_fill_color(Color::RED);
    ctx.fill_rect(Rect::new(10.0, 10.0, 40.0, 40.0)).unwrap();
    ctx.fill_rect(Rect::new(30.0, 30.0, 40.0, 40.0)).unwrap();
    ctx.end_transparency_layer().unwrap();

    let single = pixel(&ctx, 20, 20);
    let overlap = pixel(&ctx, 40, 40);
    assert_eq!(single, overlap);
    assert_close(overlap[3], 128);
    assert_eq!(ctx.alpha(), 0.5);
    assert_eq!(ctx.backend().group_depth(), 0);
}

#[test]
fn test_transparency_layer_rect_clips_only_the_layer() {
    let mut ctx = context(100, 100);
    ctx.set_fill_color(Color::RED);
    ctx.begin_transparency_layer(Some(Rect::new(0.0, 0.0, 50.0, 100.0)))
        .unwrap();
    ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0)).unwrap();
    ctx.end_transparency_layer().unwrap();
    ctx.fill_rect(Rect::new(0.0, 50.0, 100.0, 50.0)).unwrap();

    assert_eq!(pixel(&ctx, 25, 25), RED);
    assert_eq!(pixel(&ctx, 75, 25), CLEAR);
    assert_eq!(pixel(&ctx, 75, 75), RED);
}

#[test]
fn test_overlapping_fills_without_layer_accumulate() {
    let mut ctx = context(100, 100);
    ctx.set_alpha(0.5);
    ctx.set_fill_color(Color::RED);
    ctx.fill_rect(Rect::new(10.0, 10.0, 40.0, 40.0)).unwrap();
    ctx.fill_rect(Rect::new(30.0, 30.0, 40.0, 40.0)).unwrap();

    assert!(pixel(&ctx, 40, 40)[3] > pixel(&ctx, 20, 20)[3]);
}

#[test]
fn test_draw_image() {
    let mut ctx = context(50, 50);
    let blue = [0, 0, 255, 255].repeat(4);
    let image = Image::from_rgba(2, 2, blue).unwrap();
    ctx.draw_image(&image, Rect::new(10.0, 10.0, 20.0, 20.0)).unwrap();

    assert_eq!(pixel(&ctx, 20, 20), [0, 0, 255, 255]);
    assert_eq!(pixel(&ctx, 40, 40), CLEAR);

    ctx.set_alpha(0.5);
    ctx.clear(Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
    ctx.draw_image(&image, Rect::new(10.0, 10.0, 20.0, 20.0)).unwrap();
    assert_close(pixel(&ctx, 20, 20)[3], 128);
}
