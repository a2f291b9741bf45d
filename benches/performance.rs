use annoview::class_colors::ClassPalette;
use annoview::viewer::hit_test::hit_test;
use annoview::viewer::loader::to_color_image;
use annoview::viewer::render::{render_frame, ActiveImage, FrameInput, Surface};
use annoview::viewer::transform::ViewportTransform;
use annoview::Annotation;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use egui::{Color32, Pos2, Rect, Stroke, TextureId, Vec2};
use image::DynamicImage;

/// Counts draw calls without touching a GPU.
#[derive(Default)]
struct CountingSurface {
    strokes: usize,
    images: usize,
}

impl Surface for CountingSurface {
    fn resize(&mut self, _size: Vec2) {}
    fn clear(&mut self) {
        self.strokes = 0;
        self.images = 0;
    }
    fn draw_image(&mut self, _texture: TextureId, _rect: Rect) {
        self.images += 1;
    }
    fn stroke_rect(&mut self, _rect: Rect, _stroke: Stroke) {
        self.strokes += 1;
    }
    fn draw_message(&mut self, _text: &str, _color: Color32) {}
}

fn grid_annotations(per_side: usize) -> Vec<Annotation> {
    let step = 1.0 / per_side as f32;
    (0..per_side * per_side)
        .map(|i| {
            let x = (i % per_side) as f32 * step + step / 2.0;
            let y = (i / per_side) as f32 * step + step / 2.0;
            Annotation::new((i % 5) as i64, x, y, step * 0.8, step * 0.8)
        })
        .collect()
}

fn bench_hit_test(c: &mut Criterion) {
    let annotations = grid_annotations(30);
    let size = Vec2::new(4000.0, 3000.0);

    c.bench_function("hit_test_900_boxes_miss", |b| {
        b.iter(|| hit_test(black_box(&annotations), size, black_box(Pos2::new(-5.0, -5.0))))
    });
    c.bench_function("hit_test_900_boxes_last", |b| {
        b.iter(|| hit_test(black_box(&annotations), size, black_box(Pos2::new(3950.0, 2950.0))))
    });
}

fn bench_render_frame(c: &mut Criterion) {
    let annotations = grid_annotations(30);
    let palette = ClassPalette::default();
    let mut surface = CountingSurface::default();

    c.bench_function("render_frame_900_boxes", |b| {
        b.iter(|| {
            render_frame(
                &mut surface,
                &FrameInput {
                    image: Some(ActiveImage {
                        texture: TextureId::Managed(1),
                        size: Vec2::new(4000.0, 3000.0),
                    }),
                    error: None,
                    annotations: black_box(&annotations),
                    transform: ViewportTransform {
                        scale: 1.7,
                        translate: Vec2::new(-300.0, -120.0),
                    },
                    palette: &palette,
                    stroke_width: 20.0,
                    pixels_per_point: 2.0,
                },
            );
            black_box(surface.strokes)
        })
    });
}

fn bench_color_image_conversion(c: &mut Criterion) {
    let test_image = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(1920, 1080, image::Rgba([128, 128, 128, 255])));

    c.bench_function("to_color_image_1920x1080", |b| {
        b.iter(|| to_color_image(black_box(&test_image)))
    });
}

criterion_group!(benches, bench_hit_test, bench_render_frame, bench_color_image_conversion);
criterion_main!(benches);
