//! Full-frame draw pass: image plus annotation outlines.
//!
//! The pass is written against [`Surface`], which works in backing-store
//! coordinates. [`EguiSurface`] maps those onto a painter region; tests use
//! a recording surface.

use super::transform::{fit_rect, SurfaceGeometry, ViewportTransform};
use crate::annotation::Annotation;
use crate::class_colors::ClassPalette;
use egui::{Color32, CornerRadius, Pos2, Rect, Stroke, TextureId, Vec2};

pub trait Surface {
    /// Set the backing-store size (the active image's native size).
    fn resize(&mut self, size: Vec2);
    fn clear(&mut self);
    fn draw_image(&mut self, texture: TextureId, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);
    /// Centered status text; used for load failures.
    fn draw_message(&mut self, text: &str, color: Color32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveImage {
    pub texture: TextureId,
    pub size: Vec2,
}

pub struct FrameInput<'a> {
    pub image: Option<ActiveImage>,
    pub error: Option<&'a str>,
    pub annotations: &'a [Annotation],
    pub transform: ViewportTransform,
    pub palette: &'a ClassPalette,
    /// Outline width in backing pixels, independent of zoom
    pub stroke_width: f32,
    pub pixels_per_point: f32,
}

pub const ERROR_COLOR: Color32 = Color32::from_rgb(255, 100, 100);

pub fn render_frame<S: Surface + ?Sized>(surface: &mut S, frame: &FrameInput<'_>) {
    if let Some(error) = frame.error {
        surface.clear();
        surface.draw_message(&format!("Error: {}", error), ERROR_COLOR);
        return;
    }

    let Some(image) = frame.image else {
        surface.clear();
        return;
    };

    surface.resize(image.size);
    surface.clear();

    let transform = &frame.transform;
    let image_rect = Rect::from_min_size(Pos2::ZERO, image.size);
    surface.draw_image(image.texture, transform.image_rect_to_backing(image_rect));

    // Width in image units shrinks as scale grows, so the outline keeps
    // a constant thickness once scaled into the backing store.
    let image_line_width = frame.stroke_width / (transform.scale * frame.pixels_per_point);
    let line_width = image_line_width * transform.scale;

    for annotation in frame.annotations {
        let rect = transform.image_rect_to_backing(annotation.image_rect(image.size));
        let color = frame.palette.color_for(&annotation.object_class);
        surface.stroke_rect(rect, Stroke::new(line_width, color));
    }
}

/// Draws into an egui painter, fitting the backing store inside `region`.
pub struct EguiSurface {
    painter: egui::Painter,
    region: Rect,
    background: Color32,
    geometry: Option<SurfaceGeometry>,
}

impl EguiSurface {
    pub fn new(painter: egui::Painter, region: Rect, background: Color32) -> Self {
        Self {
            painter: painter.with_clip_rect(region),
            region,
            background,
            geometry: None,
        }
    }

    fn bounds(&self) -> Rect {
        self.geometry.map_or(self.region, |g| g.bounds)
    }
}

impl Surface for EguiSurface {
    fn resize(&mut self, size: Vec2) {
        let bounds = fit_rect(self.region, size);
        self.geometry = Some(SurfaceGeometry::new(bounds, size));
        self.painter.set_clip_rect(bounds);
    }

    fn clear(&mut self) {
        self.painter
            .rect_filled(self.bounds(), CornerRadius::ZERO, self.background);
    }

    fn draw_image(&mut self, texture: TextureId, rect: Rect) {
        let Some(geometry) = self.geometry else {
            return;
        };
        self.painter.image(
            texture,
            geometry.backing_rect_to_screen(rect),
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let screen_width = stroke.width / geometry.backing_per_screen().x;
        self.painter.rect_stroke(
            geometry.backing_rect_to_screen(rect),
            CornerRadius::ZERO,
            Stroke::new(screen_width, stroke.color),
            egui::StrokeKind::Middle,
        );
    }

    fn draw_message(&mut self, text: &str, color: Color32) {
        self.painter.text(
            self.bounds().center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(18.0),
            color,
        );
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Resize(Vec2),
        Clear,
        Image(TextureId, Rect),
        Stroke(Rect, Stroke),
        Message(String),
    }

    /// Surface that only remembers what was drawn.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        /// Operations since the most recent clear, i.e. the visible frame.
        pub fn last_frame(&self) -> &[Op] {
            let start = self.ops.iter().rposition(|op| *op == Op::Clear).unwrap_or(0);
            &self.ops[start..]
        }

        pub fn size(&self) -> Option<Vec2> {
            self.ops.iter().rev().find_map(|op| match op {
                Op::Resize(size) => Some(*size),
                _ => None,
            })
        }

        pub fn strokes(&self) -> Vec<(Rect, Stroke)> {
            self.last_frame()
                .iter()
                .filter_map(|op| match op {
                    Op::Stroke(rect, stroke) => Some((*rect, *stroke)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, size: Vec2) {
            self.ops.push(Op::Resize(size));
        }
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn draw_image(&mut self, texture: TextureId, rect: Rect) {
            self.ops.push(Op::Image(texture, rect));
        }
        fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
            self.ops.push(Op::Stroke(rect, stroke));
        }
        fn draw_message(&mut self, text: &str, _color: Color32) {
            self.ops.push(Op::Message(text.to_string()));
        }
    }
}
