//! Normalized bounding-box annotations as delivered by the detection backend.

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a detected object: a display name or an integer class code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectClass {
    Code(i64),
    Name(String),
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectClass::Code(code) => write!(f, "{}", code),
            ObjectClass::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for ObjectClass {
    fn from(name: &str) -> Self {
        ObjectClass::Name(name.to_string())
    }
}

impl From<i64> for ObjectClass {
    fn from(code: i64) -> Self {
        ObjectClass::Code(code)
    }
}

/// One detected object. Geometry is normalized to the image size; nothing
/// here validates the range, so boxes outside [0,1] are drawn as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(alias = "label")]
    pub object_class: ObjectClass,
    #[serde(alias = "x")]
    pub x_center: f32,
    #[serde(alias = "y")]
    pub y_center: f32,
    #[serde(alias = "w")]
    pub width: f32,
    #[serde(alias = "h")]
    pub height: f32,
    #[serde(default, alias = "prob", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Annotation {
    pub fn new(
        object_class: impl Into<ObjectClass>,
        x_center: f32,
        y_center: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            object_class: object_class.into(),
            x_center,
            y_center,
            width,
            height,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Rectangle in image space (pixels of the image with the given size).
    pub fn image_rect(&self, image_size: Vec2) -> Rect {
        let min = Pos2::new(
            (self.x_center - self.width / 2.0) * image_size.x,
            (self.y_center - self.height / 2.0) * image_size.y,
        );
        Rect::from_min_size(
            min,
            Vec2::new(self.width * image_size.x, self.height * image_size.y),
        )
    }

    /// Edge-inclusive containment test against an image-space point.
    pub fn contains(&self, image_size: Vec2, point: Pos2) -> bool {
        let rect = self.image_rect(image_size);
        point.x >= rect.min.x
            && point.x <= rect.max.x
            && point.y >= rect.min.y
            && point.y <= rect.max.y
    }

    /// Whether the box lies fully inside the image. Informational only:
    /// boxes that overflow are still drawn unclamped.
    pub fn is_within_image(&self) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        self.x_center - half_w >= 0.0
            && self.x_center + half_w <= 1.0
            && self.y_center - half_h >= 0.0
            && self.y_center + half_h <= 1.0
    }

    pub fn tooltip_text(&self) -> String {
        match self.confidence {
            Some(p) => format!("{} ({:.0}%)", self.object_class, p * 100.0),
            None => self.object_class.to_string(),
        }
    }
}
