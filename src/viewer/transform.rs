//! Viewport transform between image space, the surface backing store and
//! screen space.
//!
//! Image space has its origin at the top-left of the native image, in image
//! pixels. The backing store has the active image's native size; it is shown
//! stretched into an on-screen bounding rectangle. The forward transform
//! translates first and then scales, so `translate` is in unscaled image
//! units.

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 3.0,
            step: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub scale: f32,
    pub translate: Vec2,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::ZERO,
        }
    }
}

impl ViewportTransform {
    pub fn image_to_backing(&self, point: Pos2) -> Pos2 {
        ((point.to_vec2() + self.translate) * self.scale).to_pos2()
    }

    pub fn backing_to_image(&self, point: Pos2) -> Pos2 {
        (point.to_vec2() / self.scale - self.translate).to_pos2()
    }

    pub fn image_rect_to_backing(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.image_to_backing(rect.min), self.image_to_backing(rect.max))
    }

    /// Change the scale by `delta`, clamped to `limits`, keeping the
    /// viewport anchored on `center` (half the on-screen surface size).
    pub fn zoomed(self, delta: f32, limits: &ZoomLimits, center: Vec2) -> Self {
        let scale = (self.scale + delta).clamp(limits.min, limits.max);
        let ratio = scale / self.scale;
        Self {
            scale,
            translate: (self.translate - center) * ratio + center,
        }
    }

    pub fn zoom_in(self, limits: &ZoomLimits, center: Vec2) -> Self {
        self.zoomed(limits.step, limits, center)
    }

    pub fn zoom_out(self, limits: &ZoomLimits, center: Vec2) -> Self {
        self.zoomed(-limits.step, limits, center)
    }

    /// Pan by a pointer movement measured in screen pixels.
    pub fn panned(self, screen_delta: Vec2) -> Self {
        Self {
            scale: self.scale,
            translate: self.translate + screen_delta / self.scale,
        }
    }
}

/// Where the backing store sits on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// On-screen bounding rectangle of the surface
    pub bounds: Rect,
    /// Backing-store size in pixels (the active image's native size)
    pub backing_size: Vec2,
}

impl SurfaceGeometry {
    pub fn new(bounds: Rect, backing_size: Vec2) -> Self {
        Self { bounds, backing_size }
    }

    /// Backing pixels per screen pixel, per axis.
    pub fn backing_per_screen(&self) -> Vec2 {
        Vec2::new(
            self.backing_size.x / self.bounds.width(),
            self.backing_size.y / self.bounds.height(),
        )
    }

    pub fn screen_to_backing(&self, point: Pos2) -> Pos2 {
        ((point - self.bounds.min) * self.backing_per_screen()).to_pos2()
    }

    pub fn backing_to_screen(&self, point: Pos2) -> Pos2 {
        self.bounds.min + point.to_vec2() / self.backing_per_screen()
    }

    pub fn backing_rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.backing_to_screen(rect.min), self.backing_to_screen(rect.max))
    }

    /// Zoom anchor: half the bounding rectangle, in screen pixels.
    pub fn center(&self) -> Vec2 {
        self.bounds.size() / 2.0
    }
}

pub fn screen_to_image(geometry: &SurfaceGeometry, transform: &ViewportTransform, point: Pos2) -> Pos2 {
    transform.backing_to_image(geometry.screen_to_backing(point))
}

pub fn image_to_screen(geometry: &SurfaceGeometry, transform: &ViewportTransform, point: Pos2) -> Pos2 {
    geometry.backing_to_screen(transform.image_to_backing(point))
}

/// Aspect-preserving fit of a backing store of `backing_size` into
/// `available`, centered. Scales up as well as down.
pub fn fit_rect(available: Rect, backing_size: Vec2) -> Rect {
    if backing_size.x <= 0.0 || backing_size.y <= 0.0 {
        return available;
    }
    let factor = (available.width() / backing_size.x).min(available.height() / backing_size.y);
    Rect::from_center_size(available.center(), backing_size * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn translation_is_applied_before_scale() {
        let t = ViewportTransform {
            scale: 2.0,
            translate: Vec2::new(10.0, -5.0),
        };
        assert!(close(t.image_to_backing(Pos2::new(0.0, 0.0)), Pos2::new(20.0, -10.0)));
        assert!(close(t.backing_to_image(Pos2::new(20.0, -10.0)), Pos2::ZERO));
    }

    #[test]
    fn screen_mapping_accounts_for_stretched_surface() {
        let geometry = SurfaceGeometry::new(
            Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(400.0, 300.0)),
            Vec2::new(800.0, 600.0),
        );
        let backing = geometry.screen_to_backing(Pos2::new(300.0, 200.0));
        assert!(close(backing, Pos2::new(400.0, 300.0)));
        assert!(close(geometry.backing_to_screen(backing), Pos2::new(300.0, 200.0)));
    }

    #[test]
    fn zoom_clamps_at_both_ends() {
        let limits = ZoomLimits::default();
        let center = Vec2::new(200.0, 150.0);
        let mut t = ViewportTransform::default();
        for _ in 0..50 {
            t = t.zoom_in(&limits, center);
        }
        assert_eq!(t.scale, 3.0);
        for _ in 0..50 {
            t = t.zoom_out(&limits, center);
        }
        assert_eq!(t.scale, 0.5);
    }

    #[test]
    fn zoom_keeps_center_fixed_point_of_translate() {
        let limits = ZoomLimits::default();
        let center = Vec2::new(200.0, 150.0);
        let t = ViewportTransform {
            scale: 1.0,
            translate: center,
        };
        let zoomed = t.zoom_in(&limits, center);
        assert!((zoomed.translate - center).length() < 1e-4);
    }

    #[test]
    fn pan_divides_screen_delta_by_scale() {
        let t = ViewportTransform {
            scale: 2.0,
            translate: Vec2::ZERO,
        };
        let panned = t.panned(Vec2::new(10.0, -4.0));
        assert_eq!(panned.translate, Vec2::new(5.0, -2.0));
        assert_eq!(panned.scale, 2.0);
    }

    #[test]
    fn fit_rect_preserves_aspect() {
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 500.0));
        let fitted = fit_rect(available, Vec2::new(400.0, 400.0));
        assert_eq!(fitted.size(), Vec2::new(500.0, 500.0));
        assert_eq!(fitted.center(), available.center());
    }
}
