//! Pointer handling: Idle/Dragging state machine driving pan and hover.

use super::hit_test::{hit_test, HoverState};
use super::transform::{screen_to_image, SurfaceGeometry, ViewportTransform, ZoomLimits};
use crate::annotation::Annotation;
use egui::{Pos2, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { last: Pos2 },
}

/// What the controller needs to know about the current frame.
pub struct Scene<'a> {
    /// `None` while nothing is drawn (loading or failed)
    pub geometry: Option<SurfaceGeometry>,
    pub annotations: &'a [Annotation],
}

/// Widget-local view state, owned by one viewer instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub transform: ViewportTransform,
    pub drag: DragState,
    pub hover: Option<HoverState>,
}

impl ViewState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Apply one pointer event. Returns true when the frame must be redrawn.
    pub fn handle_pointer(&mut self, event: PointerEvent, scene: &Scene<'_>) -> bool {
        match event {
            PointerEvent::Down(pos) => {
                self.drag = DragState::Dragging { last: pos };
                false
            }
            PointerEvent::Up => {
                self.drag = DragState::Idle;
                false
            }
            PointerEvent::Leave => {
                self.drag = DragState::Idle;
                self.hover.take().is_some()
            }
            PointerEvent::Move(pos) => match self.drag {
                DragState::Dragging { last } => {
                    self.transform = self.transform.panned(pos - last);
                    self.drag = DragState::Dragging { last: pos };
                    true
                }
                DragState::Idle => {
                    let hover = scene.geometry.and_then(|geometry| {
                        let point = screen_to_image(&geometry, &self.transform, pos);
                        hit_test(scene.annotations, geometry.backing_size, point).map(|i| HoverState {
                            annotation: scene.annotations[i].clone(),
                            screen_pos: pos,
                        })
                    });
                    let changed = hover != self.hover;
                    self.hover = hover;
                    changed
                }
            },
        }
    }

    pub fn zoom_in(&mut self, limits: &ZoomLimits, geometry: &SurfaceGeometry) {
        self.transform = self.transform.zoom_in(limits, geometry.center());
    }

    pub fn zoom_out(&mut self, limits: &ZoomLimits, geometry: &SurfaceGeometry) {
        self.transform = self.transform.zoom_out(limits, geometry.center());
    }
}

/// Translate this frame's egui pointer input into controller events.
/// `inside_before` tracks whether the pointer was over `bounds` last frame.
pub fn collect_pointer_events(
    response: &egui::Response,
    bounds: Rect,
    inside_before: &mut bool,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let (pressed, released, moved, latest) = response.ctx.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.delta() != egui::Vec2::ZERO,
            i.pointer.latest_pos(),
        )
    });

    let inside = latest.is_some_and(|pos| bounds.contains(pos)) && response.hovered();

    if pressed && inside {
        if let Some(pos) = latest {
            events.push(PointerEvent::Down(pos));
        }
    }
    if moved && inside {
        if let Some(pos) = latest {
            events.push(PointerEvent::Move(pos));
        }
    }
    if released {
        events.push(PointerEvent::Up);
    }
    if *inside_before && !inside {
        events.push(PointerEvent::Leave);
    }

    *inside_before = inside;
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Vec2;

    fn geometry() -> SurfaceGeometry {
        SurfaceGeometry::new(
            Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 100.0)),
            Vec2::new(100.0, 100.0),
        )
    }

    #[test]
    fn drag_pans_and_suppresses_hover() {
        let annotations = vec![Annotation::new("a", 0.5, 0.5, 1.0, 1.0)];
        let scene = Scene {
            geometry: Some(geometry()),
            annotations: &annotations,
        };
        let mut state = ViewState::default();

        state.handle_pointer(PointerEvent::Down(Pos2::new(10.0, 10.0)), &scene);
        assert!(state.is_dragging());
        assert!(state.handle_pointer(PointerEvent::Move(Pos2::new(30.0, 15.0)), &scene));
        assert_eq!(state.transform.translate, Vec2::new(20.0, 5.0));
        assert!(state.hover.is_none());

        state.handle_pointer(PointerEvent::Up, &scene);
        assert_eq!(state.drag, DragState::Idle);
        state.handle_pointer(PointerEvent::Move(Pos2::new(50.0, 50.0)), &scene);
        assert!(state.hover.is_some());
    }

    #[test]
    fn leave_ends_drag_and_clears_hover() {
        let annotations = vec![Annotation::new("a", 0.5, 0.5, 1.0, 1.0)];
        let scene = Scene {
            geometry: Some(geometry()),
            annotations: &annotations,
        };
        let mut state = ViewState::default();
        state.handle_pointer(PointerEvent::Move(Pos2::new(50.0, 50.0)), &scene);
        state.handle_pointer(PointerEvent::Down(Pos2::new(50.0, 50.0)), &scene);

        assert!(state.handle_pointer(PointerEvent::Leave, &scene));
        assert_eq!(state.drag, DragState::Idle);
        assert!(state.hover.is_none());
    }

    #[test]
    fn zoom_does_not_change_drag_state() {
        let limits = ZoomLimits::default();
        let mut state = ViewState::default();
        state.drag = DragState::Dragging { last: Pos2::new(1.0, 1.0) };
        state.zoom_in(&limits, &geometry());
        assert!(state.is_dragging());
        assert!((state.transform.scale - 1.1).abs() < 1e-6);
    }

    #[test]
    fn hover_without_surface_is_none() {
        let annotations = vec![Annotation::new("a", 0.5, 0.5, 1.0, 1.0)];
        let scene = Scene {
            geometry: None,
            annotations: &annotations,
        };
        let mut state = ViewState::default();
        assert!(!state.handle_pointer(PointerEvent::Move(Pos2::new(5.0, 5.0)), &scene));
        assert!(state.hover.is_none());
    }
}
