use crate::annotation::Annotation;
use egui::{Pos2, Vec2};

/// Annotation under the pointer, with the raw screen position used to
/// anchor its tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverState {
    pub annotation: Annotation,
    pub screen_pos: Pos2,
}

/// Index of the first annotation (in draw order) whose image-space
/// rectangle contains `point`.
pub fn hit_test(annotations: &[Annotation], image_size: Vec2, point: Pos2) -> Option<usize> {
    annotations
        .iter()
        .position(|annotation| annotation.contains(image_size, point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins_on_overlap() {
        let annotations = vec![
            Annotation::new("outer", 0.5, 0.5, 0.6, 0.6),
            Annotation::new("inner", 0.5, 0.5, 0.2, 0.2),
        ];
        let size = Vec2::new(100.0, 100.0);
        assert_eq!(hit_test(&annotations, size, Pos2::new(50.0, 50.0)), Some(0));
    }

    #[test]
    fn empty_list_never_matches() {
        assert_eq!(hit_test(&[], Vec2::new(10.0, 10.0), Pos2::new(5.0, 5.0)), None);
    }

    #[test]
    fn later_box_matches_outside_earlier_box() {
        let annotations = vec![
            Annotation::new("left", 0.2, 0.5, 0.2, 0.2),
            Annotation::new("right", 0.8, 0.5, 0.2, 0.2),
        ];
        let size = Vec2::new(200.0, 100.0);
        assert_eq!(hit_test(&annotations, size, Pos2::new(160.0, 50.0)), Some(1));
        assert_eq!(hit_test(&annotations, size, Pos2::new(100.0, 50.0)), None);
    }
}
