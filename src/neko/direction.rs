use glam::Vec2;

use super::state::Direction;

/// Normalized-offset threshold for an axis to contribute a compass letter.
const AXIS_THRESHOLD: f32 = 0.5;

/// Classify the walk direction from the unit offset `position - pointer`.
///
/// A positive `y` offset means the pointer is above, so the creature heads
/// north; a positive `x` offset means it heads west. Each axis is tested on
/// its own. Returns `None` when neither axis passes the threshold, which only
/// happens for non-finite input.
pub fn classify(unit_offset: Vec2) -> Option<Direction> {
    let vertical = if unit_offset.y > AXIS_THRESHOLD {
        Some(Direction::N)
    } else if unit_offset.y < -AXIS_THRESHOLD {
        Some(Direction::S)
    } else {
        None
    };

    let horizontal = if unit_offset.x > AXIS_THRESHOLD {
        Some(Direction::W)
    } else if unit_offset.x < -AXIS_THRESHOLD {
        Some(Direction::E)
    } else {
        None
    };

    match (vertical, horizontal) {
        (Some(v), None) => Some(v),
        (None, Some(h)) => Some(h),
        (Some(Direction::N), Some(Direction::E)) => Some(Direction::NE),
        (Some(Direction::N), Some(Direction::W)) => Some(Direction::NW),
        (Some(Direction::S), Some(Direction::E)) => Some(Direction::SE),
        (Some(Direction::S), Some(Direction::W)) => Some(Direction::SW),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_offset(dx: f32, dy: f32) -> Option<Direction> {
        classify(Vec2::new(dx, dy).normalize())
    }

    #[test]
    fn cardinal_and_diagonal() {
        assert_eq!(from_offset(-400.0, 0.0), Some(Direction::E));
        assert_eq!(from_offset(400.0, 0.0), Some(Direction::W));
        assert_eq!(from_offset(0.0, 400.0), Some(Direction::N));
        assert_eq!(from_offset(0.0, -400.0), Some(Direction::S));
        assert_eq!(from_offset(-1.0, 1.0), Some(Direction::NE));
        assert_eq!(from_offset(1.0, 1.0), Some(Direction::NW));
        assert_eq!(from_offset(-1.0, -1.0), Some(Direction::SE));
        assert_eq!(from_offset(1.0, -1.0), Some(Direction::SW));
    }

    #[test]
    fn every_heading_classifies() {
        for step in 0..3600 {
            let angle = (step as f32 / 10.0).to_radians();
            let unit = Vec2::new(angle.cos(), angle.sin());
            assert!(classify(unit).is_some(), "angle {} deg", step as f32 / 10.0);
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let unit = Vec2::new(0.3, -0.95).normalize();
        assert_eq!(classify(unit), classify(unit));
        assert_eq!(classify(unit), Some(Direction::S));
    }

    #[test]
    fn non_finite_offset_is_unclassified() {
        assert_eq!(classify(Vec2::new(f32::NAN, f32::NAN)), None);
        assert_eq!(classify(Vec2::ZERO), None);
    }
}
