// src/force.rs

use crate::body::Body;
use crate::collision::{self, Participant};
use nalgebra::Vector2;

/// Pairs closer than this (squared) are treated as coincident and exert no force.
pub const MIN_DISTANCE_SQUARED: f64 = 1.0;

/// What one body's scan over the frame produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// An overlap was found. Holds the body's whole output for the step,
    /// `None` when it was absorbed.
    Merged(Option<Body>),
    /// No overlap. Holds the summed gravitational acceleration.
    Accelerated(Vector2<f64>),
}

/// Acceleration on `body` due to `other`, given their squared separation.
///
/// The magnitude is `G * m_other / d2`, directed from `body` towards `other`.
#[inline]
pub fn pairwise_acceleration(body: &Body, other: &Body, d2: f64, g: f64) -> Vector2<f64> {
    let magnitude = -g * other.mass / d2;
    let delta = body.position - other.position;
    let angle = delta.y.atan2(delta.x);
    Vector2::new(magnitude * angle.cos(), magnitude * angle.sin())
}

/// Scans every live body of `frame` against `body`, which sits in `slot`.
///
/// `body` must be a reference into `frame`; it is skipped by identity. Distances
/// and the overlap test use `body` as it stands in the frame, while directions
/// and merge kinematics use `advanced`, the body after this step's drift.
///
/// The first overlapping pair ends the scan and its merge outcome replaces
/// any acceleration accumulated so far.
pub fn evaluate(
    slot: usize,
    body: &Body,
    advanced: &Body,
    frame: &[Option<Body>],
    g: f64,
) -> Interaction {
    let mut acc = Vector2::zeros();

    for (other_slot, other) in frame.iter().enumerate() {
        let Some(other) = other else { continue };
        if std::ptr::eq(body, other) {
            continue;
        }

        let d2 = body.distance_squared(other);
        if d2 < MIN_DISTANCE_SQUARED {
            continue;
        }

        let reach = body.radius + other.radius;
        if d2 < reach * reach {
            let outcome = collision::merge(
                Participant { body, slot },
                advanced,
                Participant {
                    body: other,
                    slot: other_slot,
                },
            );
            return Interaction::Merged(outcome);
        }

        acc += pairwise_acceleration(advanced, other, d2, g);
    }

    Interaction::Accelerated(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Color;
    use approx::assert_relative_eq;

    const G: f64 = 100.0;

    fn body(x: f64, y: f64, mass: f64) -> Body {
        Body::new(Vector2::new(x, y), Vector2::zeros(), mass, Color::new(0, 0, 0))
    }

    fn accel(slot: usize, frame: &[Option<Body>]) -> Vector2<f64> {
        let body = frame[slot].as_ref().unwrap();
        match evaluate(slot, body, body, frame, G) {
            Interaction::Accelerated(acc) => acc,
            other => panic!("unexpected merge: {other:?}"),
        }
    }

    #[test]
    fn test_isolated_body_feels_nothing() {
        let frame = vec![Some(body(3.0, 4.0, 5.0)), None, None];
        assert_eq!(accel(0, &frame), Vector2::zeros());
    }

    #[test]
    fn test_acceleration_points_towards_other() {
        let frame = vec![Some(body(0.0, 0.0, 1.0)), Some(body(100.0, 0.0, 1.0))];
        let a0 = accel(0, &frame);
        let a1 = accel(1, &frame);
        assert!(a0.x > 0.0);
        assert!(a1.x < 0.0);
        assert_relative_eq!(a0.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_square_magnitudes() {
        let d = 200.0;
        let frame = vec![Some(body(0.0, 0.0, 1.0)), Some(body(0.0, d, 1000.0))];
        assert_relative_eq!(accel(0, &frame).norm(), G * 1000.0 / (d * d), max_relative = 1e-12);
        assert_relative_eq!(accel(1, &frame).norm(), G * 1.0 / (d * d), max_relative = 1e-12);
    }

    #[test]
    fn test_near_coincident_pair_is_skipped() {
        let frame = vec![Some(body(0.0, 0.0, 50.0)), Some(body(0.5, 0.5, 50.0))];
        assert_eq!(accel(0, &frame), Vector2::zeros());
    }

    #[test]
    fn test_overlap_returns_merge() {
        let frame = vec![Some(body(0.0, 0.0, 4.0)), Some(body(2.5, 0.0, 1.0))];
        let heavy = frame[0].as_ref().unwrap();
        let light = frame[1].as_ref().unwrap();
        match evaluate(0, heavy, heavy, &frame, G) {
            Interaction::Merged(Some(merged)) => assert_eq!(merged.mass, 5.0),
            other => panic!("expected merge, got {other:?}"),
        }
        assert_eq!(evaluate(1, light, light, &frame, G), Interaction::Merged(None));
    }

    #[test]
    fn test_absent_slots_are_ignored() {
        let frame = vec![None, Some(body(0.0, 0.0, 1.0)), None];
        assert_eq!(accel(1, &frame), Vector2::zeros());
    }
}
