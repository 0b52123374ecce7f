// src/integrator.rs

use crate::body::Body;
use crate::force::{self, Interaction};

/// Advances the body in `slot` by one step of `timescale`, reading only `frame`.
///
/// The scheme drifts first and kicks second: the position moves by the
/// current velocity, then the velocity takes the acceleration summed over the
/// frame. This is a plain first-order explicit step and does not conserve
/// energy over long runs.
///
/// An absent slot stays absent. When the scan hits an overlap the merge
/// outcome is returned as is, in place of the kick.
pub fn update(
    slot: usize,
    body: Option<&Body>,
    frame: &[Option<Body>],
    timescale: f64,
    g: f64,
) -> Option<Body> {
    let body = body?;

    let mut next = *body;
    next.position += next.velocity * timescale;

    match force::evaluate(slot, body, &next, frame, g) {
        Interaction::Merged(outcome) => outcome,
        Interaction::Accelerated(acc) => {
            next.velocity += acc * timescale;
            Some(next)
        }
    }
}
