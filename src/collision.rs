// src/collision.rs

use crate::body::{mass_to_radius, Body};

/// A body taking part in an overlap, together with the buffer slot it sits in.
#[derive(Debug, Clone, Copy)]
pub struct Participant<'a> {
    pub body: &'a Body,
    pub slot: usize,
}

/// True when `body` loses the merge against `other`.
///
/// The lighter side loses. On an exact mass tie the lower slot loses, so that
/// both sides of a pair agree on a single survivor.
pub fn is_absorbed(body: Participant<'_>, other: Participant<'_>) -> bool {
    body.body.mass < other.body.mass
        || (body.body.mass == other.body.mass && body.slot < other.slot)
}

/// Resolves an overlap as a perfectly inelastic merge, from the point of view
/// of `body`, the side being updated this step.
///
/// `advanced` is `body` after this step's drift; the merged kinematics are
/// computed from it and from `other` as it stands in the current frame.
/// Returns `None` when `body` is absorbed. Otherwise `body` keeps its slot and
/// color and takes the mass-weighted position and velocity of the pair, the
/// combined mass and a radius derived from it.
///
/// Only `body`'s side is produced here. `other` meets `body` in its own scan
/// and produces the complementary outcome.
pub fn merge(body: Participant<'_>, advanced: &Body, other: Participant<'_>) -> Option<Body> {
    if is_absorbed(body, other) {
        return None;
    }

    let other = other.body;
    let total_mass = advanced.mass + other.mass;
    Some(Body {
        position: (advanced.position * advanced.mass + other.position * other.mass) / total_mass,
        velocity: (advanced.velocity * advanced.mass + other.velocity * other.mass) / total_mass,
        mass: total_mass,
        radius: mass_to_radius(total_mass),
        color: advanced.color,
    })
}
