// src/body.rs

use crate::error::{Result, SimError};
use crate::view::Bounds;
use nalgebra::Vector2;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::fmt;

/// Render color of a body. Alpha is fixed at 255 and not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Color {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Radius of a body of the given mass. Area grows linearly with mass.
#[inline]
pub fn mass_to_radius(mass: f64) -> f64 {
    mass.sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub mass: f64,
    pub radius: f64,
    pub color: Color,
}

impl Body {
    /// Creates a body whose radius is derived from its mass.
    pub fn new(position: Vector2<f64>, velocity: Vector2<f64>, mass: f64, color: Color) -> Self {
        Body {
            position,
            velocity,
            mass,
            radius: mass_to_radius(mass),
            color,
        }
    }

    /// Builds a body from a numeric record.
    ///
    /// With 9 or more fields every attribute is taken literally, in the order
    /// `x, y, xVel, yVel, mass, radius, red, green, blue`; this is the only way
    /// to get a radius that disagrees with the mass. With 5 to 8 fields only the
    /// first five are used, the radius is derived and the color is random.
    /// Returns `None` for fewer than 5 fields.
    pub fn from_fields<R: Rng + ?Sized>(fields: &[f64], rng: &mut R) -> Option<Self> {
        match fields {
            [x, y, vx, vy, mass, radius, r, g, b, ..] => Some(Body {
                position: Vector2::new(*x, *y),
                velocity: Vector2::new(*vx, *vy),
                mass: *mass,
                radius: *radius,
                color: Color::new(*r as u8, *g as u8, *b as u8),
            }),
            [x, y, vx, vy, mass, ..] => Some(Body::new(
                Vector2::new(*x, *y),
                Vector2::new(*vx, *vy),
                *mass,
                Color::random(rng),
            )),
            _ => None,
        }
    }

    #[inline]
    pub fn distance_squared(&self, other: &Body) -> f64 {
        (self.position - other.position).norm_squared()
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// False when the whole disc lies outside `bounds`. Renderers use this
    /// with `ViewState::visible_bounds` to cull off-screen bodies.
    pub fn is_visible(&self, bounds: &Bounds) -> bool {
        !(self.position.x + self.radius < bounds.min.x
            || self.position.x - self.radius > bounds.max.x
            || self.position.y + self.radius < bounds.min.y
            || self.position.y - self.radius > bounds.max.y)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Body(m={:.2}, r={:.2}, p=[{:.2}, {:.2}], v=[{:.2}, {:.2}], c={})",
            self.mass,
            self.radius,
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
            self.color
        )
    }
}

/// Draws random bodies spread over the visible world.
///
/// Positions are uniform over `[-half_width, half_width) x [-half_height, half_height)`,
/// each velocity component is uniform over `[-velocity_limit/2, velocity_limit/2)`,
/// and mass is uniform over `[1, mass_limit + 1)`.
#[derive(Debug, Clone)]
pub struct BodySampler {
    x: Uniform<f64>,
    y: Uniform<f64>,
    velocity: Uniform<f64>,
    mass: Uniform<f64>,
}

impl BodySampler {
    pub fn new(
        half_width: f64,
        half_height: f64,
        velocity_limit: f64,
        mass_limit: f64,
    ) -> Result<Self> {
        let range = |low: f64, high: f64, what: &str| {
            Uniform::<f64>::new(low, high).map_err(|e| {
                SimError::InvalidConfig(format!("bad {what} range [{low}, {high}): {e}"))
            })
        };
        Ok(BodySampler {
            x: range(-half_width, half_width, "x")?,
            y: range(-half_height, half_height, "y")?,
            velocity: range(-velocity_limit / 2.0, velocity_limit / 2.0, "velocity")?,
            mass: range(1.0, mass_limit + 1.0, "mass")?,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Body {
        let position = Vector2::new(self.x.sample(rng), self.y.sample(rng));
        let velocity = Vector2::new(self.velocity.sample(rng), self.velocity.sample(rng));
        let mass = self.mass.sample(rng);
        Body::new(position, velocity, mass, Color::random(rng))
    }

    pub fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Body> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mass_to_radius() {
        assert_eq!(mass_to_radius(0.0), 0.0);
        assert_eq!(mass_to_radius(9.0), 3.0);
        assert_relative_eq!(mass_to_radius(2.0), std::f64::consts::SQRT_2);
    }

    #[test]
    fn test_five_fields_derive_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        let body = Body::from_fields(&[1.0, 2.0, 3.0, 4.0, 16.0], &mut rng).unwrap();
        assert_eq!(body.position, Vector2::new(1.0, 2.0));
        assert_eq!(body.velocity, Vector2::new(3.0, 4.0));
        assert_eq!(body.mass, 16.0);
        assert_eq!(body.radius, 4.0);
    }

    #[test]
    fn test_eight_fields_still_derive_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        let body =
            Body::from_fields(&[0.0, 0.0, 0.0, 0.0, 25.0, 99.0, 1.0, 2.0], &mut rng).unwrap();
        assert_eq!(body.radius, 5.0);
    }

    #[test]
    fn test_nine_fields_are_literal() {
        let mut rng = StdRng::seed_from_u64(7);
        let fields = [1.5, -2.5, 0.1, -0.1, 4.0, 10.0, 255.0, 128.0, 0.0];
        let body = Body::from_fields(&fields, &mut rng).unwrap();
        assert_eq!(body.mass, 4.0);
        assert_eq!(body.radius, 10.0);
        assert_eq!(body.color, Color::new(255, 128, 0));
    }

    #[test]
    fn test_too_few_fields() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(Body::from_fields(&[1.0, 2.0, 3.0, 4.0], &mut rng).is_none());
        assert!(Body::from_fields(&[], &mut rng).is_none());
    }

    #[test]
    fn test_sampler_respects_limits() {
        let mut rng = StdRng::seed_from_u64(42);
        let sampler = BodySampler::new(600.0, 400.0, 1.0, 10.0).unwrap();
        for body in sampler.sample_n(500, &mut rng) {
            assert!((-600.0..600.0).contains(&body.position.x));
            assert!((-400.0..400.0).contains(&body.position.y));
            assert!((-0.5..0.5).contains(&body.velocity.x));
            assert!((-0.5..0.5).contains(&body.velocity.y));
            assert!((1.0..11.0).contains(&body.mass));
            assert_eq!(body.radius, mass_to_radius(body.mass));
        }
    }

    #[test]
    fn test_sampler_rejects_empty_range() {
        assert!(BodySampler::new(0.0, 400.0, 1.0, 10.0).is_err());
    }

    #[test]
    fn test_visibility_culling() {
        let body = Body::new(Vector2::new(105.0, 0.0), Vector2::zeros(), 16.0, Color::new(0, 0, 0));
        let inside = Bounds {
            min: Vector2::new(-100.0, -100.0),
            max: Vector2::new(102.0, 100.0),
        };
        let outside = Bounds {
            min: Vector2::new(-100.0, -100.0),
            max: Vector2::new(100.0, 100.0),
        };
        assert!(body.is_visible(&inside));
        assert!(!body.is_visible(&outside));
    }
}
