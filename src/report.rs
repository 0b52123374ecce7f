// src/report.rs

use crate::config::SimConfig;
use crate::simulation::Simulation;
use crate::view::ViewState;
use chrono::Utc;
use itertools::Itertools;
use nalgebra::Vector2;
use ordered_float::OrderedFloat;
use std::fmt::Write;

const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Conserved and derived quantities of the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub live: usize,
    pub capacity: usize,
    pub total_mass: f64,
    pub momentum: Vector2<f64>,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    /// Slot of the heaviest live body. Not printed; a renderer can use it to
    /// keep the dominant body centred.
    pub heaviest: Option<usize>,
}

impl Diagnostics {
    pub fn measure(sim: &Simulation) -> Self {
        let g = sim.gravity();
        let potential_energy = sim
            .live()
            .tuple_combinations()
            .map(|((_, a), (_, b))| {
                let r = a.distance_squared(b).sqrt();
                if r > 0.0 {
                    -g * a.mass * b.mass / r
                } else {
                    0.0
                }
            })
            .sum();

        Diagnostics {
            live: sim.live_count(),
            capacity: sim.capacity(),
            total_mass: sim.total_mass(),
            momentum: sim.live().map(|(_, b)| b.momentum()).sum(),
            kinetic_energy: sim.live().map(|(_, b)| b.kinetic_energy()).sum(),
            potential_energy,
            heaviest: sim
                .live()
                .max_by_key(|(_, b)| OrderedFloat(b.mass))
                .map(|(i, _)| i),
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }
}

/// Table of every live body in the current frame.
pub fn bodies_table(sim: &Simulation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Snapshot at {} after {} steps", Utc::now().to_rfc3339(), sim.steps());
    let _ = writeln!(
        out,
        "{:<12}{:>12}{:>12}{:>10}{:>10}{:>10}{:>10}    color",
        "Body Index", "x", "y", "xVel", "yVel", "mass", "radius"
    );
    for (i, b) in sim.live() {
        let _ = writeln!(
            out,
            "{:<12}{:>12.2}{:>12.2}{:>10.2}{:>10.2}{:>10.2}{:>10.2}    {}",
            format!("BODY {i}"),
            b.position.x,
            b.position.y,
            b.velocity.x,
            b.velocity.y,
            b.mass,
            b.radius,
            b.color
        );
    }
    out
}

/// Table of the runtime settings and the frame's diagnostics.
pub fn configuration_table(sim: &Simulation, view: &ViewState, config: &SimConfig) -> String {
    let bounds = view.visible_bounds(config.world_half_width, config.world_half_height);
    let diag = Diagnostics::measure(sim);

    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{:<16}{}", "PAUSED", view.is_paused());
    let _ = writeln!(out, "{:<16}{}", "TRAILS", view.trails);
    let _ = writeln!(out, "{:<16}{}", "PIXEL DECAY", config.pixel_decay_rate);
    let _ = writeln!(out, "{:<16}{:.2}", "TIMESCALE", view.timescale);
    let _ = writeln!(out, "{:<16}{:.2}", "ZOOMSCALE", view.zoom);
    let _ = writeln!(out, "{:<16}{:.2}", "MOVESCALE", view.pan_rate);
    let _ = writeln!(out, "{:<16}({:.2}, {:.2})", "SCREEN CENTER", view.center.x, view.center.y);
    let _ = writeln!(
        out,
        "{:<16}X: {} - {},  Y: {} - {}",
        "SCREEN LIMITS",
        bounds.min.x as i32,
        bounds.max.x as i32,
        bounds.min.y as i32,
        bounds.max.y as i32
    );
    let _ = writeln!(out, "{:<16}{}", "G", sim.gravity());
    let _ = writeln!(out, "{:<16}{} / {}", "LIVE BODIES", diag.live, diag.capacity);
    let _ = writeln!(out, "{:<16}{:.4}", "TOTAL MASS", diag.total_mass);
    let _ = writeln!(out, "{:<16}({:.4}, {:.4})", "MOMENTUM", diag.momentum.x, diag.momentum.y);
    let _ = writeln!(out, "{:<16}{:.4}", "ENERGY", diag.total_energy());
    out
}

pub fn print_bodies(sim: &Simulation) {
    print!("{}", bodies_table(sim));
}

pub fn print_configuration(sim: &Simulation, view: &ViewState, config: &SimConfig) {
    print!("{}", configuration_table(sim, view, config));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Body, Color};
    use approx::assert_relative_eq;

    fn sim() -> Simulation {
        let a = Body::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), 4.0, Color::new(1, 1, 1));
        let b = Body::new(Vector2::new(10.0, 0.0), Vector2::new(0.0, -2.0), 1.0, Color::new(2, 2, 2));
        Simulation::new(vec![a, b], 100.0)
    }

    #[test]
    fn test_diagnostics() {
        let diag = Diagnostics::measure(&sim());
        assert_eq!(diag.live, 2);
        assert_eq!(diag.capacity, 2);
        assert_eq!(diag.total_mass, 5.0);
        assert_eq!(diag.momentum, Vector2::new(4.0, -2.0));
        assert_relative_eq!(diag.kinetic_energy, 4.0);
        assert_relative_eq!(diag.potential_energy, -40.0);
        assert_eq!(diag.heaviest, Some(0));
    }

    #[test]
    fn test_bodies_table_lists_live_bodies() {
        let table = bodies_table(&sim());
        assert!(table.contains("BODY 0"));
        assert!(table.contains("BODY 1"));
        assert!(table.contains("(2, 2, 2)"));
    }

    #[test]
    fn test_configuration_table() {
        let table = configuration_table(&sim(), &ViewState::default(), &SimConfig::default());
        assert!(table.contains("PAUSED"));
        assert!(table.contains("X: -600 - 600,  Y: -400 - 400"));
        assert!(table.contains("2 / 2"));
        assert!(table.contains("PIXEL DECAY     2\n"));
    }

    #[test]
    fn test_diagnostics_skip_absorbed_slots() {
        let a = Body::new(Vector2::new(0.0, 0.0), Vector2::zeros(), 4.0, Color::new(1, 1, 1));
        let far = Body::new(Vector2::new(1000.0, 0.0), Vector2::zeros(), 1.0, Color::new(2, 2, 2));
        let b = Body::new(Vector2::new(3.0, 0.0), Vector2::zeros(), 4.0, Color::new(3, 3, 3));
        let mut sim = Simulation::new(vec![a, far, b], 100.0);
        sim.step(0.25);

        let diag = Diagnostics::measure(&sim);
        assert_eq!(diag.live, 2);
        assert_eq!(diag.capacity, 3);
        assert_relative_eq!(diag.total_mass, 9.0, epsilon = 1e-12);
        assert_eq!(diag.heaviest, Some(2));
        assert!(diag.potential_energy < 0.0);
    }
}
