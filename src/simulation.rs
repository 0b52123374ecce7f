// src/simulation.rs

use crate::body::{Body, BodySampler};
use crate::config::SimConfig;
use crate::error::Result;
use crate::integrator;
use crate::persistence;
use crate::view::{RunState, ViewState};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A fixed-capacity body buffer. Absorbed bodies leave `None` in their slot.
pub type Frame = Vec<Option<Body>>;

/// Double-buffered simulation state.
///
/// `buffers[front]` is the current frame, readable by rendering and by the
/// next step. The other buffer is scratch: a step writes every one of its
/// slots from the current frame only, then the roles flip. Both buffers keep
/// the length they were created with for the whole run.
#[derive(Debug, Clone)]
pub struct Simulation {
    buffers: [Frame; 2],
    front: usize,
    gravity: f64,
    steps: u64,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>, gravity: f64) -> Self {
        let current: Frame = bodies.into_iter().map(Some).collect();
        let scratch = vec![None; current.len()];
        Simulation {
            buffers: [current, scratch],
            front: 0,
            gravity,
            steps: 0,
        }
    }

    /// Builds the starting state described by `config`: the bodies of
    /// `load_path` when set, otherwise `num_bodies` random bodies.
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        let bodies = match &config.load_path {
            Some(path) => {
                log::info!("Loading bodies from {}", path.display());
                persistence::load_bodies(path, &mut rand::rng())?
            }
            None => {
                log::info!("No load file, seeding {} random bodies", config.num_bodies);
                let sampler = BodySampler::new(
                    config.world_half_width,
                    config.world_half_height,
                    config.velocity_limit,
                    config.mass_limit,
                )?;
                match config.seed {
                    Some(seed) => {
                        sampler.sample_n(config.num_bodies, &mut StdRng::seed_from_u64(seed))
                    }
                    None => sampler.sample_n(config.num_bodies, &mut rand::rng()),
                }
            }
        };
        Ok(Simulation::new(bodies, config.gravity))
    }

    /// The authoritative frame, including empty slots.
    pub fn current(&self) -> &[Option<Body>] {
        &self.buffers[self.front]
    }

    /// Live bodies of the current frame with their slot index. The iterator
    /// is `Clone` so callers can walk every pair of live bodies.
    pub fn live(&self) -> impl Iterator<Item = (usize, &Body)> + Clone + '_ {
        self.current()
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|body| (i, body)))
    }

    pub fn live_count(&self) -> usize {
        self.current().iter().flatten().count()
    }

    pub fn total_mass(&self) -> f64 {
        self.current().iter().flatten().map(|b| b.mass).sum()
    }

    /// Number of slots, live or not.
    pub fn capacity(&self) -> usize {
        self.current().len()
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advances every slot by one step of `timescale` and publishes the result.
    pub fn step(&mut self, timescale: f64) {
        let gravity = self.gravity;
        let [a, b] = &mut self.buffers;
        let (current, scratch) = if self.front == 0 { (&*a, b) } else { (&*b, a) };

        for (slot, (next, body)) in scratch.iter_mut().zip(current.iter()).enumerate() {
            *next = integrator::update(slot, body.as_ref(), current, timescale, gravity);
        }

        let before = current.iter().flatten().count();
        let after = scratch.iter().flatten().count();
        if after < before {
            log::debug!(
                "step {}: {} bodies absorbed, {} left",
                self.steps + 1,
                before - after,
                after
            );
        }

        self.front ^= 1;
        self.steps += 1;
    }

    /// Per-frame hook: steps only while `view` is running.
    /// Returns whether a step was taken.
    pub fn frame(&mut self, view: &ViewState) -> bool {
        match view.run_state {
            RunState::Running => {
                self.step(view.timescale);
                true
            }
            RunState::Paused => false,
        }
    }
}
