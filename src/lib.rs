//! Gravsim - a 2D gravitational N-body sandbox
//!
//! Core modules:
//! - `body`: body type, mass/radius rule, random seeding
//! - `force`: pairwise gravity with overlap detection
//! - `collision`: perfectly inelastic merging
//! - `integrator`: per-body drift-then-kick step
//! - `simulation`: double-buffered stepper
//! - `view`, `controls`: runtime view state and the requests that change it
//! - `persistence`: CSV save files
//! - `config`, `report`, `error`: tunables, state tables, error type

pub mod body;
pub mod collision;
pub mod config;
pub mod controls;
pub mod error;
pub mod force;
pub mod integrator;
pub mod persistence;
pub mod report;
pub mod simulation;
pub mod view;

pub use body::{mass_to_radius, Body, BodySampler, Color};
pub use config::SimConfig;
pub use controls::Control;
pub use error::SimError;
pub use report::Diagnostics;
pub use simulation::Simulation;
pub use view::{RunState, ViewState};
