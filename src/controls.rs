// src/controls.rs

use crate::config::SimConfig;
use crate::persistence;
use crate::report;
use crate::simulation::Simulation;
use crate::view::{Direction, ViewState};

/// Runtime requests the input layer can make of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TogglePause,
    ToggleTrails,
    /// One step, whether paused or running.
    SingleStep,
    SpeedUp,
    SlowDown,
    PanRateUp,
    PanRateDown,
    ZoomOut,
    ZoomIn,
    Pan(Direction),
    PrintState,
    SaveState,
}

impl Control {
    /// Whether the control invalidates what is currently on screen, so a
    /// renderer should clear its trails. The core never reads this; it is
    /// for the input layer that draws frames.
    pub fn clears_screen(self) -> bool {
        matches!(self, Control::ZoomOut | Control::ZoomIn | Control::Pan(_))
    }
}

/// Applies `control` to the view and the simulation.
pub fn apply(control: Control, sim: &mut Simulation, view: &mut ViewState, config: &SimConfig) {
    match control {
        Control::TogglePause => {
            view.toggle_pause();
            log::info!("Simulation {}", if view.is_paused() { "paused" } else { "resumed" });
        }
        Control::ToggleTrails => view.toggle_trails(),
        Control::SingleStep => sim.step(view.timescale),
        Control::SpeedUp => view.speed_up(),
        Control::SlowDown => view.slow_down(),
        Control::PanRateUp => view.increase_pan_rate(),
        Control::PanRateDown => view.decrease_pan_rate(),
        Control::ZoomOut => view.zoom_out(),
        Control::ZoomIn => view.zoom_in(),
        Control::Pan(direction) => view.pan(direction),
        Control::PrintState => {
            println!("\n\n");
            report::print_bodies(sim);
            report::print_configuration(sim, view, config);
        }
        Control::SaveState => {
            persistence::save_state(&config.save_path, sim.current());
        }
    }
}
