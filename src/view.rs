// src/view.rs

use nalgebra::Vector2;

/// Multiplier applied by one speed-up or slow-down request.
pub const TIMESCALE_FACTOR: f64 = 1.1;
/// Multiplier applied by one zoom-out or zoom-in request.
pub const ZOOM_FACTOR: f64 = 1.2;
/// Amount added or removed by one pan-rate request.
pub const PAN_RATE_STEP: f64 = 1.0;

/// Whether frames advance the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Axis-aligned world rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

/// Runtime view and pacing settings, mutated by input handling and read by
/// the stepper and the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub timescale: f64,
    /// World units per screen pixel.
    pub zoom: f64,
    /// Screen pixels moved per pan request, before zoom.
    pub pan_rate: f64,
    pub center: Vector2<f64>,
    pub run_state: RunState,
    pub trails: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            timescale: 0.25,
            zoom: 1.0,
            pan_rate: 25.0,
            center: Vector2::zeros(),
            run_state: RunState::Paused,
            trails: false,
        }
    }
}

impl ViewState {
    pub fn with_timescale(timescale: f64) -> Self {
        ViewState {
            timescale,
            ..Default::default()
        }
    }

    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn toggle_pause(&mut self) {
        self.run_state = self.run_state.toggled();
    }

    pub fn toggle_trails(&mut self) {
        self.trails = !self.trails;
    }

    /// Multiplies the timescale by `factor`.
    pub fn scale_timescale(&mut self, factor: f64) {
        self.timescale *= factor;
    }

    pub fn speed_up(&mut self) {
        self.scale_timescale(TIMESCALE_FACTOR);
    }

    pub fn slow_down(&mut self) {
        self.scale_timescale(TIMESCALE_FACTOR.recip());
    }

    pub fn zoom_out(&mut self) {
        self.zoom *= ZOOM_FACTOR;
    }

    pub fn zoom_in(&mut self) {
        self.zoom /= ZOOM_FACTOR;
    }

    pub fn increase_pan_rate(&mut self) {
        self.pan_rate += PAN_RATE_STEP;
    }

    /// Lowers the pan rate by one step. A rate that is already zero or below
    /// is left alone.
    pub fn decrease_pan_rate(&mut self) {
        if self.pan_rate > 0.0 {
            self.pan_rate -= PAN_RATE_STEP;
        }
    }

    /// Moves the camera by `pan_rate * zoom` world units. Screen y grows downwards.
    pub fn pan(&mut self, direction: Direction) {
        let step = self.pan_rate * self.zoom;
        let delta = match direction {
            Direction::Up => Vector2::new(0.0, -step),
            Direction::Down => Vector2::new(0.0, step),
            Direction::Left => Vector2::new(-step, 0.0),
            Direction::Right => Vector2::new(step, 0.0),
        };
        self.center += delta;
    }

    /// World rectangle on screen for a viewport of the given half size in pixels.
    pub fn visible_bounds(&self, half_width: f64, half_height: f64) -> Bounds {
        let half = Vector2::new(half_width, half_height) * self.zoom;
        Bounds {
            min: self.center - half,
            max: self.center + half,
        }
    }
}
