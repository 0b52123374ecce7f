use anyhow::{Context, Result};
use clap::Parser;
use gravsim::controls::{self, Control};
use gravsim::persistence;
use gravsim::{SimConfig, Simulation, ViewState};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Headless gravity simulation with inelastic merging.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV save file to start from. Random bodies are seeded when omitted.
    #[arg(long = "save-file")]
    save_file: Option<PathBuf>,

    /// Number of random bodies to seed.
    #[arg(long = "num-bodies")]
    num_bodies: Option<usize>,

    /// JSON file with simulation tunables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames to run before exiting.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Start running instead of paused.
    #[arg(long)]
    run: bool,

    /// Delay between frames in milliseconds.
    #[arg(long = "frame-delay")]
    frame_delay: Option<u64>,

    /// Where save-state writes go.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Seed for random bodies.
    #[arg(long)]
    seed: Option<u64>,
}

// merge file config and flags, flags win
fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_json_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => SimConfig::default(),
    };

    if let Some(path) = &args.save_file {
        config.load_path = Some(path.clone());
    }
    if let Some(n) = args.num_bodies {
        config.num_bodies = n;
    }
    if let Some(delay) = args.frame_delay {
        config.frame_delay_ms = delay;
    }
    if let Some(path) = &args.output {
        config.save_path = path.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}

// no point sleeping between frames that do not step
fn frame_delay(view: &ViewState, configured: Duration) -> Duration {
    if view.is_paused() {
        Duration::ZERO
    } else {
        configured
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    log::debug!("Effective config:\n{}", config.to_json()?);

    let mut sim = Simulation::from_config(&config).context("failed to set up the simulation")?;
    let mut view = ViewState::with_timescale(config.initial_timescale);

    // keep the starting configuration so the run can be repeated
    persistence::save_state(&config.save_path, sim.current());

    if args.run {
        controls::apply(Control::TogglePause, &mut sim, &mut view, &config);
    } else {
        log::info!("Starting paused; pass --run to advance frames");
    }

    let pb = ProgressBar::new(args.frames);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let delay = frame_delay(&view, Duration::from_millis(config.frame_delay_ms));
    for _ in 0..args.frames {
        sim.frame(&view);
        pb.set_message(format!("{} bodies", sim.live_count()));
        pb.inc(1);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    pb.finish_with_message(format!("{} bodies after {} steps", sim.live_count(), sim.steps()));

    controls::apply(Control::PrintState, &mut sim, &mut view, &config);
    controls::apply(Control::SaveState, &mut sim, &mut view, &config);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_run_does_not_sleep() {
        let mut view = ViewState::default();
        let configured = Duration::from_millis(16);
        assert_eq!(frame_delay(&view, configured), Duration::ZERO);

        view.toggle_pause();
        assert_eq!(frame_delay(&view, configured), configured);
    }

    #[test]
    fn test_flags_override_config_defaults() {
        let args = Args::parse_from(["gravsim", "--num-bodies", "9", "--seed", "4"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.num_bodies, 9);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.gravity, SimConfig::default().gravity);
    }
}
