//! Hex Bounce headless runner
//!
//! Runs a scenario through the fixed timestep driver and prints one JSON
//! snapshot per rendered frame to stdout.
//!
//! Usage: `hex-bounce [preset|scenario.json] [seconds] [--seed N]`

#[cfg(not(target_arch = "wasm32"))]
use std::io::{BufWriter, Write};

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use hex_bounce::{FixedStepDriver, Scenario, ScenarioPreset, SimError};

/// Frame rate the runner pretends to render at
#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f32 = 1.0 / 60.0;

/// Launch speed cap for `--seed`
#[cfg(not(target_arch = "wasm32"))]
const RANDOM_LAUNCH_SPEED: f32 = 400.0;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(version, about = "Run a ball in a spinning polygon and print JSON snapshots")]
struct RunArgs {
    /// Preset name (classic, bouncy, elastic) or path to a scenario JSON file
    #[arg(default_value = "classic")]
    scenario: String,

    /// Simulated time to run, in seconds
    #[arg(default_value_t = 10.0, value_parser = parse_seconds)]
    seconds: f32,

    #[arg(long)]
    /// Seed for a random launch velocity
    seed: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_seconds(arg: &str) -> Result<f32, String> {
    let value: f32 = arg.parse().map_err(|_| format!("bad duration: {arg}"))?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("duration must be positive, got {arg}"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RunArgs {
    fn load_scenario(&self) -> Result<Scenario, SimError> {
        let scenario = match ScenarioPreset::from_str(&self.scenario) {
            Some(preset) => {
                log::info!("Using preset '{}'", preset.as_str());
                preset.scenario()
            }
            None => Scenario::load(&self.scenario)?,
        };
        Ok(match self.seed {
            Some(seed) => {
                log::info!("Random launch with seed {seed}");
                scenario.with_random_launch(seed, RANDOM_LAUNCH_SPEED)
            }
            None => scenario,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = RunArgs::parse();
    let scenario = args.load_scenario()?;
    let mut driver = FixedStepDriver::new(scenario.into_state()?);

    let frames = (args.seconds / FRAME_DT).ceil() as u64;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    serde_json::to_writer(&mut out, &driver.snapshot())?;
    writeln!(out)?;
    for _ in 0..frames {
        driver.update(FRAME_DT);
        serde_json::to_writer(&mut out, &driver.snapshot())?;
        writeln!(out)?;
    }
    out.flush()?;

    log::info!(
        "Ran {} ticks ({} frames): {} contacts, final speed {:.1}",
        driver.state.time_ticks,
        frames,
        driver.contacts(),
        driver.state.ball.speed()
    );
    if driver.escaped() {
        log::warn!("Ball escaped the polygon during the run");
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hex Bounce (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on wasm; embedders drive `hex_bounce::sim` directly
}
