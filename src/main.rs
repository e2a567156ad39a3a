mod scenario; // brings `scenario.rs` in as `crate::scenario`
mod settings; // brings `settings.rs` in as `crate::settings`
mod telemetry; // brings `telemetry.rs` in as `crate::telemetry`

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use mecanum_navigation::{FrameClock, Robot, SimState, Simulator};
use spin_sleep::SpinSleeper;
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

use scenario::derive_rotation;
use settings::{RunSettings, load_settings};
use telemetry::{StatusReport, format_decimal};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let scenario_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = load_settings(scenario_path.as_deref()).context("loading configuration")?;

    let drive = settings.robot.drive().context("invalid robot geometry")?;
    let start = settings.robot.start;
    let input = derive_rotation(settings.scenario.clone(), start.heading);
    input
        .validate(&drive, settings.simulator.max_speed)
        .with_context(|| format!("invalid {} input", input.name()))?;

    info!(%drive, start = %start, kind = input.name(), "Mecanum simulator starting");
    let mut sim = Simulator::with_config(input, Robot::new(drive, start), settings.simulator);

    if !sim.is_feasible() {
        bail!(
            "{} path of {} ft cannot be driven in the requested time at up to {} ft/s",
            sim.input().name(),
            format_decimal(sim.path_length()),
            format_decimal(settings.simulator.max_speed)
        );
    }
    if sim.input().is_path_following() {
        info!(
            vertices = sim.path().len(),
            length = %format_decimal(sim.path_length()),
            cruise_speed = %format_decimal(sim.cruise_speed()),
            "Path planned"
        );
    }

    let elapsed = run(&mut sim, &settings.run)?;

    if sim.is_at_goal() {
        info!("Goal reached at {}", StatusReport::from(&sim.robot()));
    } else if sim.input().is_path_following() {
        warn!(
            max_duration = settings.run.max_duration,
            "Goal not reached before the time limit"
        );
    }
    info!(
        "Simulation took approximately {} seconds",
        format_decimal(elapsed)
    );
    Ok(())
}

/// Ticks the simulator until it reaches its goal or `max_duration` of
/// simulated time passes. Returns the simulated time.
fn run(sim: &mut Simulator, run: &RunSettings) -> anyhow::Result<f64> {
    if !(run.dt > 0.0) {
        bail!("frame step must be positive, got {}", run.dt);
    }

    let sleeper = SpinSleeper::new(10_000);
    let frame = Duration::from_secs_f64(run.dt);
    let mut clock = FrameClock::new();
    let mut elapsed = 0.0;
    let mut frames: u64 = 0;

    while elapsed < run.max_duration {
        let dt = if run.realtime { clock.tick() } else { run.dt };
        let state = sim.tick(dt).context("simulation step failed")?;
        elapsed += dt;
        frames += 1;

        if run.telemetry_every > 0 && frames % u64::from(run.telemetry_every) == 0 {
            info!(frame = frames, "{}", StatusReport::from(&sim.robot()));
        }
        if state == SimState::AtGoal {
            break;
        }
        if run.realtime {
            sleeper.sleep(frame);
        }
    }

    Ok(elapsed)
}
