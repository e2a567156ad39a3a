use anyhow::{Context, bail};
use mecanum_kinematics::{Point, Pose};
use mecanum_navigation::{FigureEightPathInput, Robot, SimState, Simulator};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let robot = Robot::with_wheel_radius(0.25, Pose::new(Point::ORIGIN, 0.0))
        .context("building robot")?;
    let input = FigureEightPathInput::new(Point::ORIGIN, 2.0, 3.0, 30.0).with_time(12.0);
    let mut sim = Simulator::new(input.into(), robot);

    if !sim.is_feasible() {
        bail!("figure eight of length {:.3} ft is infeasible", sim.path_length());
    }
    println!(
        "Path: {} vertices, {:.3} ft at {:.3} ft/s",
        sim.path().len(),
        sim.path_length(),
        sim.cruise_speed()
    );

    let dt = 0.1;
    let mut elapsed = 0.0;
    while elapsed < 30.0 {
        let state = sim.tick(dt)?;
        elapsed += dt;
        let snapshot = sim.robot();
        println!(
            "t = {:>5.1} s  vertex {:>2}  pose {}",
            elapsed,
            sim.current_vertex_index(),
            snapshot.pose
        );
        if state == SimState::AtGoal {
            break;
        }
    }

    println!("\nFinished after {:.1} s, at goal: {}", elapsed, sim.is_at_goal());
    Ok(())
}
