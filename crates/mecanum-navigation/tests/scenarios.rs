use mecanum_kinematics::{Point, Pose, WheelRates};
use mecanum_navigation::geometry::{distance, is_at_goal};
use mecanum_navigation::{
    CirclePathInput, FigureEightPathInput, GeneralInput, InputDescriptor, PointInput,
    RectanglePathInput, Robot, SimState, SimulationError, Simulator, SimulatorConfig, WheelInput,
    rotation_rate_toward,
};
use tracing_subscriber::EnvFilter;

const DT: f64 = 0.1;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

fn robot_at(location: Point) -> Robot {
    Robot::with_wheel_radius(0.25, Pose::new(location, 0.0)).unwrap()
}

/// Ticks until the goal is reached or `max_seconds` elapse; returns the ticks taken.
fn run(sim: &mut Simulator, max_seconds: f64) -> usize {
    let max_ticks = (max_seconds / DT).round() as usize;
    for n in 1..=max_ticks {
        if sim.tick(DT).unwrap() == SimState::AtGoal {
            return n;
        }
    }
    max_ticks
}

#[test]
fn point_reaches_goal_within_time_budget() {
    init_tracing();
    let input = PointInput::new(Point::new(0.0, 10.0)).with_time(5.0);
    let mut sim = Simulator::new(input.into(), robot_at(Point::ORIGIN));

    assert!(sim.is_feasible());
    assert!((sim.cruise_speed() - 2.0).abs() < 1e-9);

    for _ in 0..50 {
        sim.tick(DT).unwrap();
    }
    assert!(sim.is_at_goal());
    assert!(is_at_goal(sim.robot().location(), Point::new(0.0, 10.0), 1.0));
}

#[test]
fn point_far_away_is_infeasible() {
    init_tracing();
    let input = PointInput::new(Point::new(0.0, 100.0)).with_time(1.0);
    let mut sim = Simulator::new(input.into(), robot_at(Point::ORIGIN));

    assert!(!sim.is_feasible());
    assert!(matches!(sim.tick(DT), Err(SimulationError::Infeasible { .. })));
    assert!(!sim.is_at_goal());
}

#[test]
fn zero_time_uses_explicit_speed() {
    init_tracing();
    let input = PointInput::new(Point::new(0.0, 100.0)).with_speed(5.0);
    let mut sim = Simulator::new(input.into(), robot_at(Point::ORIGIN));

    assert!(sim.is_feasible());
    assert_eq!(sim.cruise_speed(), 5.0);
    let ticks = run(&mut sim, 30.0);
    assert!(sim.is_at_goal(), "stopped after {ticks} ticks");
}

#[test]
fn waypoint_is_visited_before_goal() {
    init_tracing();
    let input = PointInput::new(Point::new(0.0, 10.0))
        .with_time(10.0)
        .with_waypoints(vec![Point::new(5.0, 5.0)]);
    let mut sim = Simulator::new(input.into(), robot_at(Point::ORIGIN));
    assert_eq!(sim.path(), &[Point::new(5.0, 5.0), Point::new(0.0, 10.0)]);

    let mut closest = f64::INFINITY;
    for _ in 0..200 {
        if sim.tick(DT).unwrap() == SimState::AtGoal {
            break;
        }
        closest = closest.min(distance(sim.robot().location(), Point::new(5.0, 5.0)));
    }
    assert!(sim.is_at_goal());
    assert!(closest < 2.0_f64.sqrt());
}

#[test]
fn rectangle_loop_returns_to_origin() {
    init_tracing();
    let origin = Point::new(2.0, 1.0);
    let input = RectanglePathInput::new(origin, 3.0, 4.0, 0.0).with_time(14.0);
    let mut sim = Simulator::new(input.into(), robot_at(origin));

    assert!((sim.path_length() - 14.0).abs() < 1e-9);
    run(&mut sim, 40.0);
    assert!(sim.is_at_goal());
    assert_eq!(sim.current_vertex(), Some(origin));
    assert!(is_at_goal(sim.robot().location(), origin, 1.0));
}

#[test]
fn closed_path_does_not_finish_at_its_start() {
    init_tracing();
    let input = CirclePathInput::new(Point::ORIGIN, 2.0, 0.0).with_time(12.0);
    let mut sim = Simulator::new(input.into(), robot_at(Point::ORIGIN));

    // the robot starts on the goal but must drive the loop first
    assert_eq!(sim.tick(DT).unwrap(), SimState::Running);
    let ticks = run(&mut sim, 40.0);
    assert!(sim.is_at_goal());
    assert!(ticks > 20);
}

#[test]
fn circle_with_waypoints_reaches_goal() {
    init_tracing();
    let input = CirclePathInput::new(Point::ORIGIN, 3.0, 45.0)
        .with_time(20.0)
        .with_waypoints(vec![Point::new(-5.0, 3.0)]);
    let mut sim = Simulator::new(input.into(), robot_at(Point::ORIGIN));

    assert_eq!(sim.path().len(), 13);
    assert!((sim.path_length() - 6.0 * std::f64::consts::PI).abs() < 1e-9);
    run(&mut sim, 60.0);
    assert!(sim.is_at_goal());
}

#[test]
fn figure_eight_while_rotating() {
    init_tracing();
    let time = 15.0;
    let rate = rotation_rate_toward(90.0, 0.0, time);
    let input = FigureEightPathInput::new(Point::ORIGIN, 1.5, 2.0, -30.0)
        .with_time(time)
        .with_rotation(90.0, rate);
    let mut sim = Simulator::new(input.into(), robot_at(Point::ORIGIN));

    assert_eq!(sim.path().len(), 24);
    run(&mut sim, 60.0);
    assert!(sim.is_at_goal());
    let snapshot = sim.robot();
    assert!(snapshot.heading() > 0.0);
    assert_eq!(snapshot.rotation_rate, 0.0);
}

#[test]
fn general_input_drives_open_loop() {
    init_tracing();
    let input = GeneralInput::new(-90.0, 2.0, 0.0);
    let mut sim = Simulator::new(input.into(), robot_at(Point::ORIGIN));

    for _ in 0..10 {
        assert_eq!(sim.tick(DT).unwrap(), SimState::Running);
    }
    // -90° points along +X
    let location = sim.robot().location();
    assert!((location.x - 2.0).abs() < 1e-9);
    assert!(location.y.abs() < 1e-9);
    assert!(!sim.is_at_goal());
}

#[test]
fn wheel_input_spins_in_place() -> anyhow::Result<()> {
    init_tracing();
    let rates = WheelRates::new(-2.0, 2.0, -2.0, 2.0);
    let mut sim = Simulator::new(WheelInput::new(rates).into(), robot_at(Point::ORIGIN));

    for _ in 0..10 {
        sim.tick(DT)?;
    }
    let snapshot = sim.robot();
    assert_eq!(snapshot.location(), Point::ORIGIN);
    assert!(snapshot.heading() != 0.0);
    assert_eq!(snapshot.wheel_rates, rates);
    Ok(())
}

#[test]
fn first_frame_with_zero_dt_does_not_move() -> anyhow::Result<()> {
    init_tracing();
    let input: InputDescriptor = PointInput::new(Point::new(3.0, 4.0)).with_time(5.0).into();
    let mut sim = Simulator::new(input, robot_at(Point::ORIGIN));

    assert_eq!(sim.tick(0.0)?, SimState::Running);
    assert_eq!(sim.robot().location(), Point::ORIGIN);
    assert!(sim.robot().velocity.norm() > 0.0);
    Ok(())
}

#[test]
fn custom_tolerance_changes_arrival() {
    init_tracing();
    let config = SimulatorConfig {
        goal_tolerance: 0.1,
        slow_down_distance: 0.5,
        ..SimulatorConfig::default()
    };
    let input = PointInput::new(Point::new(0.0, 5.0)).with_time(5.0);
    let mut sim = Simulator::with_config(input.into(), robot_at(Point::ORIGIN), config);

    run(&mut sim, 20.0);
    assert!(sim.is_at_goal());
    assert!(is_at_goal(sim.robot().location(), Point::new(0.0, 5.0), 0.1));
}
