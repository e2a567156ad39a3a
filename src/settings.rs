use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use mecanum_kinematics::{MecanumDrive, Pose};
use mecanum_navigation::{InputDescriptor, SimulatorConfig};
use serde::Deserialize;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const DEFAULT_SCENARIO_PATH: &str = "scenarios/point.toml";
const ENV_PREFIX: &str = "MECANUM";

/// Everything the runner needs, merged from the default file, one scenario
/// file and `MECANUM__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub robot: RobotSettings,
    pub run: RunSettings,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    pub scenario: InputDescriptor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RobotSettings {
    /// Wheel radius (ft).
    pub wheel_radius: f64,
    #[serde(default = "default_half_width")]
    pub half_width: f64,
    #[serde(default = "default_half_length")]
    pub half_length: f64,
    /// Pose the run starts from.
    #[serde(default)]
    pub start: Pose,
}

impl RobotSettings {
    pub fn drive(&self) -> Result<MecanumDrive, mecanum_kinematics::KinematicsError> {
        MecanumDrive::new(self.wheel_radius, self.half_width, self.half_length)
    }
}

fn default_half_width() -> f64 {
    MecanumDrive::DEFAULT_HALF_WIDTH
}

fn default_half_length() -> f64 {
    MecanumDrive::DEFAULT_HALF_LENGTH
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunSettings {
    /// Fixed frame step (s) when not pacing in real time.
    pub dt: f64,
    /// The run is abandoned after this much simulated time (s).
    pub max_duration: f64,
    /// Pace frames against the wall clock.
    #[serde(default)]
    pub realtime: bool,
    /// Log a telemetry line every this many frames; 0 disables it.
    #[serde(default)]
    pub telemetry_every: u32,
}

/// Loads `config/default.toml` plus one scenario file.
///
/// The scenario file is `scenario` when given, `scenarios/point.toml`
/// otherwise; it supplies the whole `[scenario]` table, which the defaults
/// never set.
pub fn load_settings(scenario: Option<&Path>) -> Result<Settings, ConfigError> {
    info!("Attempting to load configuration from {}", DEFAULT_CONFIG_PATH);

    let scenario = scenario.unwrap_or(Path::new(DEFAULT_SCENARIO_PATH));
    info!(path = %scenario.display(), "Layering scenario file");

    let result = layered(
        File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(true),
        File::from(scenario).format(FileFormat::Toml).required(true),
    );
    match result {
        Ok(settings) => {
            info!(scenario = settings.scenario.name(), "Successfully loaded configuration");
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

fn layered<D, S>(defaults: D, scenario: S) -> Result<Settings, ConfigError>
where
    D: Source + Send + Sync + 'static,
    S: Source + Send + Sync + 'static,
{
    Config::builder()
        .add_source(defaults)
        .add_source(scenario)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mecanum_kinematics::Point;

    const DEFAULTS: &str = include_str!("../config/default.toml");

    fn parse(toml: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_point_scenario() {
        let settings = parse(
            r#"
            [robot]
            wheel_radius = 0.25

            [run]
            dt = 0.1
            max_duration = 20.0

            [scenario]
            kind = "point"
            end_point = { x = 0.0, y = 10.0 }
            time = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.robot.half_width, 1.0);
        assert_eq!(settings.robot.half_length, 2.0);
        assert_eq!(settings.robot.start, Pose::default());
        assert!(!settings.run.realtime);
        assert_eq!(settings.simulator, SimulatorConfig::default());
        match settings.scenario {
            InputDescriptor::Point(p) => {
                assert_eq!(p.end_point, Point::new(0.0, 10.0));
                assert_eq!(p.time, 5.0);
                assert!(p.waypoints.is_empty());
            }
            other => panic!("unexpected scenario {other:?}"),
        }
    }

    #[test]
    fn test_figure_eight_with_waypoints_and_tuning() {
        let settings = parse(
            r#"
            [robot]
            wheel_radius = 0.3
            start = { location = { x = 1.0, y = 2.0 }, heading = 45.0 }

            [run]
            dt = 0.05
            max_duration = 60.0
            realtime = true
            telemetry_every = 10

            [simulator]
            goal_tolerance = 0.5

            [scenario]
            kind = "figure_eight"
            radius_one = 2.0
            radius_two = 3.0
            time = 20.0
            waypoints = [{ x = 4.0, y = 4.0 }]
            "#,
        )
        .unwrap();

        assert_eq!(settings.robot.start.location, Point::new(1.0, 2.0));
        assert_eq!(settings.simulator.goal_tolerance, 0.5);
        assert_eq!(settings.simulator.replan_interval, 0.1);
        assert_eq!(settings.run.telemetry_every, 10);
        assert_eq!(settings.scenario.waypoints(), &[Point::new(4.0, 4.0)]);
        assert!(settings.robot.drive().is_ok());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result = parse(
            r#"
            [robot]
            wheel_radius = 0.25
            [run]
            dt = 0.1
            max_duration = 1.0
            [scenario]
            kind = "spiral"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_with_bundled_point_scenario() {
        let settings = layered(
            File::from_str(DEFAULTS, FileFormat::Toml),
            File::from_str(include_str!("../scenarios/point.toml"), FileFormat::Toml),
        )
        .unwrap();
        assert_eq!(settings.run.dt, 0.1);
        assert_eq!(settings.scenario.time(), 5.0);
        assert_eq!(settings.scenario.name(), "point");
    }

    #[test]
    fn test_speed_only_scenario_has_no_time_budget() {
        let settings = layered(
            File::from_str(DEFAULTS, FileFormat::Toml),
            File::from_str(
                r#"
                [scenario]
                kind = "point"
                end_point = { x = 0.0, y = 100.0 }
                speed = 5.0
                "#,
                FileFormat::Toml,
            ),
        )
        .unwrap();
        assert_eq!(settings.scenario.time(), 0.0);
        assert_eq!(settings.scenario.speed(), 5.0);
        assert_eq!(settings.robot.wheel_radius, 0.25);
    }

    #[test]
    fn test_scenario_file_may_override_run_settings() {
        let settings = layered(
            File::from_str(DEFAULTS, FileFormat::Toml),
            File::from_str(include_str!("../scenarios/figure_eight.toml"), FileFormat::Toml),
        )
        .unwrap();
        assert!(settings.run.realtime);
        assert_eq!(settings.run.max_duration, 60.0);
        assert_eq!(settings.scenario.name(), "figure_eight");
        assert_eq!(settings.scenario.time(), 20.0);
    }
}
