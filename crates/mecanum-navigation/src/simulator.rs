//! Frame-driven simulation loop.
//!
//! A [`Simulator`] owns one [`Robot`] and one [`InputDescriptor`] for the
//! whole run. The host calls [`Simulator::tick`] once per frame with the
//! elapsed time; steering is recomputed every re-planning interval while the
//! pose is integrated on every frame.

use mecanum_kinematics::{KinematicsError, Point};

use crate::config::SimulatorConfig;
use crate::error::SimulationError;
use crate::geometry::{bearing, distance, is_at_goal};
use crate::input::InputDescriptor;
use crate::path::{PathPlan, cruise_speed, is_feasible};
use crate::robot::{Robot, RobotSnapshot};

/// Lifecycle of a run. `AtGoal` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Still driving; open-loop inputs never leave this state.
    Running,
    /// Stopped within tolerance of the final vertex.
    AtGoal,
}

/// Drives one robot with one input until the goal is reached.
#[derive(Debug, Clone)]
pub struct Simulator {
    robot: Robot,
    input: InputDescriptor,
    plan: Option<PathPlan>,
    vertex_index: usize,
    cruise_speed: f64,
    required_speed: f64,
    feasible: bool,
    /// Seconds since the last re-plan; `None` until the first one.
    replan_timer: Option<f64>,
    state: SimState,
    config: SimulatorConfig,
}

impl Simulator {
    /// Simulator with the default field constants.
    pub fn new(input: InputDescriptor, robot: Robot) -> Self {
        Simulator::with_config(input, robot, SimulatorConfig::default())
    }

    /// Builds the path from the robot's current location and checks it
    /// against the time budget. An infeasible simulator refuses to tick.
    pub fn with_config(input: InputDescriptor, robot: Robot, config: SimulatorConfig) -> Self {
        let plan = PathPlan::build(&input, robot.location());
        let length = plan.as_ref().map_or(0.0, PathPlan::length);
        let time = input.time();

        let feasible = is_feasible(length, time, config.max_speed);
        let required_speed = if time > 0.0 { length / time } else { 0.0 };
        let cruise = cruise_speed(length, time, input.speed());

        if feasible {
            tracing::debug!(
                kind = input.name(),
                length,
                cruise_speed = cruise,
                "simulator ready"
            );
        } else {
            tracing::warn!(
                kind = input.name(),
                length,
                time,
                required_speed,
                max_speed = config.max_speed,
                "path cannot be completed in the requested time"
            );
        }

        Simulator {
            robot,
            input,
            plan,
            vertex_index: 0,
            cruise_speed: cruise,
            required_speed,
            feasible,
            replan_timer: None,
            state: SimState::Running,
            config,
        }
    }

    /// Advances the run by `dt` seconds.
    ///
    /// # Errors
    ///
    /// * [`SimulationError::Infeasible`] if the path cannot be completed in time.
    /// * [`SimulationError::Kinematics`] if `dt` is negative or not finite.
    ///
    /// The simulator is left untouched on error.
    pub fn tick(&mut self, dt: f64) -> Result<SimState, SimulationError> {
        if !self.feasible {
            return Err(SimulationError::Infeasible {
                required: self.required_speed,
                max: self.config.max_speed,
            });
        }
        if !dt.is_finite() || dt < 0.0 {
            return Err(KinematicsError::InvalidTimeDelta("must be finite and non-negative").into());
        }
        if self.state == SimState::AtGoal {
            return Ok(SimState::AtGoal);
        }

        let due = match self.replan_timer {
            None => true,
            Some(elapsed) => elapsed + dt >= self.config.replan_interval,
        };
        if due {
            self.replan_timer = Some(0.0);
            self.replan();
        } else if let Some(elapsed) = self.replan_timer.as_mut() {
            *elapsed += dt;
        }

        if self.state == SimState::Running {
            self.robot.advance(dt)?;
        }
        Ok(self.state)
    }

    fn replan(&mut self) {
        match self.input {
            InputDescriptor::Wheels(w) => {
                let chassis = self.robot.drive().forward_kinematics(w.rates);
                self.robot.set_command(chassis.linear(), chassis.omega);
            }
            InputDescriptor::General(g) => {
                let offset = g.direction - self.robot.heading();
                self.robot
                    .set_command(Point::from_heading(offset) * g.speed, g.rotation_rate);
            }
            InputDescriptor::Point(_)
            | InputDescriptor::Rectangle(_)
            | InputDescriptor::Circle(_)
            | InputDescriptor::FigureEight(_) => self.steer_along_path(),
        }
    }

    fn steer_along_path(&mut self) {
        let Some(plan) = &self.plan else {
            return;
        };
        let location = self.robot.location();
        let tolerance = self.config.goal_tolerance;

        let last = plan.last_index();
        if self.vertex_index == last && is_at_goal(location, plan.goal(), tolerance) {
            self.robot.stop();
            self.state = SimState::AtGoal;
            tracing::info!(x = location.x, y = location.y, "goal reached");
            return;
        }
        if self.vertex_index < last
            && is_at_goal(location, plan.vertices()[self.vertex_index], tolerance)
        {
            self.vertex_index += 1;
            tracing::debug!(index = self.vertex_index, "advancing to next vertex");
        }

        let target = plan.vertices()[self.vertex_index];
        let speed = if distance(location, target) <= self.config.slow_down_distance {
            self.cruise_speed / 2.0
        } else {
            self.cruise_speed
        };
        let offset = bearing(location, target) - self.robot.heading();
        self.robot
            .set_command(Point::from_heading(offset) * speed, self.input.rotation_rate());
    }

    /// Value copy of the robot state.
    ///
    /// Wheel-rate inputs report the commanded rates; every other input reports
    /// the rates derived from the current chassis command.
    pub fn robot(&self) -> RobotSnapshot {
        let mut snapshot = self.robot.snapshot();
        if let InputDescriptor::Wheels(w) = &self.input {
            snapshot.wheel_rates = w.rates;
        }
        snapshot
    }

    /// Whether the run has ended at its goal.
    pub fn is_at_goal(&self) -> bool {
        self.state == SimState::AtGoal
    }

    /// Whether the path fits its time budget. Infeasible runs never tick.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SimState {
        self.state
    }

    /// The input driving the run.
    pub fn input(&self) -> &InputDescriptor {
        &self.input
    }

    /// Tuning in effect.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Ordered target vertices; empty for open-loop inputs.
    pub fn path(&self) -> &[Point] {
        self.plan.as_ref().map(PathPlan::vertices).unwrap_or(&[])
    }

    /// Exact length of the described path (ft); 0 for open-loop inputs.
    pub fn path_length(&self) -> f64 {
        self.plan.as_ref().map_or(0.0, PathPlan::length)
    }

    /// Average speed the path is driven at (ft/s).
    pub fn cruise_speed(&self) -> f64 {
        self.cruise_speed
    }

    /// Vertex currently steered toward, if the input follows a path.
    pub fn current_vertex(&self) -> Option<Point> {
        self.path().get(self.vertex_index).copied()
    }

    /// Index of [`Simulator::current_vertex`] in [`Simulator::path`].
    pub fn current_vertex_index(&self) -> usize {
        self.vertex_index
    }
}
