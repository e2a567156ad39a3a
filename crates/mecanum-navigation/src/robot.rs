//! The simulated robot and the read-only snapshots handed out of the simulator.

use mecanum_kinematics::{
    ChassisVelocity, KinematicsError, MecanumDrive, Point, Pose, WheelRates, to_global_frame,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{round, round_point};

/// Mutable robot state advanced by the simulator.
///
/// `velocity` is the commanded velocity in the robot's own frame; it is only
/// rewritten on re-plan, and rotated into the global frame on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    drive: MecanumDrive,
    pose: Pose,
    velocity: Point,
    rotation_rate: f64,
}

impl Robot {
    /// A stationary robot at `pose`.
    pub fn new(drive: MecanumDrive, pose: Pose) -> Self {
        Robot {
            drive,
            pose,
            velocity: Point::ORIGIN,
            rotation_rate: 0.0,
        }
    }

    /// A stationary robot using the default track geometry.
    ///
    /// # Errors
    ///
    /// Fails when `wheel_radius` is not positive.
    pub fn with_wheel_radius(wheel_radius: f64, pose: Pose) -> Result<Self, KinematicsError> {
        Ok(Robot::new(MecanumDrive::with_wheel_radius(wheel_radius)?, pose))
    }

    /// Drivetrain geometry.
    pub fn drive(&self) -> &MecanumDrive {
        &self.drive
    }

    /// Current pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Current location (ft).
    pub fn location(&self) -> Point {
        self.pose.location
    }

    /// Current heading (deg).
    pub fn heading(&self) -> f64 {
        self.pose.heading
    }

    /// Wheel radius (ft).
    pub fn wheel_radius(&self) -> f64 {
        self.drive.wheel_radius()
    }

    /// Robot-frame commanded velocity (ft/s).
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Rotation rate (deg/s).
    pub fn rotation_rate(&self) -> f64 {
        self.rotation_rate
    }

    /// Current command as a chassis velocity.
    pub fn chassis_velocity(&self) -> ChassisVelocity {
        ChassisVelocity::new(self.velocity.x, self.velocity.y, self.rotation_rate)
    }

    /// Commanded velocity expressed in the global frame at the current heading.
    pub fn global_velocity(&self) -> Point {
        to_global_frame(self.velocity, self.pose.heading)
    }

    /// Wheel rates needed for the current command. Derived, never stored.
    pub fn wheel_rates(&self) -> WheelRates {
        self.drive.inverse_kinematics(self.chassis_velocity())
    }

    /// Replaces the robot-frame velocity (ft/s) and rotation rate (deg/s).
    pub fn set_command(&mut self, velocity: Point, rotation_rate: f64) {
        self.velocity = velocity;
        self.rotation_rate = rotation_rate;
    }

    /// Zeroes the command.
    pub fn stop(&mut self) {
        self.set_command(Point::ORIGIN, 0.0);
    }

    /// Integrates the current command over `dt` seconds.
    ///
    /// The pose is replaced as a whole; every stored component is rounded to
    /// three decimals so drift cannot accumulate over long runs.
    pub fn advance(&mut self, dt: f64) -> Result<Pose, KinematicsError> {
        let next = self
            .drive
            .update_pose(self.pose, self.chassis_velocity(), dt)?;
        self.pose = Pose::new(round_point(next.location), round(next.heading));
        Ok(self.pose)
    }

    /// Value copy of the current state.
    pub fn snapshot(&self) -> RobotSnapshot {
        RobotSnapshot {
            pose: self.pose,
            velocity: self.velocity,
            global_velocity: self.global_velocity(),
            rotation_rate: self.rotation_rate,
            wheel_rates: self.wheel_rates(),
            wheel_radius: self.drive.wheel_radius(),
        }
    }
}

/// Read-only copy of the robot state handed to renderers and telemetry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotSnapshot {
    /// Location (ft) and heading (deg).
    pub pose: Pose,
    /// Robot-frame velocity (ft/s).
    pub velocity: Point,
    /// Global-frame velocity (ft/s).
    pub global_velocity: Point,
    /// Rotation rate (deg/s).
    pub rotation_rate: f64,
    /// Wheel rates (rad/s).
    pub wheel_rates: WheelRates,
    /// Wheel radius (ft).
    pub wheel_radius: f64,
}

impl RobotSnapshot {
    /// Location (ft).
    pub fn location(&self) -> Point {
        self.pose.location
    }

    /// Heading (deg).
    pub fn heading(&self) -> f64 {
        self.pose.heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn robot() -> Robot {
        Robot::with_wheel_radius(0.25, Pose::default()).unwrap()
    }

    #[test]
    fn test_new_robot_is_stationary() {
        let r = robot();
        assert_eq!(r.velocity(), Point::ORIGIN);
        assert_eq!(r.rotation_rate(), 0.0);
        assert_eq!(r.wheel_rates(), WheelRates::default());
        assert_eq!(r.wheel_radius(), 0.25);
    }

    #[test]
    fn test_invalid_radius() {
        assert!(Robot::with_wheel_radius(0.0, Pose::default()).is_err());
    }

    #[test]
    fn test_wheel_rates_follow_command() {
        let mut r = robot();
        r.set_command(Point::new(0.0, 2.0), 0.0);
        // vy = 2 ft/s on r = 0.25 ft wheels => 8 rad/s on every wheel
        for w in r.wheel_rates().to_array() {
            assert!((w - 8.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_advance_rounds_pose() {
        let mut r = robot();
        r.set_command(Point::new(0.0, 1.0 / 3.0), 10.0 / 3.0);
        let pose = r.advance(0.1).unwrap();
        assert_eq!(pose.heading, 0.333);
        assert_eq!(pose, r.pose());
        assert_eq!(pose.location.x, round(pose.location.x));
        assert_eq!(pose.location.y, round(pose.location.y));
    }

    #[test]
    fn test_advance_rotates_command_into_global_frame() {
        let mut r = Robot::with_wheel_radius(0.25, Pose::new(Point::ORIGIN, 90.0)).unwrap();
        r.set_command(Point::new(0.0, 1.0), 0.0);
        let pose = r.advance(1.0).unwrap();
        assert_eq!(pose.location, Point::new(-1.0, 0.0));
        let g = r.snapshot().global_velocity;
        assert!((g.x + 1.0).abs() < 1e-9 && g.y.abs() < 1e-9);
    }

    #[test]
    fn test_advance_rejects_negative_dt() {
        let mut r = robot();
        assert!(r.advance(-1.0).is_err());
        assert_eq!(r.pose(), Pose::default());
    }

    #[test]
    fn test_stop() {
        let mut r = robot();
        r.set_command(Point::new(1.0, 1.0), 5.0);
        r.stop();
        assert_eq!(r.chassis_velocity(), ChassisVelocity::default());
    }
}
