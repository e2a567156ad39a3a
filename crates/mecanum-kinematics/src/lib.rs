#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for four-wheel mecanum drive kinematics."]
#![doc = ""]
#![doc = "This crate provides planar point and pose types, forward and inverse mecanum"]
#![doc = "kinematics, the robot-to-global frame transform, and pose integration."]
#![doc = ""]
#![doc = "Units follow the field convention: feet, degrees, feet/second and degrees/second."]
#![doc = "Headings are measured from the +Y axis and grow toward -X."]

use core::f64::consts::PI;
use core::fmt;
use core::ops::{Add, Mul, Sub};
use libm::{cos, hypot, sin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::KinematicsError;

/// Converts degrees to radians without relying on `std`.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Converts radians to degrees without relying on `std`.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// A point (or planar vector) in field coordinates, in feet.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Field x coordinate (ft).
    pub x: f64,
    /// Field y coordinate (ft).
    pub y: f64,
}

impl Point {
    /// The field origin.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Construct a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean length of the point taken as a vector.
    pub fn norm(&self) -> f64 {
        hypot(self.x, self.y)
    }

    /// Unit vector pointing along `heading` degrees (0° is +Y, positive toward -X).
    pub fn from_heading(heading: f64) -> Self {
        let theta = deg_to_rad(heading);
        Point::new(-sin(theta), cos(theta))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A planar pose: a location in feet and a heading in degrees.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Location in the global reference frame (ft).
    pub location: Point,
    /// Heading (deg). 0° is +Y, positive toward -X. Not normalized.
    pub heading: f64,
}

impl Pose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `location`: Global-frame location in feet.
    /// * `heading`: Heading in degrees.
    pub const fn new(location: Point, heading: f64) -> Self {
        Pose { location, heading }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(x: {:.3} ft, y: {:.3} ft, θ: {:.3}°)",
            self.location.x, self.location.y, self.heading
        )
    }
}

/// Chassis velocity expressed in the robot's own frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisVelocity {
    /// Lateral velocity (ft/s) along the robot's x-axis.
    pub vx: f64,
    /// Forward velocity (ft/s) along the robot's y-axis.
    pub vy: f64,
    /// Rotation rate of the chassis (deg/s).
    pub omega: f64,
}

impl ChassisVelocity {
    /// Construct chassis velocities.
    ///
    /// # Arguments
    ///
    /// * `vx`: Lateral velocity (ft/s).
    /// * `vy`: Forward velocity (ft/s).
    /// * `omega`: Rotation rate (deg/s).
    pub const fn new(vx: f64, vy: f64, omega: f64) -> Self {
        ChassisVelocity { vx, vy, omega }
    }

    /// The translational part as a vector.
    pub fn linear(&self) -> Point {
        Point::new(self.vx, self.vy)
    }

    /// Magnitude of the translational part (ft/s).
    pub fn speed(&self) -> f64 {
        hypot(self.vx, self.vy)
    }
}

impl fmt::Display for ChassisVelocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(vx: {:.3} ft/s, vy: {:.3} ft/s, ω: {:.3}°/s)",
            self.vx, self.vy, self.omega
        )
    }
}

/// Angular rates of the four mecanum wheels.
///
/// Index convention: 1 = front-left, 2 = front-right, 3 = rear-left, 4 = rear-right.
/// The sign pattern of every formula depends on this ordering.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelRates {
    /// Wheel 1, front-left.
    pub front_left: f64,
    /// Wheel 2, front-right.
    pub front_right: f64,
    /// Wheel 3, rear-left.
    pub rear_left: f64,
    /// Wheel 4, rear-right.
    pub rear_right: f64,
}

impl WheelRates {
    /// Construct wheel rates in index order (front-left, front-right, rear-left, rear-right).
    pub const fn new(front_left: f64, front_right: f64, rear_left: f64, rear_right: f64) -> Self {
        WheelRates {
            front_left,
            front_right,
            rear_left,
            rear_right,
        }
    }

    /// Rates in index order.
    pub const fn to_array(self) -> [f64; 4] {
        [self.front_left, self.front_right, self.rear_left, self.rear_right]
    }

    /// Build from rates in index order.
    pub const fn from_array(rates: [f64; 4]) -> Self {
        WheelRates::new(rates[0], rates[1], rates[2], rates[3])
    }
}

impl fmt::Display for WheelRates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(1: {:.3}, 2: {:.3}, 3: {:.3}, 4: {:.3})",
            self.front_left, self.front_right, self.rear_left, self.rear_right
        )
    }
}

/// Rotate a velocity expressed in the robot's heading frame into the global frame.
///
/// `x' = cos(θ)x − sin(θ)y`, `y' = sin(θ)x + cos(θ)y` with θ the heading in radians.
pub fn to_global_frame(local: Point, heading: f64) -> Point {
    let theta = deg_to_rad(heading);
    let (s, c) = (sin(theta), cos(theta));
    Point::new(c * local.x - s * local.y, s * local.x + c * local.y)
}

/// Four-wheel mecanum kinematics helper.
///
/// Holds the physical parameters of the drivetrain: wheel radius, half track
/// width and half wheelbase, all in feet.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MecanumDrive {
    wheel_radius: f64,
    half_width: f64,
    half_length: f64,
}

impl MecanumDrive {
    /// Default half track width (ft).
    pub const DEFAULT_HALF_WIDTH: f64 = 1.0;
    /// Default half wheelbase (ft).
    pub const DEFAULT_HALF_LENGTH: f64 = 2.0;

    /// Construct a new mecanum kinematics helper.
    ///
    /// # Arguments
    ///
    /// * `wheel_radius`: Wheel radius in feet.
    /// * `half_width`: Lateral distance from the chassis center to a wheel, in feet.
    /// * `half_length`: Longitudinal distance from the chassis center to an axle, in feet.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidWheelRadius)` if `wheel_radius` is not positive.
    /// Returns `Err(KinematicsError::InvalidTrackGeometry)` if either half distance is not positive.
    pub const fn new(
        wheel_radius: f64,
        half_width: f64,
        half_length: f64,
    ) -> Result<Self, KinematicsError> {
        // Written as negated comparisons so NaN is rejected too.
        if !(wheel_radius > 0.0) {
            return Err(KinematicsError::InvalidWheelRadius("must be positive"));
        }
        if !(half_width > 0.0) || !(half_length > 0.0) {
            return Err(KinematicsError::InvalidTrackGeometry("must be positive"));
        }
        Ok(MecanumDrive {
            wheel_radius,
            half_width,
            half_length,
        })
    }

    /// Construct a drive with the default track geometry.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidWheelRadius)` if `wheel_radius` is not positive.
    pub const fn with_wheel_radius(wheel_radius: f64) -> Result<Self, KinematicsError> {
        Self::new(
            wheel_radius,
            Self::DEFAULT_HALF_WIDTH,
            Self::DEFAULT_HALF_LENGTH,
        )
    }

    /// Returns the wheel radius.
    pub fn wheel_radius(&self) -> f64 {
        self.wheel_radius
    }

    /// Returns the half track width.
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Returns the half wheelbase.
    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    fn lever(&self) -> f64 {
        self.half_width + self.half_length
    }

    /// Calculates the chassis velocity produced by the four wheel rates.
    /// This is the forward kinematics problem.
    pub fn forward_kinematics(&self, wheels: WheelRates) -> ChassisVelocity {
        let WheelRates {
            front_left: w1,
            front_right: w2,
            rear_left: w3,
            rear_right: w4,
        } = wheels;
        let r = self.wheel_radius;

        let vx = (r / 4.0) * (w1 - w2 - w3 + w4);
        let vy = (r / 4.0) * (w1 + w2 + w3 + w4);
        let omega = (r / (4.0 * self.lever())) * (-w1 + w2 - w3 + w4);

        ChassisVelocity::new(vx, vy, omega)
    }

    /// Calculates the wheel rates required to achieve the given chassis velocity.
    /// This is the inverse kinematics problem.
    pub fn inverse_kinematics(&self, chassis: ChassisVelocity) -> WheelRates {
        let ChassisVelocity { vx, vy, omega } = chassis;
        let turn = omega * self.lever();
        let inv_r = 1.0 / self.wheel_radius;

        WheelRates::new(
            inv_r * (vx + vy - turn),
            inv_r * (-vx + vy + turn),
            inv_r * (-vx + vy - turn),
            inv_r * (vx + vy + turn),
        )
    }

    /// Advances a pose by `dt` seconds under a constant robot-frame chassis velocity.
    ///
    /// The heading is integrated first; the linear velocity is then rotated into
    /// the global frame using the new heading and integrated into the location.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidTimeDelta)` if `dt` is negative or not finite.
    pub fn update_pose(
        &self,
        current: Pose,
        chassis: ChassisVelocity,
        dt: f64,
    ) -> Result<Pose, KinematicsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(KinematicsError::InvalidTimeDelta(
                "must be finite and non-negative",
            ));
        }

        let heading = current.heading + chassis.omega * dt;
        let global = to_global_frame(chassis.linear(), heading);

        Ok(Pose {
            location: current.location + global * dt,
            heading,
        })
    }

    /// Convenience function to advance a pose directly from wheel rates.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidTimeDelta)` if `dt` is negative or not finite.
    pub fn update_pose_from_wheel_rates(
        &self,
        current: Pose,
        wheels: WheelRates,
        dt: f64,
    ) -> Result<Pose, KinematicsError> {
        let chassis = self.forward_kinematics(wheels);
        self.update_pose(current, chassis, dt)
    }
}

impl fmt::Display for MecanumDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MecanumDrive (r: {:.3} ft, W/2: {:.3} ft, L/2: {:.3} ft)",
            self.wheel_radius, self.half_width, self.half_length
        )
    }
}
