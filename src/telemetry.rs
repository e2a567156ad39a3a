use std::fmt;

use mecanum_kinematics::{Point, WheelRates};
use mecanum_navigation::RobotSnapshot;
use mecanum_navigation::geometry::round;

/// Renders `value` with at most three decimals, rounding half away from zero.
///
/// Trailing zeros are dropped and a negative zero prints as `0`.
pub fn format_decimal(value: f64) -> String {
    let rounded = round(value);
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// One line of operator-facing telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    /// Global-frame velocity (ft/s).
    pub velocity: Point,
    /// Rotation rate (deg/s).
    pub rotation_rate: f64,
    /// Heading (deg).
    pub direction: f64,
    pub position: Point,
    pub wheel_rates: WheelRates,
}

impl From<&RobotSnapshot> for StatusReport {
    fn from(snapshot: &RobotSnapshot) -> Self {
        StatusReport {
            velocity: snapshot.global_velocity,
            rotation_rate: snapshot.rotation_rate,
            direction: snapshot.heading(),
            position: snapshot.location(),
            wheel_rates: snapshot.wheel_rates,
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.wheel_rates;
        write!(
            f,
            "Velocity X: {} ft/s, Velocity Y: {} ft/s, Rotation Rate: {} deg/s, Direction: {} deg, \
             Position: ({}, {}), Wheels: [{}, {}, {}, {}] rad/s",
            format_decimal(self.velocity.x),
            format_decimal(self.velocity.y),
            format_decimal(self.rotation_rate),
            format_decimal(self.direction),
            format_decimal(self.position.x),
            format_decimal(self.position.y),
            format_decimal(w.front_left),
            format_decimal(w.front_right),
            format_decimal(w.rear_left),
            format_decimal(w.rear_right),
        )
    }
}
