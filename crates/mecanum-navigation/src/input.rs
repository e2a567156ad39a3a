//! Control inputs accepted by the simulator.
//!
//! Exactly one [`InputDescriptor`] drives a run. Path-following variants carry
//! a time budget from which the cruise speed is derived once the path length is
//! known; a non-positive time falls back to the explicit `speed`.

use mecanum_kinematics::{MecanumDrive, Point, WheelRates};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Rotation rate (deg/s) that turns `start_heading` into `end_orientation` over `time` seconds.
///
/// Returns 0 when `time` is not positive.
pub fn rotation_rate_toward(end_orientation: f64, start_heading: f64, time: f64) -> f64 {
    if time > 0.0 {
        (end_orientation - start_heading) / time
    } else {
        0.0
    }
}

/// Direct per-wheel angular rates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelInput {
    /// Commanded wheel rates (rad/s).
    pub rates: WheelRates,
}

impl WheelInput {
    /// Wraps a set of wheel rates.
    pub const fn new(rates: WheelRates) -> Self {
        WheelInput { rates }
    }
}

/// Open-loop heading-hold command with no goal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeneralInput {
    /// Travel direction in the global frame (deg).
    pub direction: f64,
    /// Translational speed (ft/s).
    pub speed: f64,
    /// Rotation rate (deg/s).
    pub rotation_rate: f64,
}

impl GeneralInput {
    /// Command `speed` along `direction` while rotating at `rotation_rate`.
    pub const fn new(direction: f64, speed: f64, rotation_rate: f64) -> Self {
        GeneralInput {
            direction,
            speed,
            rotation_rate,
        }
    }
}

/// Drive through optional waypoints to a single end point.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointInput {
    /// Goal location.
    pub end_point: Point,
    /// Used only when `time` is not positive (ft/s).
    pub speed: f64,
    /// Time budget (s).
    pub time: f64,
    /// Heading (deg) the robot should face at the end of the run.
    pub end_orientation: f64,
    /// Rotation rate (deg/s) applied along the way.
    pub rotation_rate: f64,
    /// Extra points to visit, ordered by nearest insertion.
    pub waypoints: Vec<Point>,
}

impl PointInput {
    /// Drive to `end_point` with no time budget, speed or waypoints.
    pub fn new(end_point: Point) -> Self {
        PointInput {
            end_point,
            ..Default::default()
        }
    }
}

/// Clockwise rectangle whose first side leaves `origin` along `inclination`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RectanglePathInput {
    /// Start and end of the loop.
    pub origin: Point,
    /// Length (ft) of the sides walked across the inclination.
    pub top_length: f64,
    /// Length (ft) of the sides walked along the inclination.
    pub side_length: f64,
    /// Direction (deg) the shape extends from the origin.
    pub inclination: f64,
    /// Heading (deg) the robot should face at the end of the run.
    pub end_orientation: f64,
    /// Rotation rate (deg/s) applied along the way.
    pub rotation_rate: f64,
    /// Cruise speed (ft/s) used when `time` is not positive.
    pub speed: f64,
    /// Time budget (s).
    pub time: f64,
    /// Extra points to visit, ordered by nearest insertion.
    pub waypoints: Vec<Point>,
}

impl RectanglePathInput {
    /// Rectangle starting at `origin`, with no time budget or waypoints.
    pub fn new(origin: Point, top_length: f64, side_length: f64, inclination: f64) -> Self {
        RectanglePathInput {
            origin,
            top_length,
            side_length,
            inclination,
            ..Default::default()
        }
    }
}

/// Circle through `origin` whose center lies `radius` away along `inclination`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CirclePathInput {
    /// Start and end of the loop.
    pub origin: Point,
    /// Radius (ft).
    pub radius: f64,
    /// Direction (deg) the shape extends from the origin.
    pub inclination: f64,
    /// Heading (deg) the robot should face at the end of the run.
    pub end_orientation: f64,
    /// Rotation rate (deg/s) applied along the way.
    pub rotation_rate: f64,
    /// Cruise speed (ft/s) used when `time` is not positive.
    pub speed: f64,
    /// Time budget (s).
    pub time: f64,
    /// Extra points to visit, ordered by nearest insertion.
    pub waypoints: Vec<Point>,
}

impl CirclePathInput {
    /// Circle through `origin`, with no time budget or waypoints.
    pub fn new(origin: Point, radius: f64, inclination: f64) -> Self {
        CirclePathInput {
            origin,
            radius,
            inclination,
            ..Default::default()
        }
    }
}

/// Two tangent circles stacked along `inclination`: `radius_one` nearest the origin.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FigureEightPathInput {
    /// Start and end of the loop.
    pub origin: Point,
    /// Radius (ft) of the circle touching the origin.
    pub radius_one: f64,
    /// Radius (ft) of the far circle.
    pub radius_two: f64,
    /// Direction (deg) the shape extends from the origin.
    pub inclination: f64,
    /// Heading (deg) the robot should face at the end of the run.
    pub end_orientation: f64,
    /// Rotation rate (deg/s) applied along the way.
    pub rotation_rate: f64,
    /// Cruise speed (ft/s) used when `time` is not positive.
    pub speed: f64,
    /// Time budget (s).
    pub time: f64,
    /// Extra points to visit, ordered by nearest insertion.
    pub waypoints: Vec<Point>,
}

impl FigureEightPathInput {
    /// Figure eight starting at `origin`, with no time budget or waypoints.
    pub fn new(origin: Point, radius_one: f64, radius_two: f64, inclination: f64) -> Self {
        FigureEightPathInput {
            origin,
            radius_one,
            radius_two,
            inclination,
            ..Default::default()
        }
    }
}

macro_rules! path_builders {
    ($($ty:ty),* $(,)?) => {$(
        impl $ty {
            /// Time budget (s) from which the cruise speed is derived.
            pub fn with_time(mut self, time: f64) -> Self {
                self.time = time;
                self
            }

            /// Explicit cruise speed (ft/s), used when no time budget is given.
            pub fn with_speed(mut self, speed: f64) -> Self {
                self.speed = speed;
                self
            }

            /// Target end orientation (deg) and the rotation rate (deg/s) applied along the way.
            pub fn with_rotation(mut self, end_orientation: f64, rotation_rate: f64) -> Self {
                self.end_orientation = end_orientation;
                self.rotation_rate = rotation_rate;
                self
            }

            /// Points to visit along the path.
            pub fn with_waypoints(mut self, waypoints: Vec<Point>) -> Self {
                self.waypoints = waypoints;
                self
            }
        }
    )*};
}

path_builders!(
    PointInput,
    RectanglePathInput,
    CirclePathInput,
    FigureEightPathInput,
);

/// The closed set of inputs that can drive a run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq)]
pub enum InputDescriptor {
    /// Raw wheel rates.
    Wheels(WheelInput),
    /// Direction, speed and rotation held open loop.
    General(GeneralInput),
    /// Single end point, optionally through waypoints.
    Point(PointInput),
    /// Closed rectangle.
    Rectangle(RectanglePathInput),
    /// Closed circle.
    Circle(CirclePathInput),
    /// Closed figure eight.
    FigureEight(FigureEightPathInput),
}

impl InputDescriptor {
    /// Short lowercase name of the variant, as used in scenario files.
    pub fn name(&self) -> &'static str {
        match self {
            InputDescriptor::Wheels(_) => "wheels",
            InputDescriptor::General(_) => "general",
            InputDescriptor::Point(_) => "point",
            InputDescriptor::Rectangle(_) => "rectangle",
            InputDescriptor::Circle(_) => "circle",
            InputDescriptor::FigureEight(_) => "figure_eight",
        }
    }

    /// Whether the input steers toward vertices and can reach a goal.
    pub fn is_path_following(&self) -> bool {
        !matches!(
            self,
            InputDescriptor::Wheels(_) | InputDescriptor::General(_)
        )
    }

    /// Time budget (s); open-loop inputs have none and report 0.
    pub fn time(&self) -> f64 {
        match self {
            InputDescriptor::Wheels(_) | InputDescriptor::General(_) => 0.0,
            InputDescriptor::Point(p) => p.time,
            InputDescriptor::Rectangle(p) => p.time,
            InputDescriptor::Circle(p) => p.time,
            InputDescriptor::FigureEight(p) => p.time,
        }
    }

    /// Commanded speed (ft/s): the general speed, or a path's explicit fallback speed.
    pub fn speed(&self) -> f64 {
        match self {
            InputDescriptor::Wheels(_) => 0.0,
            InputDescriptor::General(g) => g.speed,
            InputDescriptor::Point(p) => p.speed,
            InputDescriptor::Rectangle(p) => p.speed,
            InputDescriptor::Circle(p) => p.speed,
            InputDescriptor::FigureEight(p) => p.speed,
        }
    }

    /// Commanded rotation rate (deg/s); 0 for wheel inputs.
    pub fn rotation_rate(&self) -> f64 {
        match self {
            InputDescriptor::Wheels(_) => 0.0,
            InputDescriptor::General(g) => g.rotation_rate,
            InputDescriptor::Point(p) => p.rotation_rate,
            InputDescriptor::Rectangle(p) => p.rotation_rate,
            InputDescriptor::Circle(p) => p.rotation_rate,
            InputDescriptor::FigureEight(p) => p.rotation_rate,
        }
    }

    /// Waypoints of a path input; empty for open-loop inputs.
    pub fn waypoints(&self) -> &[Point] {
        match self {
            InputDescriptor::Wheels(_) | InputDescriptor::General(_) => &[],
            InputDescriptor::Point(p) => &p.waypoints,
            InputDescriptor::Rectangle(p) => &p.waypoints,
            InputDescriptor::Circle(p) => &p.waypoints,
            InputDescriptor::FigureEight(p) => &p.waypoints,
        }
    }

    /// Checks user-supplied numbers before a run is attempted.
    ///
    /// Path feasibility against the time budget is a separate check made by
    /// the simulator once the path length is known.
    pub fn validate(&self, drive: &MecanumDrive, max_speed: f64) -> Result<(), InputError> {
        match self {
            InputDescriptor::Wheels(w) => {
                for rate in w.rates.to_array() {
                    finite("wheel rate", rate)?;
                }
                let speed = drive.forward_kinematics(w.rates).speed();
                if speed > max_speed {
                    return Err(InputError::SpeedTooHigh {
                        requested: speed,
                        max: max_speed,
                    });
                }
            }
            InputDescriptor::General(g) => {
                finite("direction", g.direction)?;
                finite("rotation rate", g.rotation_rate)?;
                check_speed(g.speed, max_speed)?;
            }
            InputDescriptor::Point(p) => {
                finite_point("end point", p.end_point)?;
            }
            InputDescriptor::Rectangle(p) => {
                finite_point("origin", p.origin)?;
                finite("inclination", p.inclination)?;
                non_negative("top length", p.top_length)?;
                non_negative("side length", p.side_length)?;
            }
            InputDescriptor::Circle(p) => {
                finite_point("origin", p.origin)?;
                finite("inclination", p.inclination)?;
                non_negative("radius", p.radius)?;
            }
            InputDescriptor::FigureEight(p) => {
                finite_point("origin", p.origin)?;
                finite("inclination", p.inclination)?;
                non_negative("radius one", p.radius_one)?;
                non_negative("radius two", p.radius_two)?;
            }
        }

        if self.is_path_following() {
            finite("time", self.time())?;
            finite("rotation rate", self.rotation_rate())?;
            check_speed(self.speed(), max_speed)?;
            for waypoint in self.waypoints() {
                finite_point("waypoint", *waypoint)?;
            }
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NotFinite(field))
    }
}

fn finite_point(field: &'static str, p: Point) -> Result<(), InputError> {
    finite(field, p.x)?;
    finite(field, p.y)
}

fn non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(InputError::NegativeLength { field, value });
    }
    Ok(())
}

fn check_speed(speed: f64, max_speed: f64) -> Result<(), InputError> {
    finite("speed", speed)?;
    if speed < 0.0 {
        return Err(InputError::NegativeSpeed(speed));
    }
    if speed > max_speed {
        return Err(InputError::SpeedTooHigh {
            requested: speed,
            max: max_speed,
        });
    }
    Ok(())
}

impl From<WheelInput> for InputDescriptor {
    fn from(input: WheelInput) -> Self {
        InputDescriptor::Wheels(input)
    }
}

impl From<GeneralInput> for InputDescriptor {
    fn from(input: GeneralInput) -> Self {
        InputDescriptor::General(input)
    }
}

impl From<PointInput> for InputDescriptor {
    fn from(input: PointInput) -> Self {
        InputDescriptor::Point(input)
    }
}

impl From<RectanglePathInput> for InputDescriptor {
    fn from(input: RectanglePathInput) -> Self {
        InputDescriptor::Rectangle(input)
    }
}

impl From<CirclePathInput> for InputDescriptor {
    fn from(input: CirclePathInput) -> Self {
        InputDescriptor::Circle(input)
    }
}

impl From<FigureEightPathInput> for InputDescriptor {
    fn from(input: FigureEightPathInput) -> Self {
        InputDescriptor::FigureEight(input)
    }
}
