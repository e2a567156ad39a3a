//! Path generation and the frame-driven simulation loop for a mecanum drive robot.
//!
//! Build an [`InputDescriptor`], seed a [`Robot`] with its starting pose and hand
//! both to a [`Simulator`]; then call [`Simulator::tick`] once per frame.
//!
//! ```
//! use mecanum_kinematics::{Point, Pose};
//! use mecanum_navigation::{PointInput, Robot, Simulator};
//!
//! let robot = Robot::with_wheel_radius(0.25, Pose::default()).unwrap();
//! let input = PointInput::new(Point::new(0.0, 10.0)).with_time(5.0);
//! let mut sim = Simulator::new(input.into(), robot);
//! assert!(sim.is_feasible());
//! while !sim.is_at_goal() {
//!     sim.tick(0.1).unwrap();
//! }
//! ```

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod path;
pub mod robot;
pub mod simulator;

pub use clock::FrameClock;
pub use config::SimulatorConfig;
pub use error::{InputError, SimulationError};
pub use input::{
    CirclePathInput, FigureEightPathInput, GeneralInput, InputDescriptor, PointInput,
    RectanglePathInput, WheelInput, rotation_rate_toward,
};
pub use path::PathPlan;
pub use robot::{Robot, RobotSnapshot};
pub use simulator::{SimState, Simulator};
