//! Error types used by the `mecanum-navigation` crate.

use mecanum_kinematics::KinematicsError;
use thiserror::Error;

/// Rejections raised while validating an input descriptor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The commanded or implied translational speed is above the robot's maximum.
    #[error("Robot speed cannot exceed {max} ft/s, current input results in: {requested:.3} ft/s")]
    SpeedTooHigh {
        /// Requested speed (ft/s).
        requested: f64,
        /// Maximum allowed speed (ft/s).
        max: f64,
    },
    /// A speed was negative.
    #[error("Speed must be non-negative, got {0}")]
    NegativeSpeed(f64),
    /// A length or radius was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeLength {
        /// Name of the offending parameter.
        field: &'static str,
        /// Its value.
        value: f64,
    },
    /// A parameter was NaN or infinite.
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

/// Errors returned while driving a [`crate::Simulator`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The requested path cannot be completed within its time budget.
    #[error("path needs {required:.3} ft/s, above the {max} ft/s limit")]
    Infeasible {
        /// Average speed the path would need (ft/s).
        required: f64,
        /// Maximum allowed speed (ft/s).
        max: f64,
    },
    /// Pose integration rejected the frame.
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
}
