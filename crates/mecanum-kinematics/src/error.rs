//! Error types for the kinematics library.
//!
//! This module defines the errors that can occur while constructing a drive
//! model or integrating a pose.

use core::fmt;

/// Errors that can occur in kinematic calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Error for invalid wheel radius.
    /// This variant is returned when a wheel radius is provided that is not positive.
    InvalidWheelRadius(&'static str),
    /// Error for invalid track geometry.
    /// This variant is returned when the half track width or half wheelbase is not positive.
    InvalidTrackGeometry(&'static str),
    /// Error for an invalid time delta.
    /// This variant is returned when a negative or non-finite time delta is used for pose updates.
    InvalidTimeDelta(&'static str),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidWheelRadius(msg) => write!(f, "Invalid wheel radius: {}", msg),
            KinematicsError::InvalidTrackGeometry(msg) => {
                write!(f, "Invalid track geometry: {}", msg)
            }
            KinematicsError::InvalidTimeDelta(msg) => write!(f, "Invalid time delta: {}", msg),
        }
    }
}

impl core::error::Error for KinematicsError {}
