//! Tuning constants for the simulator, grouped so a host can override them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::GOAL_TOLERANCE;

/// Maximum robot speed (ft/s) accepted at construction time.
pub const MAX_SPEED: f64 = 15.0;
/// Seconds between steering recomputations.
pub const REPLAN_INTERVAL: f64 = 0.1;
/// Distance (ft) to the current vertex under which cruise speed is halved.
pub const SLOW_DOWN_DISTANCE: f64 = 1.0;

/// Simulator tuning. `Default` yields the standard field constants.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    /// Seconds between steering recomputations.
    pub replan_interval: f64,
    /// Per-axis tolerance (ft) for vertex and goal arrival.
    pub goal_tolerance: f64,
    /// Distance (ft) at which the robot drops to half cruise speed.
    pub slow_down_distance: f64,
    /// Feasibility ceiling on average path speed (ft/s).
    pub max_speed: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            replan_interval: REPLAN_INTERVAL,
            goal_tolerance: GOAL_TOLERANCE,
            slow_down_distance: SLOW_DOWN_DISTANCE,
            max_speed: MAX_SPEED,
        }
    }
}
