//! Point and angle helpers shared by the path generator and the simulator.
//!
//! Angles follow the field convention: 0° is the +Y axis and angles grow
//! toward -X.

use mecanum_kinematics::{Point, rad_to_deg};

/// Default per-axis goal tolerance (ft).
pub const GOAL_TOLERANCE: f64 = 1.0;

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2 - p1).norm()
}

/// Bearing from `from` to `to`, in degrees within (-180, 180].
///
/// Axis-aligned offsets are handled explicitly so the arctangent never sees a
/// zero denominator. Coincident points yield 0°.
pub fn bearing(from: Point, to: Point) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    if dx == 0.0 {
        return if dy < 0.0 { 180.0 } else { 0.0 };
    }
    if dy == 0.0 {
        return if dx > 0.0 { -90.0 } else { 90.0 };
    }

    let angle = rad_to_deg((-dx / dy).atan());
    if dy > 0.0 {
        angle
    } else if dx < 0.0 {
        angle + 180.0
    } else {
        angle - 180.0
    }
}

/// True when `p` lies strictly inside the square of half-side `tolerance` around `goal`.
pub fn is_at_goal(p: Point, goal: Point, tolerance: f64) -> bool {
    (p.x - goal.x).abs() < tolerance && (p.y - goal.y).abs() < tolerance
}

/// Round to three decimal places, half away from zero.
pub fn round(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// [`round`] applied to both components.
pub fn round_point(p: Point) -> Point {
    Point::new(round(p.x), round(p.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;
    const ORIGIN: Point = Point::ORIGIN;

    #[test]
    fn test_distance() {
        assert!((distance(Point::new(1.0, 1.0), Point::new(4.0, 5.0)) - 5.0).abs() < EPSILON);
        assert_eq!(distance(ORIGIN, ORIGIN), 0.0);
    }

    #[test]
    fn test_bearing_axis_cases() {
        assert_eq!(bearing(ORIGIN, Point::new(0.0, 5.0)), 0.0);
        assert_eq!(bearing(ORIGIN, Point::new(0.0, -5.0)), 180.0);
        assert_eq!(bearing(ORIGIN, Point::new(5.0, 0.0)), -90.0);
        assert_eq!(bearing(ORIGIN, Point::new(-5.0, 0.0)), 90.0);
    }

    #[test]
    fn test_bearing_quadrants() {
        assert!((bearing(ORIGIN, Point::new(-1.0, 1.0)) - 45.0).abs() < EPSILON);
        assert!((bearing(ORIGIN, Point::new(1.0, 1.0)) + 45.0).abs() < EPSILON);
        assert!((bearing(ORIGIN, Point::new(-1.0, -1.0)) - 135.0).abs() < EPSILON);
        assert!((bearing(ORIGIN, Point::new(1.0, -1.0)) + 135.0).abs() < EPSILON);
    }

    #[test]
    fn test_bearing_is_relative_to_start() {
        let from = Point::new(3.0, 3.0);
        assert_eq!(bearing(from, Point::new(3.0, 10.0)), 0.0);
        assert_eq!(bearing(from, Point::new(1.0, 3.0)), 90.0);
    }

    #[test]
    fn test_bearing_matches_heading_vector() {
        for target in [Point::new(2.0, 7.0), Point::new(-4.0, -1.0), Point::new(6.0, -3.0)] {
            let dir = Point::from_heading(bearing(ORIGIN, target));
            let unit = target * (1.0 / target.norm());
            assert!((dir.x - unit.x).abs() < 1e-9);
            assert!((dir.y - unit.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_is_at_goal() {
        let goal = Point::new(2.0, 2.0);
        assert!(is_at_goal(goal, goal, GOAL_TOLERANCE));
        assert!(is_at_goal(Point::new(2.9, 1.1), goal, GOAL_TOLERANCE));
        // square, not circular: a corner at 0.9 on both axes still counts
        assert!(is_at_goal(Point::new(2.9, 2.9), goal, GOAL_TOLERANCE));
        assert!(!is_at_goal(Point::new(3.5, 2.0), goal, GOAL_TOLERANCE));
        assert!(!is_at_goal(Point::new(2.0, 0.5), goal, GOAL_TOLERANCE));
        // strict bound
        assert!(!is_at_goal(Point::new(3.0, 2.0), goal, GOAL_TOLERANCE));
    }

    #[test]
    fn test_round() {
        assert_eq!(round(1.23456), 1.235);
        assert_eq!(round(-1.23449), -1.234);
        assert_eq!(round(0.0005), 0.001);
        assert_eq!(round(9.0), 9.0);
        assert_eq!(round_point(Point::new(0.12345, 5.55555)), Point::new(0.123, 5.556));
    }
}
