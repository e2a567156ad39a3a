//! Turns a path descriptor into the ordered vertices the simulator steers through.
//!
//! Curved paths are approximated by polygons with one vertex every 30°. The
//! reported length is always the exact length of the described shape, not of
//! the polygon, and ignores waypoints for the closed shapes.

use core::f64::consts::PI;

use mecanum_kinematics::Point;
use tracing::debug;

use crate::geometry::{distance, round_point};
use crate::input::{
    CirclePathInput, FigureEightPathInput, InputDescriptor, PointInput, RectanglePathInput,
};

/// Angular step between polygon vertices on curved paths (deg).
const ARC_STEP: f64 = 30.0;
/// Vertices per full circle.
const ARC_VERTICES: usize = 12;

/// Ordered target vertices plus the length of the described path.
///
/// The last vertex is always the goal (or the closing point of a loop).
#[derive(Debug, Clone, PartialEq)]
pub struct PathPlan {
    vertices: Vec<Point>,
    length: f64,
}

impl PathPlan {
    /// Builds the plan for a path-following input starting from `start`.
    ///
    /// Open-loop inputs (wheel rates, general command) have no plan.
    pub fn build(input: &InputDescriptor, start: Point) -> Option<PathPlan> {
        let plan = match input {
            InputDescriptor::Wheels(_) | InputDescriptor::General(_) => return None,
            InputDescriptor::Point(p) => point_plan(p, start),
            InputDescriptor::Rectangle(p) => rectangle_plan(p),
            InputDescriptor::Circle(p) => circle_plan(p),
            InputDescriptor::FigureEight(p) => figure_eight_plan(p),
        };
        debug!(
            kind = input.name(),
            vertices = plan.vertices.len(),
            length = plan.length,
            "built path plan"
        );
        Some(plan)
    }

    /// Ordered vertices, ending at the goal.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Total path length (ft).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Final vertex.
    pub fn goal(&self) -> Point {
        // Every constructor pushes the goal last.
        self.vertices[self.vertices.len() - 1]
    }

    /// Index of the goal in [`PathPlan::vertices`].
    pub fn last_index(&self) -> usize {
        self.vertices.len() - 1
    }
}

/// Average speed a path needs: `length / time`, or `fallback` without a time budget.
pub fn cruise_speed(length: f64, time: f64, fallback: f64) -> f64 {
    if time > 0.0 { length / time } else { fallback }
}

/// A path is feasible when it has no time budget or its average speed stays within `max_speed`.
pub fn is_feasible(length: f64, time: f64, max_speed: f64) -> bool {
    time <= 0.0 || length / time <= max_speed
}

/// Greedy nearest-neighbour insertion.
///
/// Each waypoint, in input order, is inserted directly after the vertex of
/// `vertices` closest to it at that moment; ties go to the earliest vertex.
pub fn insert_waypoints(vertices: &mut Vec<Point>, waypoints: &[Point]) {
    for &waypoint in waypoints {
        let at = nearest_index(vertices, waypoint).map_or(0, |i| i + 1);
        vertices.insert(at, waypoint);
    }
}

/// Like [`insert_waypoints`], but the last vertex is the goal and stays last:
/// a waypoint nearest to it is inserted just before it.
fn insert_waypoints_before_goal(vertices: &mut Vec<Point>, waypoints: &[Point]) {
    for &waypoint in waypoints {
        let at = match nearest_index(vertices, waypoint) {
            Some(i) => (i + 1).min(vertices.len() - 1),
            None => 0,
        };
        vertices.insert(at, waypoint);
    }
}

fn nearest_index(vertices: &[Point], target: Point) -> Option<usize> {
    let mut nearest = None;
    let mut best = f64::INFINITY;
    for (i, vertex) in vertices.iter().enumerate() {
        let d = distance(*vertex, target);
        if d < best {
            best = d;
            nearest = Some(i);
        }
    }
    nearest
}

/// Computed vertices of a closed shape merged with its waypoints, closed by
/// `origin`.
fn closed_vertices(body: Vec<Point>, origin: Point, waypoints: &[Point]) -> Vec<Point> {
    let mut vertices: Vec<Point> = body.into_iter().map(round_point).collect();
    insert_waypoints(&mut vertices, waypoints);
    vertices.push(origin);
    vertices.into_iter().map(round_point).collect()
}

fn polyline_length(start: Point, vertices: &[Point]) -> f64 {
    let mut previous = start;
    let mut total = 0.0;
    for &v in vertices {
        total += distance(previous, v);
        previous = v;
    }
    total
}

fn point_plan(input: &PointInput, start: Point) -> PathPlan {
    // The start anchors the ordering, so a waypoint nearest to it is visited first.
    let mut working = vec![start, round_point(input.end_point)];
    insert_waypoints_before_goal(&mut working, &input.waypoints);
    working.remove(0);
    let vertices: Vec<Point> = working.into_iter().map(round_point).collect();
    let length = polyline_length(start, &vertices);
    PathPlan { vertices, length }
}

fn rectangle_plan(input: &RectanglePathInput) -> PathPlan {
    let o = input.origin;
    let c1 = o + Point::from_heading(input.inclination) * input.side_length;
    let c2 = c1 + Point::from_heading(input.inclination - 90.0) * input.top_length;
    let c3 = c2 + Point::from_heading(input.inclination - 180.0) * input.side_length;

    PathPlan {
        vertices: closed_vertices(vec![c1, c2, c3], o, &input.waypoints),
        length: 2.0 * (input.top_length + input.side_length),
    }
}

/// Point on the circle of `radius` around `center` at `angle` degrees.
fn on_circle(center: Point, radius: f64, angle: f64) -> Point {
    center + Point::from_heading(angle) * radius
}

/// `count` vertices stepping `ARC_STEP` in direction `sense` (+1 counter-clockwise,
/// -1 clockwise) around `center`, starting one step after `start_angle`.
fn arc(center: Point, radius: f64, start_angle: f64, sense: f64, count: usize) -> Vec<Point> {
    (1..=count)
        .map(|k| on_circle(center, radius, start_angle + sense * ARC_STEP * k as f64))
        .collect()
}

fn circle_plan(input: &CirclePathInput) -> PathPlan {
    let o = input.origin;
    let center = o + Point::from_heading(input.inclination) * input.radius;
    // The origin sits opposite the inclination as seen from the center.
    let start_angle = input.inclination + 180.0;

    let around = arc(center, input.radius, start_angle, -1.0, ARC_VERTICES - 1);
    PathPlan {
        vertices: closed_vertices(around, o, &input.waypoints),
        length: 2.0 * PI * input.radius,
    }
}

fn figure_eight_plan(input: &FigureEightPathInput) -> PathPlan {
    let o = input.origin;
    let heading = Point::from_heading(input.inclination);
    let (r1, r2) = (input.radius_one, input.radius_two);
    let near_center = o + heading * r1;
    let far_center = o + heading * (2.0 * r1 + r2);
    let half = ARC_VERTICES / 2;

    // origin -> crossing point, clockwise on the near circle
    let mut loop_vertices = arc(near_center, r1, input.inclination + 180.0, -1.0, half);
    // full far circle, counter-clockwise, back to the crossing point
    loop_vertices.extend(arc(
        far_center,
        r2,
        input.inclination + 180.0,
        1.0,
        ARC_VERTICES,
    ));
    // remaining near half, clockwise, stopping short of the origin
    loop_vertices.extend(arc(near_center, r1, input.inclination, -1.0, half - 1));

    PathPlan {
        vertices: closed_vertices(loop_vertices, o, &input.waypoints),
        length: 2.0 * PI * (r1 + r2),
    }
}
