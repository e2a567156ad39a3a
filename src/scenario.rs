use mecanum_navigation::{InputDescriptor, rotation_rate_toward};

/// Fills in the rotation rate of a path input from its end orientation.
///
/// An explicit non-zero rate is kept. Otherwise the robot turns from
/// `start_heading` to the end orientation evenly over the time budget.
pub fn derive_rotation(mut input: InputDescriptor, start_heading: f64) -> InputDescriptor {
    let rotation = match &mut input {
        InputDescriptor::Wheels(_) | InputDescriptor::General(_) => None,
        InputDescriptor::Point(p) => Some((p.end_orientation, &mut p.rotation_rate, p.time)),
        InputDescriptor::Rectangle(p) => Some((p.end_orientation, &mut p.rotation_rate, p.time)),
        InputDescriptor::Circle(p) => Some((p.end_orientation, &mut p.rotation_rate, p.time)),
        InputDescriptor::FigureEight(p) => Some((p.end_orientation, &mut p.rotation_rate, p.time)),
    };
    if let Some((end_orientation, rate, time)) = rotation {
        if *rate == 0.0 {
            *rate = rotation_rate_toward(end_orientation, start_heading, time);
        }
    }
    input
}
