use mecanum_kinematics::*;

fn main() {
    let wheel_radius = 0.25;
    let drive_result = MecanumDrive::with_wheel_radius(wheel_radius);

    let mut current_pose = Pose::new(Point::ORIGIN, 0.0);
    // front-left and rear-right forward, the diagonal pair backward: pure strafe
    let wheels = WheelRates::new(8.0, -8.0, -8.0, 8.0);
    let dt = 0.1;
    let num_steps = 10;

    match drive_result {
        Ok(drive) => {
            let chassis = drive.forward_kinematics(wheels);
            println!("Initializing simulation...");
            println!("  Drive: {}", drive);
            println!("  Wheel rates:    {}", wheels);
            println!("  Chassis:        {}", chassis);
            println!("  Round trip:     {}", drive.inverse_kinematics(chassis));
            println!("  Time Step:      {} s", dt);
            println!("\nSimulating...");

            for i in 0..num_steps {
                match drive.update_pose(current_pose, chassis, dt) {
                    Ok(new_pose) => {
                        current_pose = new_pose;
                        println!("Step {:>2}: Pose: {}", i + 1, current_pose);
                    }
                    Err(e) => {
                        eprintln!("Error during simulation step {}: {}", i + 1, e);
                        break;
                    }
                }
            }

            println!("\nFinal Pose: {}", current_pose);
        }
        Err(e) => {
            eprintln!("Failed to initialize kinematics: {}", e);
        }
    }
}
