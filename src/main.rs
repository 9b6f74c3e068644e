use config::spacecraft::BoxWingSat;
use csv::Writer;
use hifitime::{Duration, Epoch};
use log::info;
use nalgebra as na;
use radpress::config;
use radpress::constants::*;
use radpress::electromagnetism::IsotropicPointSource;
use radpress::models::BodyGeometry;
use radpress::physics::radiation_pressure::radiation_pressure_acceleration;
use std::cell::Cell;
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;
use std::rc::Rc;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    static SPACECRAFT: BoxWingSat = BoxWingSat;
    let altitude = 700_000.0; // meters
    let inclination = 98.0_f64.to_radians(); // sun-synchronous-like
    let radius = WGS84_A + altitude;
    let mean_motion = (G * M_EARTH / radius.powi(3)).sqrt();
    let orbital_period = 2.0 * PI / mean_motion;

    // Earth-centred frame with the Sun fixed on +x; Earth shadow is not modelled
    let sun = IsotropicPointSource::sun();
    let sun_position = na::Vector3::new(ASTRONOMICAL_UNIT, 0.0, 0.0);
    let orbit_plane = na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), inclination);

    let geometry = Rc::new(Cell::new(BodyGeometry::default()));
    let mut target = SPACECRAFT
        .radiation_pressure_settings()
        .build_for_body(&geometry)?;

    let start_time = Epoch::from_gregorian_utc(2024, 3, 15, 0, 0, 0, 0);
    let dt = 10.0; // seconds
    let steps = (orbital_period / dt) as usize;
    info!(
        "Evaluating radiation pressure over {} steps ({:.1} min orbit)",
        steps,
        orbital_period / 60.0
    );

    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;

    let file = File::create(output_dir.join("srp_forces.csv"))?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "UTC Time",
        "Time (s)",
        "Position X (km)",
        "Position Y (km)",
        "Position Z (km)",
        "Force X (N)",
        "Force Y (N)",
        "Force Z (N)",
        "Acceleration X (m/s^2)",
        "Acceleration Y (m/s^2)",
        "Acceleration Z (m/s^2)",
    ])?;

    for i in 0..=steps {
        let current_time = i as f64 * dt;
        let current_epoch = start_time + Duration::from_seconds(current_time);

        let argument_of_latitude = mean_motion * current_time;
        let (sin_u, cos_u) = argument_of_latitude.sin_cos();
        let position = orbit_plane * na::Vector3::new(radius * cos_u, radius * sin_u, 0.0);
        let velocity_direction = orbit_plane * na::Vector3::new(-sin_u, cos_u, 0.0);

        // Nadir pointing: body +z towards Earth
        let attitude = na::UnitQuaternion::face_towards(&-position, &velocity_direction);
        geometry.set(BodyGeometry {
            attitude,
            target_to_source: (sun_position - position).normalize(),
        });
        target.update_members(Some(current_time));

        let acceleration =
            radiation_pressure_acceleration(&SPACECRAFT, &sun, &target, &sun_position, &position);
        let force = target.last_evaluated_force();

        writer.write_record(&[
            current_epoch.to_string(),
            current_time.to_string(),
            (position.x / 1000.0).to_string(),
            (position.y / 1000.0).to_string(),
            (position.z / 1000.0).to_string(),
            force.x.to_string(),
            force.y.to_string(),
            force.z.to_string(),
            acceleration.x.to_string(),
            acceleration.y.to_string(),
            acceleration.z.to_string(),
        ])?;
    }

    writer.flush()?;
    println!("Radiation pressure data has been written to output/srp_forces.csv");

    Ok(())
}
