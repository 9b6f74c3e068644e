use crate::electromagnetism::{IsotropicPointSource, RadiationPressureTargetModel};
use crate::models::spacecraft::SpacecraftProperties;
use nalgebra as na;

/// Radiation pressure force on `target` from `source`, positions in a common frame.
pub fn radiation_pressure_force(
    source: &IsotropicPointSource,
    target: &RadiationPressureTargetModel,
    source_position: &na::Vector3<f64>,
    target_position: &na::Vector3<f64>,
) -> na::Vector3<f64> {
    let source_to_target = target_position - source_position;
    let distance = source_to_target.norm();
    if distance == 0.0 {
        return na::Vector3::zeros();
    }

    let irradiance = source.irradiance_at(distance);
    target.evaluate_radiation_pressure_force(irradiance, &(source_to_target / distance))
}

pub fn radiation_pressure_acceleration<T: SpacecraftProperties>(
    spacecraft: &T,
    source: &IsotropicPointSource,
    target: &RadiationPressureTargetModel,
    source_position: &na::Vector3<f64>,
    target_position: &na::Vector3<f64>,
) -> na::Vector3<f64> {
    radiation_pressure_force(source, target, source_position, target_position) / spacecraft.mass()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ASTRONOMICAL_UNIT, SOLAR_CONSTANT, SPEED_OF_LIGHT};
    use crate::electromagnetism::CannonballRadiationPressureTargetModel;
    use approx::assert_relative_eq;
    use test_case::test_case;

    struct Ball;

    impl SpacecraftProperties for Ball {
        fn mass(&self) -> f64 {
            500.0
        }
    }

    fn cannonball() -> RadiationPressureTargetModel {
        CannonballRadiationPressureTargetModel::new(4.0, 1.3).unwrap().into()
    }

    #[test_case(na::Vector3::new(ASTRONOMICAL_UNIT, 0.0, 0.0), na::Vector3::x(); "along x")]
    #[test_case(na::Vector3::new(0.0, -ASTRONOMICAL_UNIT, 0.0), -na::Vector3::y(); "along -y")]
    fn test_force_points_away_from_source(
        target_position: na::Vector3<f64>,
        expected_direction: na::Vector3<f64>,
    ) {
        let force = radiation_pressure_force(
            &IsotropicPointSource::sun(),
            &cannonball(),
            &na::Vector3::zeros(),
            &target_position,
        );

        let expected = SOLAR_CONSTANT / SPEED_OF_LIGHT * 4.0 * 1.3 * expected_direction;
        assert_relative_eq!(force, expected, max_relative = 1e-12, epsilon = 1e-24);
    }

    #[test]
    fn test_acceleration_divides_by_mass() {
        let source_position = na::Vector3::new(-ASTRONOMICAL_UNIT, 0.0, 0.0);
        let target_position = na::Vector3::new(7.0e6, 0.0, 0.0);
        let target = cannonball();

        let force = radiation_pressure_force(
            &IsotropicPointSource::sun(),
            &target,
            &source_position,
            &target_position,
        );
        let acceleration = radiation_pressure_acceleration(
            &Ball,
            &IsotropicPointSource::sun(),
            &target,
            &source_position,
            &target_position,
        );

        assert_relative_eq!(acceleration * 500.0, force, max_relative = 1e-14);
    }

    #[test]
    fn test_coincident_positions_yield_no_force() {
        let position = na::Vector3::new(1.0, 2.0, 3.0);
        let force = radiation_pressure_force(
            &IsotropicPointSource::sun(),
            &cannonball(),
            &position,
            &position,
        );
        assert_eq!(force, na::Vector3::zeros());
    }
}
