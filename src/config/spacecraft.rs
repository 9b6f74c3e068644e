use super::target::{MaterialSettings, PanelSettings, Pointing, TargetModelSettings};
use crate::models::spacecraft::SpacecraftProperties;

/// Cubic bus with two sun-tracking solar array wings.
pub struct BoxWingSat;

impl BoxWingSat {
    pub const MASS: f64 = 1200.0; // kg
    pub const BUS_SIDE: f64 = 2.0; // meters
    pub const WING_AREA: f64 = 12.0; // m^2, both wings together

    /// Multi-layer insulation
    pub fn bus_material() -> MaterialSettings {
        MaterialSettings {
            specular_reflectivity: 0.2,
            diffuse_reflectivity: 0.5,
            instantaneous_reradiation: true,
        }
    }

    pub fn cell_material() -> MaterialSettings {
        MaterialSettings {
            specular_reflectivity: 0.05,
            diffuse_reflectivity: 0.05,
            instantaneous_reradiation: false,
        }
    }

    pub fn wing_back_material() -> MaterialSettings {
        MaterialSettings {
            specular_reflectivity: 0.0,
            diffuse_reflectivity: 0.2,
            instantaneous_reradiation: true,
        }
    }

    /// Bus faces are body-fixed; wing normals follow the source direction and
    /// need a model built with `build_for_body`.
    pub fn radiation_pressure_settings(&self) -> TargetModelSettings {
        let face_area = Self::BUS_SIDE.powi(2);
        let face_normals = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];

        let mut panels: Vec<PanelSettings> = face_normals
            .iter()
            .map(|&normal| PanelSettings {
                area: face_area,
                normal,
                material: Self::bus_material(),
                pointing: Pointing::BodyFixed,
            })
            .collect();

        panels.push(PanelSettings {
            area: Self::WING_AREA,
            normal: [0.0, 1.0, 0.0],
            material: Self::cell_material(),
            pointing: Pointing::TowardSource,
        });
        panels.push(PanelSettings {
            area: Self::WING_AREA,
            normal: [0.0, -1.0, 0.0],
            material: Self::wing_back_material(),
            pointing: Pointing::AwayFromSource,
        });

        TargetModelSettings::Paneled { panels }
    }
}

impl SpacecraftProperties for BoxWingSat {
    fn mass(&self) -> f64 {
        Self::MASS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::constants::SPEED_OF_LIGHT;
    use crate::models::geometry::BodyGeometry;
    use approx::assert_relative_eq;
    use nalgebra as na;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_settings_need_body_geometry() {
        let settings = BoxWingSat.radiation_pressure_settings();
        match &settings {
            TargetModelSettings::Paneled { panels } => assert_eq!(panels.len(), 8),
            TargetModelSettings::Cannonball { .. } => panic!("expected paneled settings"),
        }
        assert!(matches!(
            settings.build(),
            Err(ConfigError::TrackingPanelWithoutGeometry { index: 6 })
        ));
    }

    #[test]
    fn test_sun_along_bus_axis() {
        let geometry = Rc::new(Cell::new(BodyGeometry {
            attitude: na::UnitQuaternion::identity(),
            target_to_source: na::Vector3::x(),
        }));
        let mut model = BoxWingSat
            .radiation_pressure_settings()
            .build_for_body(&geometry)
            .unwrap();
        model.update_members(None);

        let force = model.evaluate_radiation_pressure_force(1000.0, &-na::Vector3::x());

        // Lit: +x bus face (with re-radiation) and the front of the wings
        let bus = 4.0 * (0.8 + 2.0 / 3.0 * 0.5 + 2.0 * 0.2 + 2.0 / 3.0 * 0.3);
        let wing = 12.0 * (0.95 + 2.0 / 3.0 * 0.05 + 2.0 * 0.05);
        let expected = -1000.0 / SPEED_OF_LIGHT * (bus + wing);
        assert_relative_eq!(force.x, expected, max_relative = 1e-12);
        assert_relative_eq!(force.y, 0.0, epsilon = 1e-20);
        assert_relative_eq!(force.z, 0.0, epsilon = 1e-20);
    }
}
