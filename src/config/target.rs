use super::errors::ConfigError;
use crate::electromagnetism::{
    CannonballRadiationPressureTargetModel, Panel, PanelOrientation,
    PaneledRadiationPressureTargetModel, RadiationPressureError, RadiationPressureTargetModel,
    ReflectionLaw, SpecularDiffuseMixReflectionLaw,
};
use crate::models::geometry::SharedGeometry;
use csv::{ReaderBuilder, Trim};
use log::debug;
use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSettings {
    pub specular_reflectivity: f64,
    pub diffuse_reflectivity: f64,
    #[serde(default)]
    pub instantaneous_reradiation: bool,
}

impl MaterialSettings {
    pub fn reflection_law(
        &self,
    ) -> Result<SpecularDiffuseMixReflectionLaw, RadiationPressureError> {
        SpecularDiffuseMixReflectionLaw::from_specular_and_diffuse_reflectivity(
            self.specular_reflectivity,
            self.diffuse_reflectivity,
            self.instantaneous_reradiation,
        )
    }
}

/// What a panel's normal follows once attached to a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pointing {
    /// `normal` is given in the body frame.
    #[default]
    BodyFixed,
    /// Normal always faces the source, e.g. the front of a sun-tracking array.
    TowardSource,
    AwayFromSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    pub area: f64,
    pub normal: [f64; 3],
    pub material: MaterialSettings,
    #[serde(default)]
    pub pointing: Pointing,
}

impl PanelSettings {
    pub fn normal_vector(&self) -> na::Vector3<f64> {
        na::Vector3::from(self.normal)
    }

    /// Orientation reading its normal from `geometry` on every update.
    pub fn orientation_in(&self, geometry: &SharedGeometry) -> PanelOrientation {
        let geometry = Rc::clone(geometry);
        match self.pointing {
            Pointing::BodyFixed => {
                let body_normal = self.normal_vector();
                PanelOrientation::Tracking(Box::new(move || geometry.get().attitude * body_normal))
            }
            Pointing::TowardSource => {
                PanelOrientation::Tracking(Box::new(move || geometry.get().target_to_source))
            }
            Pointing::AwayFromSource => {
                PanelOrientation::Tracking(Box::new(move || -geometry.get().target_to_source))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TargetModelSettings {
    Cannonball { area: f64, coefficient: f64 },
    Paneled { panels: Vec<PanelSettings> },
}

impl TargetModelSettings {
    /// Builds the model with every panel normal fixed as given.
    ///
    /// Panels pointing toward or away from the source have no fixed normal
    /// and are rejected.
    pub fn build(&self) -> Result<RadiationPressureTargetModel, ConfigError> {
        if let TargetModelSettings::Paneled { panels } = self {
            if let Some(index) = panels
                .iter()
                .position(|panel| panel.pointing != Pointing::BodyFixed)
            {
                return Err(ConfigError::TrackingPanelWithoutGeometry { index });
            }
        }
        self.build_with_orientation(|panel| PanelOrientation::Fixed(panel.normal_vector()))
    }

    /// Builds the model for a body whose attitude and source direction are
    /// published through `geometry`.
    pub fn build_for_body(
        &self,
        geometry: &SharedGeometry,
    ) -> Result<RadiationPressureTargetModel, ConfigError> {
        self.build_with_orientation(|panel| panel.orientation_in(geometry))
    }

    /// Panels with equal materials share a single reflection law.
    pub fn build_with_orientation<F>(
        &self,
        mut orientation: F,
    ) -> Result<RadiationPressureTargetModel, ConfigError>
    where
        F: FnMut(&PanelSettings) -> PanelOrientation,
    {
        match self {
            TargetModelSettings::Cannonball { area, coefficient } => {
                Ok(CannonballRadiationPressureTargetModel::new(*area, *coefficient)?.into())
            }
            TargetModelSettings::Paneled { panels } => {
                let mut materials: Vec<(MaterialSettings, Arc<dyn ReflectionLaw>)> = Vec::new();
                let mut built = Vec::with_capacity(panels.len());

                for settings in panels {
                    let shared = materials
                        .iter()
                        .find(|(material, _)| *material == settings.material)
                        .map(|(_, law)| Arc::clone(law));
                    let reflection_law = match shared {
                        Some(law) => law,
                        None => {
                            let law: Arc<dyn ReflectionLaw> =
                                Arc::new(settings.material.reflection_law()?);
                            materials.push((settings.material, Arc::clone(&law)));
                            law
                        }
                    };
                    built.push(Panel::with_orientation(
                        settings.area,
                        orientation(settings),
                        reflection_law,
                    )?);
                }

                debug!(
                    "Built paneled target with {} panels and {} materials",
                    built.len(),
                    materials.len()
                );
                Ok(PaneledRadiationPressureTargetModel::new(built).into())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct PanelRecord {
    area: f64,
    normal_x: f64,
    normal_y: f64,
    normal_z: f64,
    specular_reflectivity: f64,
    diffuse_reflectivity: f64,
    #[serde(default)]
    instantaneous_reradiation: bool,
}

impl From<PanelRecord> for PanelSettings {
    fn from(record: PanelRecord) -> Self {
        PanelSettings {
            area: record.area,
            normal: [record.normal_x, record.normal_y, record.normal_z],
            material: MaterialSettings {
                specular_reflectivity: record.specular_reflectivity,
                diffuse_reflectivity: record.diffuse_reflectivity,
                instantaneous_reradiation: record.instantaneous_reradiation,
            },
            pointing: Pointing::BodyFixed,
        }
    }
}

/// Reads body-fixed panels from CSV. Columns are `area`, `normal_x`, `normal_y`,
/// `normal_z`, `specular_reflectivity`, `diffuse_reflectivity` and optionally
/// `instantaneous_reradiation`.
pub fn read_panel_table<R: io::Read>(reader: R) -> Result<Vec<PanelSettings>, ConfigError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut panels = Vec::new();
    for result in rdr.deserialize::<PanelRecord>() {
        panels.push(PanelSettings::from(result?));
    }

    if panels.is_empty() {
        return Err(ConfigError::EmptyPanelTable);
    }
    Ok(panels)
}

pub fn load_panel_table<P: AsRef<Path>>(path: P) -> Result<Vec<PanelSettings>, ConfigError> {
    let file = File::open(path)?;
    read_panel_table(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SPEED_OF_LIGHT;
    use crate::models::geometry::BodyGeometry;
    use approx::assert_relative_eq;
    use std::cell::Cell;

    const HEADER: &str =
        "area,normal_x,normal_y,normal_z,specular_reflectivity,diffuse_reflectivity";

    const CUBE_TABLE: &str = "\
area, normal_x, normal_y, normal_z, specular_reflectivity, diffuse_reflectivity, \
instantaneous_reradiation
1.0,  1.0,  0.0,  0.0, 0.3, 0.2, false
1.0, -1.0,  0.0,  0.0, 0.3, 0.2, false
1.0,  0.0,  1.0,  0.0, 0.3, 0.2, false
1.0,  0.0, -1.0,  0.0, 0.3, 0.2, false
1.0,  0.0,  0.0,  1.0, 0.3, 0.2, true
1.0,  0.0,  0.0, -1.0, 0.3, 0.2, true
";

    fn paneled(model: &RadiationPressureTargetModel) -> &PaneledRadiationPressureTargetModel {
        match model {
            RadiationPressureTargetModel::Paneled(model) => model,
            RadiationPressureTargetModel::Cannonball(_) => panic!("expected a paneled model"),
        }
    }

    #[test]
    fn test_read_panel_table() {
        let panels = read_panel_table(CUBE_TABLE.as_bytes()).unwrap();
        assert_eq!(panels.len(), 6);
        assert_eq!(panels[2].normal, [0.0, 1.0, 0.0]);
        assert!(panels[4].material.instantaneous_reradiation);
        assert_eq!(panels[0].pointing, Pointing::BodyFixed);
    }

    #[test]
    fn test_panel_table_without_reradiation_column() {
        let table = format!("{HEADER}\n2.5,0,0,1,0.1,0.1\n");
        let panels = read_panel_table(table.as_bytes()).unwrap();
        assert_eq!(panels.len(), 1);
        assert!(!panels[0].material.instantaneous_reradiation);
    }

    #[test]
    fn test_empty_panel_table_is_rejected() {
        let table = format!("{HEADER}\n");
        assert!(matches!(
            read_panel_table(table.as_bytes()),
            Err(ConfigError::EmptyPanelTable)
        ));
    }

    #[test]
    fn test_malformed_panel_table_is_rejected() {
        let table = format!("{HEADER}\none,0,0,1,0.1,0.1\n");
        assert!(matches!(
            read_panel_table(table.as_bytes()),
            Err(ConfigError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_panel_table_file() {
        let result = load_panel_table("does/not/exist.csv");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_cube_lit_on_one_face() {
        let settings = TargetModelSettings::Paneled {
            panels: read_panel_table(CUBE_TABLE.as_bytes()).unwrap(),
        };
        let mut model = settings.build().unwrap();
        model.update_members(None);

        let force = model.evaluate_radiation_pressure_force(1000.0, &-na::Vector3::z());

        // Only the +z face is lit: (a + d) + 2/3 d + 2 s + 2/3 a
        let pressure = 1000.0 / SPEED_OF_LIGHT;
        let expected = -pressure * (0.7 + 2.0 / 3.0 * 0.2 + 0.6 + 2.0 / 3.0 * 0.5);
        assert_relative_eq!(force.z, expected, max_relative = 1e-12);
        assert_eq!(force.x, 0.0);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn test_equal_materials_share_reflection_law() {
        let settings = TargetModelSettings::Paneled {
            panels: read_panel_table(CUBE_TABLE.as_bytes()).unwrap(),
        };
        let model = settings.build().unwrap();
        let panels = paneled(&model).panels();

        assert!(Arc::ptr_eq(panels[0].reflection_law(), panels[3].reflection_law()));
        assert!(Arc::ptr_eq(panels[4].reflection_law(), panels[5].reflection_law()));
        assert!(!Arc::ptr_eq(panels[0].reflection_law(), panels[4].reflection_law()));
    }

    #[test]
    fn test_invalid_material_is_rejected() {
        let settings = TargetModelSettings::Paneled {
            panels: vec![PanelSettings {
                area: 1.0,
                normal: [0.0, 0.0, 1.0],
                material: MaterialSettings {
                    specular_reflectivity: 0.8,
                    diffuse_reflectivity: 0.8,
                    instantaneous_reradiation: false,
                },
                pointing: Pointing::BodyFixed,
            }],
        };
        assert!(matches!(
            settings.build(),
            Err(ConfigError::Model(RadiationPressureError::EnergyNotConserved { .. }))
        ));
    }

    const SUN_TRACKING_BLACK_PANEL: &str = r#"{
        "type": "paneled",
        "panels": [
            {
                "area": 1.0,
                "normal": [0.0, 0.0, 1.0],
                "material": { "specular_reflectivity": 0.0, "diffuse_reflectivity": 0.0 },
                "pointing": "toward_source"
            }
        ]
    }"#;

    #[test]
    fn test_build_rejects_source_tracking_panels() {
        let settings: TargetModelSettings = serde_json::from_str(SUN_TRACKING_BLACK_PANEL).unwrap();
        assert!(matches!(
            settings.build(),
            Err(ConfigError::TrackingPanelWithoutGeometry { index: 0 })
        ));
    }

    #[test]
    fn test_source_tracking_panel_faces_the_source() {
        let settings: TargetModelSettings = serde_json::from_str(SUN_TRACKING_BLACK_PANEL).unwrap();
        let geometry = Rc::new(Cell::new(BodyGeometry {
            attitude: na::UnitQuaternion::identity(),
            target_to_source: -na::Vector3::x(),
        }));
        let mut model = settings.build_for_body(&geometry).unwrap();
        model.update_members(Some(0.0));

        let force = model.evaluate_radiation_pressure_force(1361.0, &na::Vector3::x());

        assert_relative_eq!(force.x, 1361.0 / SPEED_OF_LIGHT, max_relative = 1e-12);
        assert_relative_eq!(force.x, 4.54e-6, max_relative = 1e-2);
        assert_eq!(force.y, 0.0);
        assert_eq!(force.z, 0.0);
    }

    #[test]
    fn test_body_orientation_follows_geometry() {
        let geometry = Rc::new(Cell::new(BodyGeometry::default()));
        let settings = TargetModelSettings::Paneled {
            panels: vec![
                PanelSettings {
                    area: 1.0,
                    normal: [1.0, 0.0, 0.0],
                    material: MaterialSettings {
                        specular_reflectivity: 0.0,
                        diffuse_reflectivity: 0.0,
                        instantaneous_reradiation: false,
                    },
                    pointing: Pointing::BodyFixed,
                },
                PanelSettings {
                    area: 1.0,
                    normal: [0.0, 0.0, 1.0],
                    material: MaterialSettings {
                        specular_reflectivity: 0.0,
                        diffuse_reflectivity: 0.0,
                        instantaneous_reradiation: false,
                    },
                    pointing: Pointing::TowardSource,
                },
            ],
        };
        let mut model = settings.build_for_body(&geometry).unwrap();

        geometry.set(BodyGeometry {
            attitude: na::UnitQuaternion::from_axis_angle(
                &na::Vector3::z_axis(),
                std::f64::consts::FRAC_PI_2,
            ),
            target_to_source: na::Vector3::y(),
        });
        model.update_members(Some(0.0));

        let panels = paneled(&model).panels();
        assert_relative_eq!(*panels[0].surface_normal(), na::Vector3::y(), epsilon = 1e-15);
        assert_relative_eq!(*panels[1].surface_normal(), na::Vector3::y(), epsilon = 1e-15);
    }
}
