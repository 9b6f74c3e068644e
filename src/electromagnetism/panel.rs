use super::errors::RadiationPressureError;
use super::reflection_law::ReflectionLaw;
use crate::constants::SPEED_OF_LIGHT;
use log::warn;
use nalgebra as na;
use std::fmt;
use std::sync::Arc;

/// How a panel's surface normal is obtained.
pub enum PanelOrientation {
    /// Constant normal, in the frame of the incident direction.
    Fixed(na::Vector3<f64>),
    /// Normal re-evaluated on every update, e.g. a solar array that follows the Sun
    /// or a body-fixed panel rotated by the current attitude.
    Tracking(Box<dyn Fn() -> na::Vector3<f64>>),
}

impl fmt::Debug for PanelOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelOrientation::Fixed(normal) => f.debug_tuple("Fixed").field(normal).finish(),
            PanelOrientation::Tracking(_) => f.write_str("Tracking"),
        }
    }
}

/// Flat surface element of a paneled target.
#[derive(Debug)]
pub struct Panel {
    area: f64,
    orientation: PanelOrientation,
    surface_normal: na::Vector3<f64>,
    reflection_law: Arc<dyn ReflectionLaw>,
}

impl Panel {
    /// Panel with a constant normal. The normal is normalized here.
    pub fn new(
        area: f64,
        surface_normal: na::Vector3<f64>,
        reflection_law: Arc<dyn ReflectionLaw>,
    ) -> Result<Self, RadiationPressureError> {
        Self::with_orientation(area, PanelOrientation::Fixed(surface_normal), reflection_law)
    }

    /// Tracking panels have a zero normal, and thus produce no force, until
    /// their first update.
    pub fn with_orientation(
        area: f64,
        orientation: PanelOrientation,
        reflection_law: Arc<dyn ReflectionLaw>,
    ) -> Result<Self, RadiationPressureError> {
        if !(area.is_finite() && area > 0.0) {
            return Err(RadiationPressureError::InvalidArea(area));
        }

        let orientation = match orientation {
            PanelOrientation::Fixed(normal) => PanelOrientation::Fixed(
                normal
                    .try_normalize(f64::EPSILON)
                    .ok_or(RadiationPressureError::DegenerateSurfaceNormal)?,
            ),
            tracking => tracking,
        };
        let surface_normal = match &orientation {
            PanelOrientation::Fixed(normal) => *normal,
            PanelOrientation::Tracking(_) => na::Vector3::zeros(),
        };

        Ok(Self {
            area,
            orientation,
            surface_normal,
            reflection_law,
        })
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    /// Normal as of the last update.
    pub fn surface_normal(&self) -> &na::Vector3<f64> {
        &self.surface_normal
    }

    pub fn reflection_law(&self) -> &Arc<dyn ReflectionLaw> {
        &self.reflection_law
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.orientation, PanelOrientation::Tracking(_))
    }

    /// Re-evaluates the normal of a tracking panel.
    pub fn update_members(&mut self) {
        if let PanelOrientation::Tracking(normal_function) = &self.orientation {
            let raw_normal = normal_function();
            self.surface_normal = match raw_normal.try_normalize(f64::EPSILON) {
                Some(normal) => normal,
                None => {
                    warn!("Tracked panel normal {:?} is degenerate, panel is ignored", raw_normal);
                    na::Vector3::zeros()
                }
            };
        }
    }

    /// Force on this panel from radiation travelling along `source_to_target_direction`.
    ///
    /// Only the projected area `area * cos(incidence)` intercepts radiation;
    /// a panel facing away from the source contributes nothing.
    pub fn evaluate_radiation_pressure_force(
        &self,
        irradiance: f64,
        source_to_target_direction: &na::Vector3<f64>,
    ) -> na::Vector3<f64> {
        let cos_incoming = self.surface_normal.dot(&-source_to_target_direction);
        if cos_incoming <= 0.0 {
            return na::Vector3::zeros();
        }

        let radiation_pressure = irradiance / SPEED_OF_LIGHT;
        let effective_area = self.area * cos_incoming;
        let reaction = self
            .reflection_law
            .evaluate_reaction_vector(&self.surface_normal, source_to_target_direction);

        radiation_pressure * effective_area * reaction
    }
}
