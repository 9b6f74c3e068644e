use super::errors::RadiationPressureError;
use super::panel::Panel;
use super::reflection_law::ReflectionLaw;
use crate::constants::{PI, SPEED_OF_LIGHT};
use crate::numerics::sphere::{generate_evenly_spaced_points_staggered, spherical_to_cartesian};
use log::debug;
use nalgebra as na;
use std::cell::Cell;
use std::sync::Arc;

/// Whether a target model has been updated for the active evaluation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateState {
    Stale,
    CurrentAt(f64),
}

impl UpdateState {
    fn is_current_at(&self, time: Option<f64>) -> bool {
        matches!((self, time), (UpdateState::CurrentAt(last), Some(time)) if *last == time)
    }

    /// An update without a usable time leaves the model stale so that the
    /// next update always recomputes.
    fn after_update(time: Option<f64>) -> Self {
        match time {
            Some(time) if !time.is_nan() => UpdateState::CurrentAt(time),
            _ => UpdateState::Stale,
        }
    }
}

/// Isotropic sphere: all momentum acts along the incident direction.
#[derive(Debug)]
pub struct CannonballRadiationPressureTargetModel {
    area: f64,
    coefficient: f64,
    state: UpdateState,
    last_force: Cell<na::Vector3<f64>>,
}

impl CannonballRadiationPressureTargetModel {
    /// `coefficient` is 1 for a pure absorber and 2 for a mirror reflecting
    /// straight back at the source.
    pub fn new(area: f64, coefficient: f64) -> Result<Self, RadiationPressureError> {
        if !(area.is_finite() && area > 0.0) {
            return Err(RadiationPressureError::InvalidArea(area));
        }
        if !(coefficient.is_finite() && coefficient >= 0.0) {
            return Err(RadiationPressureError::InvalidCoefficient(coefficient));
        }
        Ok(Self {
            area,
            coefficient,
            state: UpdateState::Stale,
            last_force: Cell::new(na::Vector3::zeros()),
        })
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn update_state(&self) -> UpdateState {
        self.state
    }

    pub fn last_evaluated_force(&self) -> na::Vector3<f64> {
        self.last_force.get()
    }

    pub fn update_members(&mut self, current_time: Option<f64>) {
        if self.state.is_current_at(current_time) {
            return;
        }
        self.state = UpdateState::after_update(current_time);
    }

    pub fn evaluate_radiation_pressure_force(
        &self,
        irradiance: f64,
        source_to_target_direction: &na::Vector3<f64>,
    ) -> na::Vector3<f64> {
        let radiation_pressure = irradiance / SPEED_OF_LIGHT;
        let force = radiation_pressure * self.area * self.coefficient * source_to_target_direction;
        self.last_force.set(force);
        force
    }
}

/// Collection of flat panels; the total force is the sum over panels.
///
/// The source is treated as sending parallel rays and panels do not shadow
/// each other.
#[derive(Debug)]
pub struct PaneledRadiationPressureTargetModel {
    panels: Vec<Panel>,
    state: UpdateState,
    last_force: Cell<na::Vector3<f64>>,
}

impl PaneledRadiationPressureTargetModel {
    pub fn new(panels: Vec<Panel>) -> Self {
        Self {
            panels,
            state: UpdateState::Stale,
            last_force: Cell::new(na::Vector3::zeros()),
        }
    }

    /// Sphere of `radius` split into `number_of_panels` equal panels, all
    /// sharing `reflection_law`.
    pub fn sphere(
        radius: f64,
        number_of_panels: usize,
        reflection_law: Arc<dyn ReflectionLaw>,
    ) -> Result<Self, RadiationPressureError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RadiationPressureError::InvalidRadius(radius));
        }
        if number_of_panels == 0 {
            return Err(RadiationPressureError::NoPanels);
        }
        let panel_area = 4.0 * PI * radius * radius / number_of_panels as f64;

        let panels = generate_evenly_spaced_points_staggered(number_of_panels)
            .into_iter()
            .map(|(polar_angle, azimuth_angle)| {
                let surface_normal = spherical_to_cartesian(1.0, polar_angle, azimuth_angle);
                Panel::new(panel_area, surface_normal, Arc::clone(&reflection_law))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(panels))
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn update_state(&self) -> UpdateState {
        self.state
    }

    pub fn last_evaluated_force(&self) -> na::Vector3<f64> {
        self.last_force.get()
    }

    /// Refreshes the normals of tracking panels. Repeated calls with the same
    /// time are no-ops; `None` or NaN always recomputes.
    pub fn update_members(&mut self, current_time: Option<f64>) {
        if self.state.is_current_at(current_time) {
            return;
        }

        for panel in self.panels.iter_mut().filter(|panel| panel.is_tracking()) {
            panel.update_members();
        }
        debug!(
            "Updated {} panels at t = {:?}",
            self.panels.len(),
            current_time
        );

        self.state = UpdateState::after_update(current_time);
    }

    pub fn evaluate_radiation_pressure_force(
        &self,
        irradiance: f64,
        source_to_target_direction: &na::Vector3<f64>,
    ) -> na::Vector3<f64> {
        let force = self
            .panels
            .iter()
            .map(|panel| {
                panel.evaluate_radiation_pressure_force(irradiance, source_to_target_direction)
            })
            .fold(na::Vector3::zeros(), |total, panel_force| total + panel_force);
        self.last_force.set(force);
        force
    }
}

/// Radiation pressure target of a body, as seen by the acceleration model.
#[derive(Debug)]
pub enum RadiationPressureTargetModel {
    Cannonball(CannonballRadiationPressureTargetModel),
    Paneled(PaneledRadiationPressureTargetModel),
}

impl RadiationPressureTargetModel {
    /// Must be called before evaluating at a new time. `None` requests an
    /// unconditional recompute.
    pub fn update_members(&mut self, current_time: Option<f64>) {
        match self {
            RadiationPressureTargetModel::Cannonball(model) => model.update_members(current_time),
            RadiationPressureTargetModel::Paneled(model) => model.update_members(current_time),
        }
    }

    /// Force (N for SI inputs) from `irradiance` (W/m²) arriving along the unit
    /// vector `source_to_target_direction`.
    pub fn evaluate_radiation_pressure_force(
        &self,
        irradiance: f64,
        source_to_target_direction: &na::Vector3<f64>,
    ) -> na::Vector3<f64> {
        match self {
            RadiationPressureTargetModel::Cannonball(model) => {
                model.evaluate_radiation_pressure_force(irradiance, source_to_target_direction)
            }
            RadiationPressureTargetModel::Paneled(model) => {
                model.evaluate_radiation_pressure_force(irradiance, source_to_target_direction)
            }
        }
    }

    pub fn update_state(&self) -> UpdateState {
        match self {
            RadiationPressureTargetModel::Cannonball(model) => model.update_state(),
            RadiationPressureTargetModel::Paneled(model) => model.update_state(),
        }
    }

    pub fn last_evaluated_force(&self) -> na::Vector3<f64> {
        match self {
            RadiationPressureTargetModel::Cannonball(model) => model.last_evaluated_force(),
            RadiationPressureTargetModel::Paneled(model) => model.last_evaluated_force(),
        }
    }
}

impl From<CannonballRadiationPressureTargetModel> for RadiationPressureTargetModel {
    fn from(model: CannonballRadiationPressureTargetModel) -> Self {
        RadiationPressureTargetModel::Cannonball(model)
    }
}

impl From<PaneledRadiationPressureTargetModel> for RadiationPressureTargetModel {
    fn from(model: PaneledRadiationPressureTargetModel) -> Self {
        RadiationPressureTargetModel::Paneled(model)
    }
}
