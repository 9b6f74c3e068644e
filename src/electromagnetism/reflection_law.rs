use super::errors::RadiationPressureError;
use crate::constants::PI;
use nalgebra as na;
use std::fmt;

/// Allowed deviation of `absorptivity + specular + diffuse` from 1.
const ENERGY_CONSERVATION_TOLERANCE: f64 = 20.0 * f64::EPSILON;

/// Norm-relative precision for treating an observer as lying on the mirror direction.
const SPECULAR_MATCH_PRECISION: f64 = 1e-12;

/// Describes how a surface absorbs and reflects incident radiation.
///
/// Direction conventions shared by all laws:
/// - `incoming_direction` points from the source towards the surface,
/// - `observer_direction` points from the surface towards the observer.
///
/// All vectors are expected to be unit length; this is not checked.
pub trait ReflectionLaw: fmt::Debug + Send + Sync {
    /// Fraction of incident radiation reflected towards the observer, per steradian.
    fn evaluate_reflected_fraction(
        &self,
        surface_normal: &na::Vector3<f64>,
        incoming_direction: &na::Vector3<f64>,
        observer_direction: &na::Vector3<f64>,
    ) -> f64;

    /// Force per unit area and unit radiation pressure exerted on the surface.
    fn evaluate_reaction_vector(
        &self,
        surface_normal: &na::Vector3<f64>,
        incoming_direction: &na::Vector3<f64>,
    ) -> na::Vector3<f64>;
}

/// Combination of absorption, ideal specular reflection and Lambertian diffuse
/// reflection, optionally with instantaneous Lambertian re-radiation of the
/// absorbed energy from the front face.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecularDiffuseMixReflectionLaw {
    absorptivity: f64,
    specular_reflectivity: f64,
    diffuse_reflectivity: f64,
    with_instantaneous_reradiation: bool,
}

impl SpecularDiffuseMixReflectionLaw {
    pub fn new(
        absorptivity: f64,
        specular_reflectivity: f64,
        diffuse_reflectivity: f64,
        with_instantaneous_reradiation: bool,
    ) -> Result<Self, RadiationPressureError> {
        check_unit_interval("absorptivity", absorptivity)?;
        check_unit_interval("specular reflectivity", specular_reflectivity)?;
        check_unit_interval("diffuse reflectivity", diffuse_reflectivity)?;

        let sum = absorptivity + specular_reflectivity + diffuse_reflectivity;
        if (sum - 1.0).abs() > ENERGY_CONSERVATION_TOLERANCE {
            return Err(RadiationPressureError::EnergyNotConserved { sum });
        }

        Ok(Self {
            absorptivity,
            specular_reflectivity,
            diffuse_reflectivity,
            with_instantaneous_reradiation,
        })
    }

    /// Absorptivity is whatever is not reflected.
    pub fn from_specular_and_diffuse_reflectivity(
        specular_reflectivity: f64,
        diffuse_reflectivity: f64,
        with_instantaneous_reradiation: bool,
    ) -> Result<Self, RadiationPressureError> {
        check_unit_interval("specular reflectivity", specular_reflectivity)?;
        check_unit_interval("diffuse reflectivity", diffuse_reflectivity)?;

        let absorptivity = remainder(specular_reflectivity, diffuse_reflectivity)?;
        Ok(Self {
            absorptivity,
            specular_reflectivity,
            diffuse_reflectivity,
            with_instantaneous_reradiation,
        })
    }

    /// Specular reflectivity is whatever is neither absorbed nor diffusely reflected.
    pub fn from_absorptivity_and_diffuse_reflectivity(
        absorptivity: f64,
        diffuse_reflectivity: f64,
        with_instantaneous_reradiation: bool,
    ) -> Result<Self, RadiationPressureError> {
        check_unit_interval("absorptivity", absorptivity)?;
        check_unit_interval("diffuse reflectivity", diffuse_reflectivity)?;

        let specular_reflectivity = remainder(absorptivity, diffuse_reflectivity)?;
        Ok(Self {
            absorptivity,
            specular_reflectivity,
            diffuse_reflectivity,
            with_instantaneous_reradiation,
        })
    }

    /// Splits a total reflectivity into its specular share `specular_fraction`
    /// and a diffuse remainder.
    pub fn from_reflectivity_and_specular_fraction(
        reflectivity: f64,
        specular_fraction: f64,
        with_instantaneous_reradiation: bool,
    ) -> Result<Self, RadiationPressureError> {
        check_unit_interval("reflectivity", reflectivity)?;
        check_unit_interval("specular fraction", specular_fraction)?;

        let specular_reflectivity = reflectivity * specular_fraction;
        let diffuse_reflectivity = reflectivity - specular_reflectivity;
        Self::from_specular_and_diffuse_reflectivity(
            specular_reflectivity,
            diffuse_reflectivity,
            with_instantaneous_reradiation,
        )
    }

    pub fn absorptivity(&self) -> f64 {
        self.absorptivity
    }

    pub fn specular_reflectivity(&self) -> f64 {
        self.specular_reflectivity
    }

    pub fn diffuse_reflectivity(&self) -> f64 {
        self.diffuse_reflectivity
    }

    pub fn with_instantaneous_reradiation(&self) -> bool {
        self.with_instantaneous_reradiation
    }
}

impl ReflectionLaw for SpecularDiffuseMixReflectionLaw {
    fn evaluate_reflected_fraction(
        &self,
        surface_normal: &na::Vector3<f64>,
        incoming_direction: &na::Vector3<f64>,
        observer_direction: &na::Vector3<f64>,
    ) -> f64 {
        let cos_incoming = surface_normal.dot(&-incoming_direction);
        let cos_observer = surface_normal.dot(observer_direction);
        if cos_incoming <= 0.0 || cos_observer <= 0.0 {
            // Lit from behind, or observer behind the surface
            return 0.0;
        }

        let diffuse_reflectance = self.diffuse_reflectivity / PI;

        let mirror_direction = compute_mirrorlike_reflection(incoming_direction, surface_normal);
        if is_approx(observer_direction, &mirror_direction) {
            diffuse_reflectance + self.specular_reflectivity / cos_incoming
        } else {
            diffuse_reflectance
        }
    }

    fn evaluate_reaction_vector(
        &self,
        surface_normal: &na::Vector3<f64>,
        incoming_direction: &na::Vector3<f64>,
    ) -> na::Vector3<f64> {
        let cos_incoming = surface_normal.dot(&-incoming_direction);
        if cos_incoming <= 0.0 {
            return na::Vector3::zeros();
        }

        let from_incidence = (self.absorptivity + self.diffuse_reflectivity) * incoming_direction;
        let from_reflection = -(2.0 / 3.0 * self.diffuse_reflectivity
            + 2.0 * self.specular_reflectivity * cos_incoming)
            * surface_normal;

        // Re-emission of absorbed energy behaves like diffuse reflection
        let from_reradiation = if self.with_instantaneous_reradiation {
            -(2.0 / 3.0 * self.absorptivity) * surface_normal
        } else {
            na::Vector3::zeros()
        };

        from_incidence + from_reflection + from_reradiation
    }
}

/// Mirrors `vector_to_mirror` about the plane with normal `surface_normal`.
///
/// Only the front face reflects: a vector that does not hit the front face
/// (`v · n >= 0`) yields the zero vector.
pub fn compute_mirrorlike_reflection(
    vector_to_mirror: &na::Vector3<f64>,
    surface_normal: &na::Vector3<f64>,
) -> na::Vector3<f64> {
    let vector_dot_normal = vector_to_mirror.dot(surface_normal);
    if vector_dot_normal >= 0.0 {
        return na::Vector3::zeros();
    }
    vector_to_mirror - 2.0 * vector_dot_normal * surface_normal
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<(), RadiationPressureError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RadiationPressureError::ReflectivityOutOfRange { name, value })
    }
}

/// `1 - first - second`, rejecting pairs that already exceed unity.
fn remainder(first: f64, second: f64) -> Result<f64, RadiationPressureError> {
    let rest = 1.0 - first - second;
    if rest < -ENERGY_CONSERVATION_TOLERANCE {
        return Err(RadiationPressureError::EnergyNotConserved {
            sum: first + second,
        });
    }
    // Rounding noise only
    Ok(rest.max(0.0))
}

fn is_approx(first: &na::Vector3<f64>, second: &na::Vector3<f64>) -> bool {
    (first - second).norm() <= SPECULAR_MATCH_PRECISION * first.norm().min(second.norm())
}
