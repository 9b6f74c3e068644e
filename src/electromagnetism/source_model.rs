use super::errors::RadiationPressureError;
use crate::constants::{ASTRONOMICAL_UNIT, PI, SOLAR_CONSTANT};

/// Point source radiating its luminosity uniformly in all directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsotropicPointSource {
    luminosity: f64,
}

impl IsotropicPointSource {
    pub fn new(luminosity: f64) -> Result<Self, RadiationPressureError> {
        if !(luminosity.is_finite() && luminosity >= 0.0) {
            return Err(RadiationPressureError::InvalidLuminosity(luminosity));
        }
        Ok(Self { luminosity })
    }

    /// Source whose irradiance at `distance` equals `irradiance`.
    pub fn from_irradiance_at_distance(
        irradiance: f64,
        distance: f64,
    ) -> Result<Self, RadiationPressureError> {
        if !(distance.is_finite() && distance > 0.0) {
            return Err(RadiationPressureError::InvalidDistance(distance));
        }
        Self::new(4.0 * PI * distance * distance * irradiance)
    }

    /// The Sun, scaled from the solar constant at 1 AU.
    pub fn sun() -> Self {
        Self {
            luminosity: 4.0 * PI * ASTRONOMICAL_UNIT * ASTRONOMICAL_UNIT * SOLAR_CONSTANT,
        }
    }

    pub fn luminosity(&self) -> f64 {
        self.luminosity
    }

    /// Irradiance (W/m²) at `distance` from the source.
    pub fn irradiance_at(&self, distance: f64) -> f64 {
        self.luminosity / (4.0 * PI * distance * distance)
    }
}
