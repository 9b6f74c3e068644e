use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RadiationPressureError {
    #[error("{name} must lie in [0, 1], got {value}")]
    ReflectivityOutOfRange { name: &'static str, value: f64 },

    #[error("absorptivity, specular and diffuse reflectivity must sum to 1, got {sum}")]
    EnergyNotConserved { sum: f64 },

    #[error("area must be positive and finite, got {0}")]
    InvalidArea(f64),

    #[error("radiation pressure coefficient must be non-negative and finite, got {0}")]
    InvalidCoefficient(f64),

    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("a paneled target needs at least one panel")]
    NoPanels,

    #[error("surface normal has zero length")]
    DegenerateSurfaceNormal,

    #[error("source luminosity must be non-negative and finite, got {0}")]
    InvalidLuminosity(f64),

    #[error("distance to source must be positive and finite, got {0}")]
    InvalidDistance(f64),
}
