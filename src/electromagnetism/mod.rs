pub mod errors;
pub mod panel;
pub mod reflection_law;
pub mod source_model;
pub mod target_model;

pub use errors::RadiationPressureError;
pub use panel::{Panel, PanelOrientation};
pub use reflection_law::{
    compute_mirrorlike_reflection, ReflectionLaw, SpecularDiffuseMixReflectionLaw,
};
pub use source_model::IsotropicPointSource;
pub use target_model::{
    CannonballRadiationPressureTargetModel, PaneledRadiationPressureTargetModel,
    RadiationPressureTargetModel, UpdateState,
};
