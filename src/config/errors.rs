use crate::electromagnetism::RadiationPressureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid radiation pressure model: {0}")]
    Model(#[from] RadiationPressureError),

    #[error("panel table contains no panels")]
    EmptyPanelTable,

    #[error("panel {index} follows the source direction; build it with `build_for_body`")]
    TrackingPanelWithoutGeometry { index: usize },
}
