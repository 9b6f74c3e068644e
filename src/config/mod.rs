pub mod errors;
pub mod spacecraft;
pub mod target;

pub use errors::ConfigError;
pub use target::{
    load_panel_table, read_panel_table, MaterialSettings, PanelSettings, Pointing,
    TargetModelSettings,
};
