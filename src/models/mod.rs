pub mod geometry;
pub mod spacecraft;

pub use geometry::{BodyGeometry, SharedGeometry};
pub use spacecraft::SpacecraftProperties;
