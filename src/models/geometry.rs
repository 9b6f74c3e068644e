use nalgebra as na;
use std::cell::Cell;
use std::rc::Rc;

/// Instantaneous geometry that tracking panels read their normals from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyGeometry {
    /// Rotation from body frame to the propagation frame.
    pub attitude: na::UnitQuaternion<f64>,
    /// Unit vector from the body towards the radiation source.
    pub target_to_source: na::Vector3<f64>,
}

impl Default for BodyGeometry {
    fn default() -> Self {
        Self {
            attitude: na::UnitQuaternion::identity(),
            target_to_source: na::Vector3::x(),
        }
    }
}

/// Geometry written by the driver once per step and read by panel closures.
pub type SharedGeometry = Rc<Cell<BodyGeometry>>;
