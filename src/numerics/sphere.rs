use crate::constants::PI;
use nalgebra as na;

/// Nearly uniform points on the unit sphere as `(polar, azimuth)` pairs.
///
/// Points are staggered along a golden-angle spiral: the cosine of the polar
/// angle steps evenly from pole to pole with a half-step offset, so every
/// point stands for an equal share of the surface.
pub fn generate_evenly_spaced_points_staggered(number_of_points: usize) -> Vec<(f64, f64)> {
    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let n = number_of_points as f64;

    (0..number_of_points)
        .map(|i| {
            let i = i as f64;
            let polar_angle = (1.0 - 2.0 * (i + 0.5) / n).acos();
            let azimuth_angle = (golden_angle * i).rem_euclid(2.0 * PI);
            (polar_angle, azimuth_angle)
        })
        .collect()
}

/// Polar angle measured from +z, azimuth from +x towards +y.
pub fn spherical_to_cartesian(
    radius: f64,
    polar_angle: f64,
    azimuth_angle: f64,
) -> na::Vector3<f64> {
    let (sin_polar, cos_polar) = polar_angle.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth_angle.sin_cos();
    radius * na::Vector3::new(sin_polar * cos_azimuth, sin_polar * sin_azimuth, cos_polar)
}
