pub const G: f64 = 6.67430e-11; // Gravitational constant (m³/kg/s²)
pub const M_EARTH: f64 = 5.972e24; // Mass of Earth (kg)
pub const WGS84_A: f64 = 6378137.0; // Semi-major axis [m]

// Radiation
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0; // m/s
pub const SOLAR_CONSTANT: f64 = 1361.0; // Solar irradiance at 1 AU (W/m^2)
pub const ASTRONOMICAL_UNIT: f64 = 1.495_978_707e11; // m

// Math
pub const PI: f64 = std::f64::consts::PI;
