pub mod radiation_pressure;
