pub trait SpacecraftProperties {
    fn mass(&self) -> f64;
}
