pub mod config;
pub mod constants;
pub mod electromagnetism;
pub mod models;
pub mod numerics;
pub mod physics;
