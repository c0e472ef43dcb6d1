pub mod config;
pub mod params;
pub mod particle;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{ModelConfig, OutputConfig, OutputFormat, RandomConfig, ScenarioConfig};
pub use params::{
    BigBangParams, DarkMatter, DiskComponent, MergerGalaxy, ParamRange, SolarSystemParams,
    SphereComponent,
};
pub use particle::{Ensemble, Particle, Species};
pub use vecmath::{rotate_z, Vec3};
