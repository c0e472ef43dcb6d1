//! Initial-condition generator for N-body gravitational simulations.
//!
//! Builders turn physical model parameters into an [`Ensemble`] of particles
//! (G = 1 units). Every randomised builder takes the generator explicitly, so
//! a seeded [`rand::rngs::StdRng`] reproduces an ensemble exactly.

pub mod choreography;
pub mod composite;
pub mod cosmology;
pub mod error;
pub mod planetary;
pub mod profiles;
pub mod sampling;
pub mod scenario;
pub mod sink;
pub mod transform;

pub use choreography::{binary_system, four_body_cross, three_body_figure_eight};
pub use composite::{composite_galaxy, two_galaxies};
pub use cosmology::big_bang_ic;
pub use error::{IcError, Result};
pub use planetary::{random_solar_system, random_solar_system_seeded};
pub use profiles::{cold_plummer, disk, hernquist, uniform_sphere};
pub use sink::{load, save, save_as};
pub use transform::rotate_z;

pub use icbuilder_common::{
    BigBangParams, DarkMatter, DiskComponent, Ensemble, MergerGalaxy, OutputFormat, ParamRange,
    Particle, SolarSystemParams, Species, SphereComponent, Vec3,
};
