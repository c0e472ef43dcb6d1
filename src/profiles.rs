//! Spherical and disk samplers.
//!
//! Each sampler draws `n` independent particles of equal mass `mass / n`.
//! Radii come from the inverse of the profile's cumulative mass fraction,
//! directions are isotropic. Spherical profiles are cold (zero velocity).
//!
//! With a [`DarkMatter`] split the baryons are sampled first (tagged 0) with
//! mass `mass * (1 - fraction)`, then an independent dark-matter population
//! (tagged 1) with mass `mass * fraction`.

use crate::error::{invalid, Result};
use crate::sampling::{
    isotropic_direction, require_count, require_non_negative, require_positive, unit_open,
    validate_dark_matter,
};
use icbuilder_common::{DarkMatter, Ensemble, Particle, Species, Vec3};
use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};
use std::f64::consts::TAU;

/// Softening added to the disk radius in the circular-speed denominator.
pub const DISK_SOFTENING: f64 = 1e-6;

/// Vertical velocity dispersion of the disk, in units of the circular speed.
pub const DISK_VERTICAL_DISPERSION: f64 = 0.05;

/// Radius enclosing mass fraction `u` of a Plummer sphere.
pub fn plummer_radius(u: f64, scale: f64) -> f64 {
    scale / (u.powf(-2.0 / 3.0) - 1.0).sqrt()
}

/// Mass fraction of a Plummer sphere inside `r`.
pub fn plummer_cdf(r: f64, scale: f64) -> f64 {
    let r2 = r * r;
    (r2 / (r2 + scale * scale)).powf(1.5)
}

/// Radius enclosing mass fraction `u` of a Hernquist sphere.
pub fn hernquist_radius(u: f64, scale: f64) -> f64 {
    let s = u.sqrt();
    scale * s / (1.0 - s)
}

/// Mass fraction of a Hernquist sphere inside `r`.
pub fn hernquist_cdf(r: f64, scale: f64) -> f64 {
    let x = r / (r + scale);
    x * x
}

/// Planar disk radius for a uniform draw `u` in [0, 1).
pub fn exponential_disk_radius(u: f64, radius: f64) -> f64 {
    -radius * (1.0 - u).ln()
}

/// Disk mass inside cylindrical radius `r`.
pub fn disk_enclosed_mass(r: f64, radius: f64, mass: f64) -> f64 {
    let x = r / radius;
    // Rounding can push the bracket a hair below zero as r -> 0.
    (mass * (1.0 - (-x).exp() * (1.0 + x))).max(0.0)
}

/// Circular speed at `r` from the enclosed disk mass.
pub fn disk_circular_speed(r: f64, radius: f64, mass: f64) -> f64 {
    (disk_enclosed_mass(r, radius, mass) / (r + DISK_SOFTENING)).sqrt()
}

/// Uniform-density sphere at rest.
pub fn uniform_sphere<R: Rng>(rng: &mut R, n: usize, radius: f64, mass: f64) -> Result<Ensemble> {
    require_count("n", n)?;
    require_positive("radius", radius)?;
    require_positive("mass", mass)?;

    let m = mass / n as f64;
    let ensemble: Ensemble = (0..n)
        .map(|_| {
            let r = radius * rng.random::<f64>().cbrt();
            Particle::at_rest(isotropic_direction(rng) * r, m)
        })
        .collect();

    debug!("Sampled {} uniform-sphere particles (radius={}, mass={})", n, radius, mass);
    Ok(ensemble)
}

/// Plummer sphere with no velocity dispersion.
pub fn cold_plummer<R: Rng>(
    rng: &mut R,
    n: usize,
    scale: f64,
    mass: f64,
    dark_matter: Option<DarkMatter>,
) -> Result<Ensemble> {
    require_count("n", n)?;
    require_positive("scale", scale)?;
    require_positive("mass", mass)?;

    let ensemble = split_population(rng, n, mass, dark_matter, |rng, count, component_mass, species| {
        cold_sphere(rng, count, component_mass, species, |u| plummer_radius(u, scale))
    })?;

    debug!(
        "Sampled {} cold Plummer particles (scale={}, mass={}, dark_matter={:?})",
        ensemble.len(),
        scale,
        mass,
        dark_matter
    );
    Ok(ensemble)
}

/// Hernquist sphere at rest.
pub fn hernquist<R: Rng>(
    rng: &mut R,
    n: usize,
    scale: f64,
    mass: f64,
    dark_matter: Option<DarkMatter>,
) -> Result<Ensemble> {
    require_count("n", n)?;
    require_positive("scale", scale)?;
    require_positive("mass", mass)?;

    let ensemble = split_population(rng, n, mass, dark_matter, |rng, count, component_mass, species| {
        cold_sphere(rng, count, component_mass, species, |u| hernquist_radius(u, scale))
    })?;

    debug!(
        "Sampled {} Hernquist particles (scale={}, mass={}, dark_matter={:?})",
        ensemble.len(),
        scale,
        mass,
        dark_matter
    );
    Ok(ensemble)
}

/// Rotating exponential disk in the xy-plane.
///
/// Particles move on circular orbits set by the disk mass enclosed within
/// their cylindrical radius, with a small vertical velocity dispersion. A
/// dark-matter split adds a Hernquist halo of scale `radius` after the disk.
pub fn disk<R: Rng>(
    rng: &mut R,
    n: usize,
    radius: f64,
    mass: f64,
    thickness: f64,
    dark_matter: Option<DarkMatter>,
) -> Result<Ensemble> {
    require_count("n", n)?;
    require_positive("radius", radius)?;
    require_positive("mass", mass)?;
    require_non_negative("thickness", thickness)?;
    let halo_n = dark_matter
        .as_ref()
        .map(|dm| validate_dark_matter(dm, n))
        .transpose()?;
    let vertical = Normal::new(0.0, thickness)
        .map_err(|e| invalid(format!("thickness {}: {}", thickness, e)))?;

    let (disk_mass, disk_species) = match &dark_matter {
        Some(dm) => (mass * (1.0 - dm.fraction), Some(Species::Baryonic)),
        None => (mass, None),
    };
    let m = disk_mass / n as f64;

    let mut ensemble = Ensemble::new();
    for _ in 0..n {
        let r = exponential_disk_radius(rng.random::<f64>(), radius);
        let phi = TAU * rng.random::<f64>();
        let z = vertical.sample(rng);
        let v = disk_circular_speed(r, radius, disk_mass);
        let vz = DISK_VERTICAL_DISPERSION * v * rng.sample::<f64, _>(StandardNormal);

        let (sin_phi, cos_phi) = phi.sin_cos();
        let mut particle = Particle::new(
            Vec3::new(r * cos_phi, r * sin_phi, z),
            Vec3::new(-v * sin_phi, v * cos_phi, vz),
            m,
        );
        particle.species = disk_species;
        ensemble.push(particle);
    }

    if let (Some(dm), Some(halo_n)) = (dark_matter, halo_n) {
        ensemble.append(cold_sphere(
            rng,
            halo_n,
            mass * dm.fraction,
            Some(Species::DarkMatter),
            |u| hernquist_radius(u, radius),
        ));
    }

    debug!(
        "Sampled {} disk particles (radius={}, mass={}, thickness={}, halo={:?})",
        ensemble.len(),
        radius,
        mass,
        thickness,
        halo_n
    );
    Ok(ensemble)
}

/// Cold isotropic sphere whose radii are `radius_of(u)` for open uniform `u`.
pub(crate) fn cold_sphere<R, F>(
    rng: &mut R,
    n: usize,
    mass: f64,
    species: Option<Species>,
    radius_of: F,
) -> Ensemble
where
    R: Rng,
    F: Fn(f64) -> f64,
{
    let m = mass / n as f64;
    (0..n)
        .map(|_| {
            let r = radius_of(unit_open(rng));
            let mut particle = Particle::at_rest(isotropic_direction(rng) * r, m);
            particle.species = species;
            particle
        })
        .collect()
}

/// Samples one population, or a baryon + dark-matter pair when a split is
/// requested. `sample` receives the count, component mass and species tag.
pub(crate) fn split_population<R, F>(
    rng: &mut R,
    n: usize,
    mass: f64,
    dark_matter: Option<DarkMatter>,
    mut sample: F,
) -> Result<Ensemble>
where
    R: Rng,
    F: FnMut(&mut R, usize, f64, Option<Species>) -> Ensemble,
{
    match dark_matter {
        None => Ok(sample(rng, n, mass, None)),
        Some(dm) => {
            let dm_n = validate_dark_matter(&dm, n)?;
            let mut ensemble = sample(rng, n, mass * (1.0 - dm.fraction), Some(Species::Baryonic));
            ensemble.append(sample(rng, dm_n, mass * dm.fraction, Some(Species::DarkMatter)));
            Ok(ensemble)
        }
    }
}
