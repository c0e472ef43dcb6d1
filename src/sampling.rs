//! Random draws and parameter checks shared by every sampler.

use crate::error::{invalid, Result};
use icbuilder_common::{DarkMatter, ParamRange, Vec3};
use rand::distr::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::f64::consts::TAU;

/// Generator seeded from `seed`, or from the OS when no seed is given.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Uniform draw from the open interval (0, 1).
pub fn unit_open<R: Rng>(rng: &mut R) -> f64 {
    rng.sample(Open01)
}

/// Unit vector with isotropic direction: `theta = acos(2u - 1)`, `phi = 2 pi u`.
pub fn isotropic_direction<R: Rng>(rng: &mut R) -> Vec3 {
    let theta = (2.0 * rng.random::<f64>() - 1.0).acos();
    let phi = TAU * rng.random::<f64>();
    Vec3::from_spherical(theta, phi)
}

/// Vector with independent normal components of standard deviation `sigma`.
pub fn gaussian_vector<R: Rng>(rng: &mut R, sigma: f64) -> Vec3 {
    let x: f64 = rng.sample(StandardNormal);
    let y: f64 = rng.sample(StandardNormal);
    let z: f64 = rng.sample(StandardNormal);
    Vec3::new(x, y, z).scale(sigma)
}

/// Uniform draw from an inclusive float range.
pub fn sample_range<R: Rng>(rng: &mut R, range: &ParamRange<f64>) -> f64 {
    if range.min == range.max {
        range.min
    } else {
        rng.random_range(range.min..=range.max)
    }
}

/// Uniform draw from an inclusive integer range.
pub fn sample_count<R: Rng>(rng: &mut R, range: &ParamRange<usize>) -> usize {
    rng.random_range(range.min..=range.max)
}

pub(crate) fn require_count(name: &str, n: usize) -> Result<()> {
    if n == 0 {
        return Err(invalid(format!("{} must be at least 1", name)));
    }
    Ok(())
}

pub(crate) fn require_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(invalid(format!("{} must be finite, got {}", name, value)));
    }
    Ok(())
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(format!("{} must be positive, got {}", name, value)));
    }
    Ok(())
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(invalid(format!("{} must be non-negative, got {}", name, value)));
    }
    Ok(())
}

pub(crate) fn require_range(name: &str, range: &ParamRange<f64>) -> Result<()> {
    require_finite(&format!("{}.min", name), range.min)?;
    require_finite(&format!("{}.max", name), range.max)?;
    if range.is_empty() {
        return Err(invalid(format!(
            "{} is empty: min {} > max {}",
            name, range.min, range.max
        )));
    }
    if !(range.max - range.min).is_finite() {
        return Err(invalid(format!(
            "{} is too wide: max - min overflows ({} .. {})",
            name, range.min, range.max
        )));
    }
    Ok(())
}

/// Checks a dark-matter split and returns the dark-matter particle count.
pub(crate) fn validate_dark_matter(dark_matter: &DarkMatter, baryonic_n: usize) -> Result<usize> {
    let fraction = dark_matter.fraction;
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(invalid(format!(
            "dark_matter.fraction must lie in (0, 1), got {}",
            fraction
        )));
    }
    let n = dark_matter.count(baryonic_n);
    require_count("dark_matter.n", n)?;
    Ok(n)
}
