//! "Big bang" initial conditions: a sphere expanding with a Hubble flow.

use crate::error::{invalid, Result};
use crate::sampling::{
    gaussian_vector, isotropic_direction, require_count, require_finite, require_non_negative,
    require_positive, validate_dark_matter,
};
use icbuilder_common::{BigBangParams, Ensemble, Particle, Species};
use log::debug;
use rand::Rng;

/// Samples an expanding cloud. Every particle carries a species tag.
///
/// Radii follow `r = radius * u^(1 / (3 center_bias))` and velocities are
/// radial with magnitude `hubble_k * r`. Baryons additionally receive a
/// normal positional perturbation of width `perturb_amp * radius` and a
/// velocity jitter of width `vel_jitter * hubble_k * r`; dark matter follows
/// the smooth flow. With a split, baryons are emitted before dark matter.
pub fn big_bang_ic<R: Rng>(rng: &mut R, params: &BigBangParams) -> Result<Ensemble> {
    require_count("n", params.n)?;
    require_positive("radius", params.radius)?;
    require_positive("mass", params.mass)?;
    require_finite("hubble_k", params.hubble_k)?;
    require_positive("center_bias", params.center_bias)?;
    require_non_negative("perturb_amp", params.perturb_amp)?;
    require_non_negative("vel_jitter", params.vel_jitter)?;

    let ensemble = match &params.dark_matter {
        None => hubble_cloud(rng, params, params.n, params.mass, Species::Baryonic),
        Some(dm) => {
            let dm_n = validate_dark_matter(dm, params.n)?;
            let mut ensemble = hubble_cloud(
                rng,
                params,
                params.n,
                params.mass * (1.0 - dm.fraction),
                Species::Baryonic,
            );
            ensemble.append(hubble_cloud(
                rng,
                params,
                dm_n,
                params.mass * dm.fraction,
                Species::DarkMatter,
            ));
            ensemble
        }
    };

    if ensemble.iter().any(|p| !(p.position().is_finite() && p.velocity().is_finite())) {
        return Err(invalid("big bang parameters produced non-finite particles"));
    }

    debug!(
        "Sampled {} big bang particles (radius={}, hubble_k={}, center_bias={}, dark_matter={:?})",
        ensemble.len(),
        params.radius,
        params.hubble_k,
        params.center_bias,
        params.dark_matter
    );
    Ok(ensemble)
}

fn hubble_cloud<R: Rng>(
    rng: &mut R,
    params: &BigBangParams,
    n: usize,
    mass: f64,
    species: Species,
) -> Ensemble {
    let m = mass / n as f64;
    let exponent = 1.0 / (3.0 * params.center_bias);
    let perturbed = species == Species::Baryonic;

    (0..n)
        .map(|_| {
            let r = params.radius * rng.random::<f64>().powf(exponent);
            let direction = isotropic_direction(rng);
            let speed = params.hubble_k * r;
            let mut position = direction * r;
            let mut velocity = direction * speed;
            if perturbed {
                position += gaussian_vector(rng, params.perturb_amp * params.radius);
                velocity += gaussian_vector(rng, params.vel_jitter * speed.abs());
            }
            Particle::new(position, velocity, m).with_species(species)
        })
        .collect()
}
