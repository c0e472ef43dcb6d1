//! Builders that combine several sampled populations into one ensemble.

use crate::error::Result;
use crate::profiles::{disk, hernquist};
use crate::sampling::require_finite;
use crate::transform::{boosted, rotated_z, translated};
use icbuilder_common::{DiskComponent, Ensemble, MergerGalaxy, SphereComponent, Vec3};
use log::{debug, warn};
use rand::Rng;

/// Bulge (Hernquist), then disk (exponential), then halo (Hernquist).
///
/// A component with `n == 0` is skipped and its other parameters are not
/// checked.
pub fn composite_galaxy<R: Rng>(
    rng: &mut R,
    bulge: &SphereComponent,
    disk_params: &DiskComponent,
    halo: &SphereComponent,
) -> Result<Ensemble> {
    let mut ensemble = Ensemble::new();

    if bulge.n > 0 {
        ensemble.append(hernquist(rng, bulge.n, bulge.scale, bulge.mass, None)?);
    } else {
        warn!("Composite galaxy: bulge has no particles, skipping.");
    }
    if disk_params.n > 0 {
        ensemble.append(disk(
            rng,
            disk_params.n,
            disk_params.scale,
            disk_params.mass,
            disk_params.thickness,
            None,
        )?);
    } else {
        warn!("Composite galaxy: disk has no particles, skipping.");
    }
    if halo.n > 0 {
        ensemble.append(hernquist(rng, halo.n, halo.scale, halo.mass, None)?);
    } else {
        warn!("Composite galaxy: halo has no particles, skipping.");
    }

    debug!(
        "Built composite galaxy: {} bulge + {} disk + {} halo particles",
        bulge.n, disk_params.n, halo.n
    );
    Ok(ensemble)
}

/// Two Hernquist galaxies on an approach course in their center-of-mass frame.
///
/// Galaxy 2 is rotated about z by `angle_deg`, then the galaxies are placed at
/// `(-offset1, 0, 0)` and `(+offset2, 0, 0)` and given y-velocities of
/// `+v_rel / 2` and `-v_rel / 2`. Galaxy 1 is sampled first and emitted first.
pub fn two_galaxies<R: Rng>(
    rng: &mut R,
    galaxy1: &MergerGalaxy,
    galaxy2: &MergerGalaxy,
    angle_deg: f64,
    v_rel: f64,
) -> Result<Ensemble> {
    require_finite("galaxy1.offset", galaxy1.offset)?;
    require_finite("galaxy2.offset", galaxy2.offset)?;
    require_finite("angle_deg", angle_deg)?;
    require_finite("v_rel", v_rel)?;

    let first = hernquist(rng, galaxy1.n, galaxy1.scale, galaxy1.mass, None)?;
    let second = hernquist(rng, galaxy2.n, galaxy2.scale, galaxy2.mass, None)?;

    let first = boosted(
        translated(first, Vec3::new(-galaxy1.offset, 0.0, 0.0)),
        Vec3::new(0.0, 0.5 * v_rel, 0.0),
    );
    let second = boosted(
        translated(
            rotated_z(second, angle_deg.to_radians()),
            Vec3::new(galaxy2.offset, 0.0, 0.0),
        ),
        Vec3::new(0.0, -0.5 * v_rel, 0.0),
    );

    let mut ensemble = first;
    ensemble.append(second);

    debug!(
        "Built galaxy merger: {} + {} particles, angle={} deg, v_rel={}",
        galaxy1.n, galaxy2.n, angle_deg, v_rel
    );
    Ok(ensemble)
}
