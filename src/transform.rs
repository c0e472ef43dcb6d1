//! Rigid transforms applied once per particle when composing ensembles.

use icbuilder_common::{Ensemble, Vec3};

pub use icbuilder_common::vecmath::rotate_z;

/// Rotates positions and velocities about the z-axis by `angle` radians.
pub fn rotated_z(ensemble: Ensemble, angle: f64) -> Ensemble {
    ensemble
        .into_iter()
        .map(|mut p| {
            p.set_position(p.position().rotate_z(angle));
            p.set_velocity(p.velocity().rotate_z(angle));
            p
        })
        .collect()
}

/// Shifts every position by `offset`.
pub fn translated(ensemble: Ensemble, offset: Vec3) -> Ensemble {
    ensemble
        .into_iter()
        .map(|mut p| {
            p.set_position(p.position() + offset);
            p
        })
        .collect()
}

/// Adds `delta_v` to every velocity.
pub fn boosted(ensemble: Ensemble, delta_v: Vec3) -> Ensemble {
    ensemble
        .into_iter()
        .map(|mut p| {
            p.set_velocity(p.velocity() + delta_v);
            p
        })
        .collect()
}
