//! Deterministic few-body configurations. No randomness is involved.

use crate::error::Result;
use crate::sampling::require_positive;
use icbuilder_common::{Ensemble, Particle, Vec3};

/// Figure-eight positions and velocities for three unit masses.
const FIGURE_EIGHT: [([f64; 3], [f64; 3]); 3] = [
    ([0.97000436, -0.24308753, 0.0], [0.466203685, 0.43236573, 0.0]),
    ([-0.97000436, 0.24308753, 0.0], [0.466203685, 0.43236573, 0.0]),
    ([0.0, 0.0, 0.0], [-0.93240737, -0.86473146, 0.0]),
];

/// Circular speed of four unit masses on the corners of a unit-circumradius
/// square: `sqrt(1/4 + 1/sqrt(2))`.
const CROSS_SPEED: f64 = 0.978_318_343_478_515_9;

/// Four-body cross positions and velocities for unit masses.
const FOUR_BODY_CROSS: [([f64; 3], [f64; 3]); 4] = [
    ([1.0, 0.0, 0.0], [0.0, CROSS_SPEED, 0.0]),
    ([0.0, 1.0, 0.0], [-CROSS_SPEED, 0.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, -CROSS_SPEED, 0.0]),
    ([0.0, -1.0, 0.0], [CROSS_SPEED, 0.0, 0.0]),
];

/// Two bodies on a circular orbit about their barycenter at the origin.
///
/// The bodies lie on the x-axis, `mass1` on the negative side. Each velocity
/// is the relative speed `sqrt((mass1 + mass2) / separation)` weighted by the
/// other body's mass fraction, so the total momentum vanishes.
pub fn binary_system(separation: f64, mass1: f64, mass2: f64) -> Result<Ensemble> {
    require_positive("separation", separation)?;
    require_positive("mass1", mass1)?;
    require_positive("mass2", mass2)?;

    let total = mass1 + mass2;
    let relative_speed = (total / separation).sqrt();

    let first = Particle::new(
        Vec3::new(-separation * mass2 / total, 0.0, 0.0),
        Vec3::new(0.0, relative_speed * mass2 / total, 0.0),
        mass1,
    );
    let second = Particle::new(
        Vec3::new(separation * mass1 / total, 0.0, 0.0),
        Vec3::new(0.0, -relative_speed * mass1 / total, 0.0),
        mass2,
    );
    Ok(vec![first, second].into())
}

/// The Chenciner-Montgomery figure-eight for three bodies of `mass` each.
pub fn three_body_figure_eight(mass: f64) -> Result<Ensemble> {
    require_positive("mass", mass)?;
    Ok(from_table(&FIGURE_EIGHT, mass))
}

/// Four equal bodies on a rotating cross (square) configuration.
pub fn four_body_cross(mass: f64) -> Result<Ensemble> {
    require_positive("mass", mass)?;
    Ok(from_table(&FOUR_BODY_CROSS, mass))
}

// Tables are for unit masses; with G = 1 velocities scale as sqrt(mass).
fn from_table(table: &[([f64; 3], [f64; 3])], mass: f64) -> Ensemble {
    let speed_scale = mass.sqrt();
    table
        .iter()
        .map(|&([x, y, z], [vx, vy, vz])| {
            Particle::new(
                Vec3::new(x, y, z),
                Vec3::new(vx, vy, vz).scale(speed_scale),
                mass,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn binary_reference_configuration() {
        let ensemble = binary_system(1.0, 10.0, 1.0).unwrap();
        assert_eq!(ensemble.len(), 2);
        let (a, b) = (ensemble.particles()[0], ensemble.particles()[1]);
        assert_relative_eq!(a.x, -1.0 / 11.0, epsilon = 1e-15);
        assert_relative_eq!(b.x, 10.0 / 11.0, epsilon = 1e-15);
        assert_eq!((a.y, a.z, b.y, b.z), (0.0, 0.0, 0.0, 0.0));
        assert_eq!((a.m, b.m), (10.0, 1.0));
        // Relative velocity is the circular speed for the separation.
        assert_relative_eq!(a.vy - b.vy, 11.0_f64.sqrt(), max_relative = 1e-12);
        assert!(a.vy > 0.0 && b.vy < 0.0);
    }

    #[test]
    fn binary_momentum_and_barycenter_vanish() {
        for &(sep, m1, m2) in &[(1.0, 10.0, 1.0), (0.3, 1.0, 1.0), (7.5, 0.01, 42.0)] {
            let ensemble = binary_system(sep, m1, m2).unwrap();
            assert!(ensemble.total_momentum().length() < 1e-12 * (m1 + m2));
            let barycenter: f64 = ensemble.iter().map(|p| p.m * p.x).sum();
            assert!(barycenter.abs() < 1e-12 * (m1 + m2) * sep);
            let gap = ensemble.particles()[1].x - ensemble.particles()[0].x;
            assert_relative_eq!(gap, sep, max_relative = 1e-12);
        }
    }

    #[test]
    fn binary_rejects_non_positive_inputs() {
        assert!(binary_system(0.0, 1.0, 1.0).is_err());
        assert!(binary_system(1.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn figure_eight_is_fixed() {
        let a = three_body_figure_eight(1.0).unwrap();
        let b = three_body_figure_eight(1.0).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a, b);
        assert!(a.total_momentum().length() < 1e-8);
    }

    #[test]
    fn cross_is_fixed_and_balanced() {
        let a = four_body_cross(2.0).unwrap();
        assert_eq!(a.len(), 4);
        assert_eq!(a, four_body_cross(2.0).unwrap());
        assert!(a.total_momentum().length() < 1e-12);
        assert_relative_eq!(a.total_mass(), 8.0);
        for p in &a {
            assert_relative_eq!(p.velocity().length(), CROSS_SPEED * 2.0_f64.sqrt(), max_relative = 1e-12);
        }
    }

    #[test]
    fn cross_speed_matches_closed_form() {
        assert_relative_eq!(CROSS_SPEED, (0.25 + 1.0 / 2.0_f64.sqrt()).sqrt(), max_relative = 1e-15);
    }
}
