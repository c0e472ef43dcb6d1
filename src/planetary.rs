//! Randomly generated planetary systems on Keplerian orbits.
//!
//! The star sits at the origin at rest. Planets are drawn independently and
//! placed at a random true anomaly on their (possibly eccentric, inclined)
//! orbit. Moons sit inside the planet's Hill sphere on circular orbits around
//! it and inherit its velocity.

use crate::error::{invalid, Result};
use crate::sampling::{require_positive, require_range, sample_count, sample_range};
use icbuilder_common::{Ensemble, ParamRange, Particle, SolarSystemParams, Vec3};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Moon separation from its planet, as a fraction of the Hill radius.
/// The upper bound keeps moons in the long-term stable zone.
const MOON_SEPARATION_HILL: ParamRange<f64> = ParamRange { min: 0.05, max: 0.30 };

/// Moon mass as a fraction of its planet's mass.
const MOON_MASS_FRACTION: ParamRange<f64> = ParamRange { min: 1e-4, max: 1e-2 };

/// Elements of a bound Keplerian orbit around a central mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    /// Rotation of the orbital plane about the x-axis, radians.
    pub inclination: f64,
    /// Angle from periapsis, radians.
    pub true_anomaly: f64,
}

impl OrbitalElements {
    /// Position and velocity relative to a central body of `central_mass`.
    ///
    /// The speed follows vis-viva, `v^2 = M (2/r - 1/a)`; the direction is the
    /// orbit's tangent at the true anomaly.
    pub fn state_vectors(&self, central_mass: f64) -> (Vec3, Vec3) {
        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let (sin_nu, cos_nu) = self.true_anomaly.sin_cos();

        let semi_latus = a * (1.0 - e * e);
        let r = semi_latus / (1.0 + e * cos_nu);
        let speed = (central_mass * (2.0 / r - 1.0 / a)).max(0.0).sqrt();

        let position = Vec3::new(r * cos_nu, r * sin_nu, 0.0);
        let direction = Vec3::new(-sin_nu, e + cos_nu, 0.0).normalize_or_zero();

        (
            position.rotate_x(self.inclination),
            (direction * speed).rotate_x(self.inclination),
        )
    }
}

/// Hill radius of a planet of `planet_mass` orbiting `star_mass` at `a`.
pub fn hill_radius(semi_major_axis: f64, planet_mass: f64, star_mass: f64) -> f64 {
    semi_major_axis * (planet_mass / (3.0 * star_mass)).cbrt()
}

/// Builds a planetary system with a generator seeded from `seed`.
pub fn random_solar_system_seeded(seed: u64, params: &SolarSystemParams) -> Result<Ensemble> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_solar_system(&mut rng, params)
}

/// Builds a star, its planets and their moons.
///
/// Output order: the star, then each planet immediately followed by its moons.
pub fn random_solar_system<R: Rng>(rng: &mut R, params: &SolarSystemParams) -> Result<Ensemble> {
    validate(params)?;

    let star_mass = sample_range(rng, &params.star_mass);
    let planet_count = sample_count(rng, &params.planet_count);

    let mut ensemble = Ensemble::new();
    ensemble.push(Particle::at_rest(Vec3::zero(), star_mass));

    let mut moon_total = 0;
    for index in 0..planet_count {
        let planet_mass = sample_range(rng, &params.planet_mass);
        let elements = OrbitalElements {
            semi_major_axis: sample_range(rng, &params.semi_major_axis),
            eccentricity: sample_range(rng, &params.eccentricity),
            inclination: sample_range(rng, &params.inclination_deg).to_radians(),
            true_anomaly: TAU * rng.random::<f64>(),
        };
        let (position, velocity) = elements.state_vectors(star_mass);
        ensemble.push(Particle::new(position, velocity, planet_mass));
        trace!(
            "Planet {}: m={:.3e}, a={:.3}, e={:.3}, r={:.3}",
            index,
            planet_mass,
            elements.semi_major_axis,
            elements.eccentricity,
            position.length()
        );

        if params.moon_chance > 0.0 && rng.random_bool(params.moon_chance) {
            let moons = rng.random_range(1..=params.max_moons);
            let hill = hill_radius(elements.semi_major_axis, planet_mass, star_mass);
            for _ in 0..moons {
                ensemble.push(moon(rng, position, velocity, planet_mass, hill, elements.inclination));
            }
            moon_total += moons;
        }
    }

    debug!(
        "Built planetary system: star mass {:.3}, {} planets, {} moons",
        star_mass, planet_count, moon_total
    );
    Ok(ensemble)
}

/// One moon on a circular orbit around its planet, in the planet's orbital plane.
fn moon<R: Rng>(
    rng: &mut R,
    planet_position: Vec3,
    planet_velocity: Vec3,
    planet_mass: f64,
    hill: f64,
    inclination: f64,
) -> Particle {
    let separation = hill * sample_range(rng, &MOON_SEPARATION_HILL);
    let mass = planet_mass * sample_range(rng, &MOON_MASS_FRACTION);
    let (sin_phase, cos_phase) = (TAU * rng.random::<f64>()).sin_cos();

    let speed = (planet_mass / separation).sqrt();
    let offset = Vec3::new(separation * cos_phase, separation * sin_phase, 0.0).rotate_x(inclination);
    let orbit = Vec3::new(-speed * sin_phase, speed * cos_phase, 0.0).rotate_x(inclination);

    Particle::new(planet_position + offset, planet_velocity + orbit, mass)
}

fn validate(params: &SolarSystemParams) -> Result<()> {
    require_range("star_mass", &params.star_mass)?;
    require_positive("star_mass.min", params.star_mass.min)?;
    if params.planet_count.is_empty() {
        return Err(invalid(format!(
            "planet_count is empty: min {} > max {}",
            params.planet_count.min, params.planet_count.max
        )));
    }
    require_range("planet_mass", &params.planet_mass)?;
    require_positive("planet_mass.min", params.planet_mass.min)?;
    require_range("semi_major_axis", &params.semi_major_axis)?;
    require_positive("semi_major_axis.min", params.semi_major_axis.min)?;
    require_range("eccentricity", &params.eccentricity)?;
    if params.eccentricity.min < 0.0 {
        return Err(invalid(format!(
            "eccentricity must be non-negative, got {}",
            params.eccentricity.min
        )));
    }
    if params.eccentricity.max >= 1.0 {
        return Err(invalid(format!(
            "eccentricity must be below 1 for a bound orbit, got {}",
            params.eccentricity.max
        )));
    }
    require_range("inclination_deg", &params.inclination_deg)?;
    if !(0.0..=1.0).contains(&params.moon_chance) {
        return Err(invalid(format!(
            "moon_chance must lie in [0, 1], got {}",
            params.moon_chance
        )));
    }
    if params.moon_chance > 0.0 && params.max_moons == 0 {
        return Err(invalid("max_moons must be at least 1 when moon_chance > 0"));
    }
    Ok(())
}
