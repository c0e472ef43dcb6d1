//! Runs the builder selected by a scenario configuration.

use crate::choreography::{binary_system, four_body_cross, three_body_figure_eight};
use crate::composite::{composite_galaxy, two_galaxies};
use crate::cosmology::big_bang_ic;
use crate::error::{invalid, Result};
use crate::planetary::random_solar_system;
use crate::profiles::{cold_plummer, disk, hernquist, uniform_sphere};
use crate::sampling::{require_positive, rng_from_seed};
use icbuilder_common::{Ensemble, ModelConfig, Particle, ScenarioConfig};
use log::info;
use rand::Rng;

/// Builds the scenario's ensemble with a generator seeded from its config.
pub fn generate(config: &ScenarioConfig) -> Result<Ensemble> {
    let seed = config.effective_seed();
    match seed {
        Some(seed) => info!("Building '{}' model with seed {}", config.model.kind(), seed),
        None => info!("Building '{}' model with an OS-seeded generator", config.model.kind()),
    }
    let mut rng = rng_from_seed(seed);
    build_model(&config.model, &mut rng)
}

/// Dispatches one model description to its builder.
pub fn build_model<R: Rng>(model: &ModelConfig, rng: &mut R) -> Result<Ensemble> {
    let ensemble = match model {
        ModelConfig::UniformSphere { n, radius, mass } => uniform_sphere(rng, *n, *radius, *mass)?,
        ModelConfig::ColdPlummer { n, scale, mass, dark_matter } => {
            cold_plummer(rng, *n, *scale, *mass, *dark_matter)?
        }
        ModelConfig::Hernquist { n, scale, mass, dark_matter } => {
            hernquist(rng, *n, *scale, *mass, *dark_matter)?
        }
        ModelConfig::Disk { n, radius, mass, thickness, dark_matter } => {
            disk(rng, *n, *radius, *mass, *thickness, *dark_matter)?
        }
        ModelConfig::CompositeGalaxy { bulge, disk: disk_params, halo } => {
            composite_galaxy(rng, bulge, disk_params, halo)?
        }
        ModelConfig::TwoGalaxies { galaxy1, galaxy2, angle_deg, v_rel } => {
            two_galaxies(rng, galaxy1, galaxy2, *angle_deg, *v_rel)?
        }
        ModelConfig::BinarySystem { separation, mass1, mass2 } => {
            binary_system(*separation, *mass1, *mass2)?
        }
        ModelConfig::ThreeBodyFigureEight { mass } => three_body_figure_eight(*mass)?,
        ModelConfig::FourBodyCross { mass } => four_body_cross(*mass)?,
        ModelConfig::RandomSolarSystem { planets, .. } => random_solar_system(rng, planets)?,
        ModelConfig::BigBang(params) => big_bang_ic(rng, params)?,
        ModelConfig::Manual { particles } => manual_ensemble(particles)?,
    };

    info!(
        "Built {} particles (total mass {:.6}) for '{}'",
        ensemble.len(),
        ensemble.total_mass(),
        model.kind()
    );
    Ok(ensemble)
}

/// Converts literal rows into an ensemble, checking shape and mass.
pub fn manual_ensemble(rows: &[Vec<f64>]) -> Result<Ensemble> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let particle = Particle::from_row(row)
                .map_err(|e| invalid(format!("manual particle {}: {}", index, e)))?;
            require_positive(&format!("manual particle {} mass", index), particle.m)?;
            Ok(particle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use icbuilder_common::{DarkMatter, Species};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn dispatches_each_kind() {
        let mut rng = StdRng::seed_from_u64(1);
        let cases = vec![
            (ModelConfig::UniformSphere { n: 10, radius: 1.0, mass: 1.0 }, 10),
            (
                ModelConfig::ColdPlummer { n: 10, scale: 1.0, mass: 1.0, dark_matter: Some(DarkMatter::matching(0.5)) },
                20,
            ),
            (ModelConfig::Hernquist { n: 12, scale: 1.0, mass: 1.0, dark_matter: None }, 12),
            (ModelConfig::Disk { n: 8, radius: 1.0, mass: 1.0, thickness: 0.1, dark_matter: None }, 8),
            (ModelConfig::BinarySystem { separation: 1.0, mass1: 10.0, mass2: 1.0 }, 2),
            (ModelConfig::ThreeBodyFigureEight { mass: 1.0 }, 3),
            (ModelConfig::FourBodyCross { mass: 1.0 }, 4),
        ];
        for (model, expected) in cases {
            let ensemble = build_model(&model, &mut rng).unwrap();
            assert_eq!(ensemble.len(), expected, "kind {}", model.kind());
        }
    }

    #[test]
    fn manual_rows_become_particles() {
        let rows = vec![
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0],
            vec![5.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0],
        ];
        let ensemble = manual_ensemble(&rows).unwrap();
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.particles()[0].species, None);
        assert_eq!(ensemble.particles()[1].species, Some(Species::DarkMatter));
    }

    #[test]
    fn manual_rows_are_validated() {
        assert!(manual_ensemble(&[vec![0.0; 6]]).is_err());
        assert!(manual_ensemble(&[vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0]]).is_err());
    }

    #[test]
    fn seeded_scenarios_repeat() {
        let config = ScenarioConfig::from_toml(
            r#"
            [output]
            path = "out.txt"
            [random]
            seed = 17
            [model]
            kind = "hernquist"
            n = 64
            scale = 1.0
            mass = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(generate(&config).unwrap(), generate(&config).unwrap());
    }
}
