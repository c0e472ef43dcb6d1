use approx::assert_relative_eq;
use icbuilder::scenario::generate;
use icbuilder::{
    binary_system, composite_galaxy, load, random_solar_system_seeded, save, save_as, two_galaxies,
    DiskComponent, Ensemble, MergerGalaxy, OutputFormat, Species, SphereComponent, Vec3,
};
use icbuilder_common::{ModelConfig, ScenarioConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn binary_system_end_to_end() {
    let ensemble = binary_system(1.0, 10.0, 1.0).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.txt");
    save(&path, &ensemble).unwrap();

    let loaded = load(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    let [first, second] = [loaded.particles()[0], loaded.particles()[1]];

    assert_relative_eq!(first.x, -1.0 / 11.0, epsilon = 1e-15);
    assert_relative_eq!(second.x, 10.0 / 11.0, epsilon = 1e-15);
    assert_eq!((first.m, second.m), (10.0, 1.0));

    let relative = second.velocity() - first.velocity();
    assert_relative_eq!(relative.length(), 11.0_f64.sqrt(), max_relative = 1e-12);
    assert!(first.vy > 0.0 && second.vy < 0.0);
    assert!(loaded.total_momentum().length() < 1e-12);
}

#[test]
fn scenario_file_to_particles_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("halo.txt");
    let toml = format!(
        r#"
        [output]
        path = "{}"

        [random]
        seed = 2024

        [model]
        kind = "cold_plummer"
        n = 200
        scale = 1.0
        mass = 1.0
        dark_matter = {{ fraction = 0.8, n = 100 }}
        "#,
        output.display()
    );
    let config_path = dir.path().join("scenario.toml");
    std::fs::write(&config_path, toml).unwrap();

    let config = ScenarioConfig::load(&config_path).unwrap();
    let ensemble = generate(&config).unwrap();
    save_as(&config.output.path, &ensemble, config.output.format).unwrap();

    let loaded = load(&output).unwrap();
    assert_eq!(loaded, ensemble);
    assert_eq!(loaded.count_species(Species::Baryonic), 200);
    assert_eq!(loaded.count_species(Species::DarkMatter), 100);
    assert_relative_eq!(loaded.total_mass(), 1.0, max_relative = 1e-9);
    assert_relative_eq!(loaded.species_mass(Species::DarkMatter), 0.8, max_relative = 1e-9);
    assert!(loaded.iter().all(|p| p.velocity() == Vec3::zero()));
}

#[test]
fn galaxy_components_concatenate_in_order() {
    let mut rng = StdRng::seed_from_u64(5);
    let bulge = SphereComponent { n: 30, scale: 0.2, mass: 0.2 };
    let disk = DiskComponent { n: 50, scale: 1.0, mass: 0.3, thickness: 0.05 };
    let halo = SphereComponent { n: 20, scale: 5.0, mass: 2.0 };
    let galaxy = composite_galaxy(&mut rng, &bulge, &disk, &halo).unwrap();

    assert_eq!(galaxy.len(), 100);
    assert_relative_eq!(galaxy.total_mass(), 2.5, max_relative = 1e-9);
    let disk_part = &galaxy.particles()[30..80];
    assert!(disk_part.iter().all(|p| p.vx != 0.0 || p.vy != 0.0));
    assert!(galaxy.particles()[..30].iter().all(|p| p.velocity() == Vec3::zero()));
    assert!(galaxy.particles()[80..].iter().all(|p| p.velocity() == Vec3::zero()));
}

#[test]
fn merger_written_as_msgpack() {
    let mut rng = StdRng::seed_from_u64(9);
    let galaxy1 = MergerGalaxy { n: 40, offset: 10.0, mass: 1.0, scale: 1.0 };
    let galaxy2 = MergerGalaxy { n: 25, offset: 8.0, mass: 0.5, scale: 0.7 };
    let merger = two_galaxies(&mut rng, &galaxy1, &galaxy2, 30.0, 0.4).unwrap();
    assert_eq!(merger.len(), 65);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merger.msgpack");
    save_as(&path, &merger, OutputFormat::MessagePack).unwrap();
    let decoded: Ensemble = rmp_serde::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(decoded, merger);

    assert!(decoded.particles()[..40].iter().all(|p| p.vy == 0.2));
    assert!(decoded.particles()[40..].iter().all(|p| p.vy == -0.2));
}

#[test]
fn demo_scenarios_parse() {
    let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let mut count = 0;
    for entry in std::fs::read_dir(&demos).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            let config = ScenarioConfig::load(&path).unwrap();
            assert!(!config.output.path.is_empty(), "{}", path.display());
            count += 1;
        }
    }
    assert!(count >= 7);
}

#[test]
fn demo_two_body_is_written_verbatim() {
    let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let config = ScenarioConfig::load(demos.join("two_body.toml")).unwrap();
    let ensemble = generate(&config).unwrap();
    assert_eq!(ensemble.len(), 2);
    assert_eq!(ensemble.particles()[0].m, 10.0);
    assert_eq!(ensemble.particles()[1].position(), Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(ensemble.particles()[1].vy, 1.0);
}

#[test]
fn demo_galaxy_is_a_plain_disk() {
    let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let mut config = ScenarioConfig::load(demos.join("galaxy.toml")).unwrap();
    config.override_seed(3);
    let ensemble = generate(&config).unwrap();
    assert_eq!(ensemble.len(), 20000);
    assert!(!ensemble.is_tagged());
    assert_relative_eq!(ensemble.total_mass(), 1.0, max_relative = 1e-9);
}

#[test]
fn command_line_seed_wins_over_model_seed() {
    let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let mut config = ScenarioConfig::load(demos.join("solar_system.toml")).unwrap();
    let from_file = generate(&config).unwrap();

    config.override_seed(5);
    let overridden = generate(&config).unwrap();
    let planets = match &config.model {
        ModelConfig::RandomSolarSystem { planets, .. } => planets.clone(),
        other => panic!("unexpected model {:?}", other),
    };
    assert_eq!(overridden, random_solar_system_seeded(5, &planets).unwrap());
    assert_eq!(generate(&config).unwrap(), overridden);
    assert_eq!(from_file, random_solar_system_seeded(123, &planets).unwrap());
}
