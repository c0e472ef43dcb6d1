use serde::{Deserialize, Serialize};

/// Dark-matter split requested on top of a baryonic population.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct DarkMatter {
    /// Fraction of the component mass carried by dark matter, in (0, 1).
    pub fraction: f64,
    /// Dark-matter particle count. Defaults to the baryonic count.
    #[serde(default)]
    pub n: Option<usize>,
}

impl DarkMatter {
    /// Split with as many dark-matter particles as baryons.
    pub fn matching(fraction: f64) -> Self {
        DarkMatter { fraction, n: None }
    }

    pub fn with_count(fraction: f64, n: usize) -> Self {
        DarkMatter { fraction, n: Some(n) }
    }

    /// Dark-matter particle count given the baryonic count.
    pub fn count(&self, baryonic_n: usize) -> usize {
        self.n.unwrap_or(baryonic_n)
    }
}

/// A spherical component (bulge or halo) of a composite galaxy.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SphereComponent {
    pub n: usize,
    pub scale: f64,
    pub mass: f64,
}

/// The disk component of a composite galaxy.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct DiskComponent {
    pub n: usize,
    pub scale: f64,
    pub mass: f64,
    pub thickness: f64,
}

/// One side of a two-galaxy merger.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct MergerGalaxy {
    pub n: usize,
    /// Distance of the galaxy center from the origin along x.
    pub offset: f64,
    pub mass: f64,
    pub scale: f64,
}

/// Inclusive `[min, max]` interval for a randomly drawn quantity.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ParamRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> ParamRange<T> {
    pub fn new(min: T, max: T) -> Self {
        ParamRange { min, max }
    }

    /// A degenerate range that always yields `value`.
    pub fn fixed(value: T) -> Self {
        ParamRange { min: value, max: value }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// Ranges and probabilities for a randomly generated planetary system.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SolarSystemParams {
    pub star_mass: ParamRange<f64>,
    pub planet_count: ParamRange<usize>,
    pub planet_mass: ParamRange<f64>,
    pub semi_major_axis: ParamRange<f64>,
    pub eccentricity: ParamRange<f64>,
    /// Orbital inclination in degrees.
    pub inclination_deg: ParamRange<f64>,
    /// Probability that a planet hosts moons.
    pub moon_chance: f64,
    pub max_moons: usize,
}

impl Default for SolarSystemParams {
    fn default() -> Self {
        SolarSystemParams {
            star_mass: ParamRange::new(0.8, 1.2),
            planet_count: ParamRange::new(1, 8),
            planet_mass: ParamRange::new(1e-6, 1e-3),
            semi_major_axis: ParamRange::new(0.3, 30.0),
            eccentricity: ParamRange::new(0.0, 0.2),
            inclination_deg: ParamRange::new(0.0, 5.0),
            moon_chance: 0.3,
            max_moons: 3,
        }
    }
}

/// Parameters of the Hubble-flow ("big bang") cloud.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BigBangParams {
    pub n: usize,
    pub radius: f64,
    pub mass: f64,
    /// Hubble constant: radial velocity per unit distance.
    pub hubble_k: f64,
    /// Values above 1 concentrate particles toward the center.
    #[serde(default = "default_center_bias")]
    pub center_bias: f64,
    /// Baryonic positional perturbation, in units of `radius`.
    #[serde(default)]
    pub perturb_amp: f64,
    /// Baryonic velocity jitter, in units of the local Hubble speed.
    #[serde(default)]
    pub vel_jitter: f64,
    #[serde(default)]
    pub dark_matter: Option<DarkMatter>,
}

fn default_center_bias() -> f64 {
    1.0 // Uniform density
}
