use crate::params::{
    BigBangParams, DarkMatter, DiskComponent, MergerGalaxy, SolarSystemParams, SphereComponent,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Encoding used when writing an ensemble to disk.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One space-separated line per particle.
    #[default]
    Text,
    Csv,
    Json,
    Bincode,
    #[serde(alias = "msgpack")]
    MessagePack,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "bincode" | "bin" => Ok(OutputFormat::Bincode),
            "messagepack" | "msgpack" => Ok(OutputFormat::MessagePack),
            other => anyhow::bail!("Unknown output format '{}'", other),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Bincode => "bincode",
            OutputFormat::MessagePack => "messagepack",
        };
        f.write_str(name)
    }
}

// Configuration for output settings
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default)]
    pub format: OutputFormat,
}

// Seed for the generator; absent means seeded from the OS.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RandomConfig {
    #[serde(default)]
    pub seed: Option<u64>,
}

/// The model to build, selected by `kind`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelConfig {
    UniformSphere {
        n: usize,
        radius: f64,
        mass: f64,
    },
    ColdPlummer {
        n: usize,
        scale: f64,
        mass: f64,
        #[serde(default)]
        dark_matter: Option<DarkMatter>,
    },
    Hernquist {
        n: usize,
        scale: f64,
        mass: f64,
        #[serde(default)]
        dark_matter: Option<DarkMatter>,
    },
    Disk {
        n: usize,
        radius: f64,
        mass: f64,
        #[serde(default)]
        thickness: f64,
        #[serde(default)]
        dark_matter: Option<DarkMatter>,
    },
    CompositeGalaxy {
        bulge: SphereComponent,
        disk: DiskComponent,
        halo: SphereComponent,
    },
    TwoGalaxies {
        galaxy1: MergerGalaxy,
        galaxy2: MergerGalaxy,
        #[serde(default)]
        angle_deg: f64,
        #[serde(default)]
        v_rel: f64,
    },
    BinarySystem {
        separation: f64,
        mass1: f64,
        mass2: f64,
    },
    ThreeBodyFigureEight {
        #[serde(default = "default_unit_mass")]
        mass: f64,
    },
    FourBodyCross {
        #[serde(default = "default_unit_mass")]
        mass: f64,
    },
    RandomSolarSystem {
        /// Overrides `[random].seed` for this model.
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        planets: SolarSystemParams,
    },
    BigBang(BigBangParams),
    /// Literal rows of 7 (untagged) or 8 (tagged) numbers.
    Manual {
        particles: Vec<Vec<f64>>,
    },
}

fn default_unit_mass() -> f64 {
    1.0
}

impl ModelConfig {
    /// Short name used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelConfig::UniformSphere { .. } => "uniform_sphere",
            ModelConfig::ColdPlummer { .. } => "cold_plummer",
            ModelConfig::Hernquist { .. } => "hernquist",
            ModelConfig::Disk { .. } => "disk",
            ModelConfig::CompositeGalaxy { .. } => "composite_galaxy",
            ModelConfig::TwoGalaxies { .. } => "two_galaxies",
            ModelConfig::BinarySystem { .. } => "binary_system",
            ModelConfig::ThreeBodyFigureEight { .. } => "three_body_figure_eight",
            ModelConfig::FourBodyCross { .. } => "four_body_cross",
            ModelConfig::RandomSolarSystem { .. } => "random_solar_system",
            ModelConfig::BigBang(_) => "big_bang",
            ModelConfig::Manual { .. } => "manual",
        }
    }
}

// Main scenario configuration structure, loaded from a TOML file.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub output: OutputConfig,
    #[serde(default)]
    pub random: RandomConfig,
    pub model: ModelConfig,
}

impl ScenarioConfig {
    /// Loads the scenario configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e))?;
        let config = Self::from_toml(&config_str)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path_ref.display(), e))?;

        Ok(config)
    }

    /// Parses and validates a scenario from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: ScenarioConfig = toml::from_str(text)?;

        // Physical parameters are validated by the builders themselves.
        if config.output.path.trim().is_empty() {
            anyhow::bail!("output.path must not be empty.");
        }
        if let ModelConfig::Manual { particles } = &config.model {
            if particles.is_empty() {
                anyhow::bail!("manual model must list at least one particle.");
            }
        }

        Ok(config)
    }

    /// Replaces every seed in the scenario, including a model-level one.
    pub fn override_seed(&mut self, seed: u64) {
        self.random.seed = Some(seed);
        if let ModelConfig::RandomSolarSystem { seed: model_seed, .. } = &mut self.model {
            *model_seed = Some(seed);
        }
    }

    /// Seed for the model's generator, honoring a per-model override.
    pub fn effective_seed(&self) -> Option<u64> {
        match &self.model {
            ModelConfig::RandomSolarSystem { seed: Some(seed), .. } => Some(*seed),
            _ => self.random.seed,
        }
    }
}
