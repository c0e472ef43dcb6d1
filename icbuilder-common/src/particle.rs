use crate::vecmath::Vec3;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Matter species carried by the optional eighth field of a particle record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Species {
    Baryonic,
    DarkMatter,
}

impl Species {
    /// Integer tag written to disk: 0 for baryons, 1 for dark matter.
    pub fn tag(self) -> u8 {
        match self {
            Species::Baryonic => 0,
            Species::DarkMatter => 1,
        }
    }
}

impl From<Species> for u8 {
    fn from(species: Species) -> u8 {
        species.tag()
    }
}

impl TryFrom<u8> for Species {
    type Error = String;

    fn try_from(tag: u8) -> std::result::Result<Self, Self::Error> {
        match tag {
            0 => Ok(Species::Baryonic),
            1 => Ok(Species::DarkMatter),
            other => Err(format!("unknown species tag {}", other)),
        }
    }
}

/// One particle: position, velocity, mass and an optional species tag.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    /// Strictly positive mass.
    pub m: f64,
    /// `None` for builders that do not distinguish matter species.
    #[serde(default)]
    pub species: Option<Species>,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3, m: f64) -> Self {
        Particle {
            x: position.x,
            y: position.y,
            z: position.z,
            vx: velocity.x,
            vy: velocity.y,
            vz: velocity.z,
            m,
            species: None,
        }
    }

    /// Tags the particle with a species, producing an 8-field record.
    pub fn with_species(mut self, species: Species) -> Self {
        self.species = Some(species);
        self
    }

    /// A particle at `position` with zero velocity.
    pub fn at_rest(position: Vec3, m: f64) -> Self {
        Particle::new(position, Vec3::zero(), m)
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn velocity(&self) -> Vec3 {
        Vec3::new(self.vx, self.vy, self.vz)
    }

    pub fn set_position(&mut self, p: Vec3) {
        self.x = p.x;
        self.y = p.y;
        self.z = p.z;
    }

    pub fn set_velocity(&mut self, v: Vec3) {
        self.vx = v.x;
        self.vy = v.y;
        self.vz = v.z;
    }

    /// Linear momentum `m * v`.
    pub fn momentum(&self) -> Vec3 {
        self.velocity().scale(self.m)
    }

    /// Number of fields in the text encoding (7 untagged, 8 tagged).
    pub fn field_count(&self) -> usize {
        if self.species.is_some() { 8 } else { 7 }
    }

    /// Builds a particle from a 7-field (untagged) or 8-field (tagged) row.
    pub fn from_row(row: &[f64]) -> Result<Self> {
        if row.len() != 7 && row.len() != 8 {
            anyhow::bail!("expected 7 or 8 fields, found {}", row.len());
        }
        let species = match row.get(7) {
            None => None,
            Some(&tag) if tag == 0.0 => Some(Species::Baryonic),
            Some(&tag) if tag == 1.0 => Some(Species::DarkMatter),
            Some(&tag) => anyhow::bail!("species tag must be 0 or 1, found {}", tag),
        };
        Ok(Particle {
            x: row[0],
            y: row[1],
            z: row[2],
            vx: row[3],
            vy: row[4],
            vz: row[5],
            m: row[6],
            species,
        })
    }
}

/// An ordered sequence of particles produced by one builder call.
/// Order is insertion order and is preserved by every consumer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ensemble {
    particles: Vec<Particle>,
}

impl Ensemble {
    pub fn new() -> Self {
        Ensemble { particles: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Ensemble { particles: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Appends every particle of `other`, keeping its internal order.
    pub fn append(&mut self, other: Ensemble) {
        self.particles.extend(other.particles);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn into_particles(self) -> Vec<Particle> {
        self.particles
    }

    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.m).sum()
    }

    /// Total momentum of the ensemble.
    pub fn total_momentum(&self) -> Vec3 {
        self.particles
            .iter()
            .fold(Vec3::zero(), |acc, p| acc + p.momentum())
    }

    /// Number of particles explicitly tagged with `species`.
    pub fn count_species(&self, species: Species) -> usize {
        self.particles
            .iter()
            .filter(|p| p.species == Some(species))
            .count()
    }

    /// Mass of the particles explicitly tagged with `species`.
    pub fn species_mass(&self, species: Species) -> f64 {
        self.particles
            .iter()
            .filter(|p| p.species == Some(species))
            .map(|p| p.m)
            .sum()
    }

    /// True if any particle carries a species tag.
    pub fn is_tagged(&self) -> bool {
        self.particles.iter().any(|p| p.species.is_some())
    }
}

impl From<Vec<Particle>> for Ensemble {
    fn from(particles: Vec<Particle>) -> Self {
        Ensemble { particles }
    }
}

impl FromIterator<Particle> for Ensemble {
    fn from_iter<I: IntoIterator<Item = Particle>>(iter: I) -> Self {
        Ensemble { particles: iter.into_iter().collect() }
    }
}

impl IntoIterator for Ensemble {
    type Item = Particle;
    type IntoIter = std::vec::IntoIter<Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ensemble {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
