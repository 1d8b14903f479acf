use super::{AudioFeatures, FeatureProvider, MAX_TEMPO_BPM, MIN_TEMPO_BPM};
use crate::catalog::{Artist, SongTemplate};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

/// Draws every attribute independently from a uniform distribution.
pub struct RandomFeatureProvider {
    rng: StdRng,
    tempo: Uniform<f64>,
    unit: Uniform<f64>,
}

impl RandomFeatureProvider {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible provider, two providers with the same seed yield the
    /// same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            tempo: Uniform::new(MIN_TEMPO_BPM, MAX_TEMPO_BPM)
                .expect("Invalid tempo range, this should be fixed at compile time."),
            unit: Uniform::new(0.0, 1.0)
                .expect("Invalid unit range, this should be fixed at compile time."),
        }
    }
}

impl Default for RandomFeatureProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureProvider for RandomFeatureProvider {
    fn features_for(&mut self, _artist: &Artist, _template: SongTemplate) -> Result<AudioFeatures> {
        let tempo = self.tempo.sample(&mut self.rng);
        let energy = self.unit.sample(&mut self.rng);
        let danceability = self.unit.sample(&mut self.rng);
        let valence = self.unit.sample(&mut self.rng);
        Ok(AudioFeatures::new(tempo, energy, danceability, valence)?)
    }
}
