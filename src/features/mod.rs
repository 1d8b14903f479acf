//! Per-song audio attributes.
//!
//! Scoring and indexing only need four numbers per song, so the source of
//! those numbers is a [`FeatureProvider`]. The default provider draws
//! independent uniform values: it is a placeholder for real audio analysis,
//! not an estimate of anything.

mod random;

pub use random::RandomFeatureProvider;

use crate::catalog::{Artist, SongTemplate};
use serde::Serialize;
use thiserror::Error;

pub const MIN_TEMPO_BPM: f64 = 60.0;
pub const MAX_TEMPO_BPM: f64 = 180.0;

#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("{name} value {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioFeatures {
    tempo: f64,
    energy: f64,
    danceability: f64,
    valence: f64,
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<f64, FeatureError> {
    // NaN fails both comparisons and is rejected here too
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(FeatureError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

impl AudioFeatures {
    pub fn new(
        tempo: f64,
        energy: f64,
        danceability: f64,
        valence: f64,
    ) -> Result<AudioFeatures, FeatureError> {
        Ok(AudioFeatures {
            tempo: check_range("tempo", tempo, MIN_TEMPO_BPM, MAX_TEMPO_BPM)?,
            energy: check_range("energy", energy, 0.0, 1.0)?,
            danceability: check_range("danceability", danceability, 0.0, 1.0)?,
            valence: check_range("valence", valence, 0.0, 1.0)?,
        })
    }

    /// Beats per minute.
    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn danceability(&self) -> f64 {
        self.danceability
    }

    /// Musical positiveness.
    pub fn valence(&self) -> f64 {
        self.valence
    }
}

/// Source of audio attributes for synthesized songs.
///
/// A real feature-extraction backend can replace [`RandomFeatureProvider`]
/// without any change to scoring or indexing.
pub trait FeatureProvider {
    fn features_for(
        &mut self,
        artist: &Artist,
        template: SongTemplate,
    ) -> anyhow::Result<AudioFeatures>;
}

impl<T: FeatureProvider + ?Sized> FeatureProvider for Box<T> {
    fn features_for(
        &mut self,
        artist: &Artist,
        template: SongTemplate,
    ) -> anyhow::Result<AudioFeatures> {
        (**self).features_for(artist, template)
    }
}
