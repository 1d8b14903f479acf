use super::Mood;
use crate::features::{AudioFeatures, MAX_TEMPO_BPM};
use serde::Serialize;

const FEATURE_WEIGHT: f64 = 0.7;
const TAG_WEIGHT: f64 = 0.3;

/// Cached blended score of one song for every mood, indexed by [`Mood`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodScores([f64; 6]);

impl MoodScores {
    pub fn compute(features: &AudioFeatures, tags: &[String]) -> MoodScores {
        let mut values = [0.0; 6];
        for mood in Mood::ALL {
            values[mood.index()] = score_song(features, tags, mood);
        }
        MoodScores(values)
    }

    pub fn get(&self, mood: Mood) -> f64 {
        self.0[mood.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mood, f64)> + '_ {
        Mood::ALL.iter().map(|m| (*m, self.get(*m)))
    }
}

/// Mood affinity derived only from the audio features.
pub fn feature_score(features: &AudioFeatures, mood: Mood) -> f64 {
    let energy = features.energy();
    let valence = features.valence();
    let danceability = features.danceability();
    match mood {
        Mood::Sad => (1.0 - valence) * 0.5 + (1.0 - energy) * 0.3 + (1.0 - danceability) * 0.2,
        Mood::Relaxing => {
            (1.0 - energy) * 0.4 + valence * 0.3 + (1.0 - features.tempo() / MAX_TEMPO_BPM) * 0.3
        }
        Mood::Happy | Mood::Energetic | Mood::Romantic | Mood::Angry => {
            energy * 0.3 + valence * 0.4 + danceability * 0.3
        }
    }
}

/// Fraction of tags containing at least one of the mood keywords.
pub fn tag_overlap_score(tags: &[String], mood: Mood) -> f64 {
    let keywords = mood.keywords();
    let matching = tags
        .iter()
        .filter(|tag| {
            let tag = tag.to_lowercase();
            keywords.iter().any(|k| tag.contains(k))
        })
        .count();
    matching as f64 / tags.len().max(1) as f64
}

pub fn score_song(features: &AudioFeatures, tags: &[String], mood: Mood) -> f64 {
    let base = feature_score(features, mood);
    if tags.is_empty() {
        return base;
    }
    FEATURE_WEIGHT * base + TAG_WEIGHT * tag_overlap_score(tags, mood)
}
