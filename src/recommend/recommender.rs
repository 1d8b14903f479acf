use super::{
    Query, QueryKind, RecommendError, Recommendation, RecommendationOutcome, RecommendationScore,
    DEFAULT_MAX_RESULTS, DEFAULT_MOOD_JITTER,
};
use crate::catalog::{Catalog, Song};
use crate::mood::Mood;
use crate::text_index::{TextIndex, DEFAULT_MAX_FEATURES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderSettings {
    /// Upper bound on the rows returned by any query.
    pub max_results: usize,
    /// Width of the uniform random boost added to mood scores per query.
    pub mood_jitter: f64,
    /// Vocabulary cap of the tag text index.
    pub max_features: usize,
    /// Fixes the query randomness, `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            mood_jitter: DEFAULT_MOOD_JITTER,
            max_features: DEFAULT_MAX_FEATURES,
            seed: None,
        }
    }
}

/// Answers mood, artist and tag queries over an immutable catalog.
///
/// Only the random number generator is behind a lock, catalog and index are
/// read-only, so a `Recommender` can be shared across threads.
pub struct Recommender {
    catalog: Catalog,
    index: TextIndex,
    settings: RecommenderSettings,
    rng: Mutex<StdRng>,
}

/// Sorts by descending score and keeps the first `limit`. The sort is stable,
/// so equal scores keep catalog order.
fn rank_top(scored: &mut Vec<(usize, f64)>, limit: usize) {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
}

fn row(index: usize, song: &Song, score: RecommendationScore) -> Recommendation {
    Recommendation {
        song_index: index,
        song_name: song.name.clone(),
        artist_name: song.artist_name.clone(),
        url: song.url.clone(),
        search_link: song.search_link.clone(),
        score,
    }
}

impl Recommender {
    pub fn new(catalog: Catalog, settings: RecommenderSettings) -> Recommender {
        info!("Processing song features...");
        let index = TextIndex::build(
            catalog.songs().iter().map(|s| s.tag_text.as_str()),
            settings.max_features,
        );
        info!(
            "Tag index ready, {} songs over {} terms",
            index.len(),
            index.vocabulary().len()
        );
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Recommender {
            catalog,
            index,
            settings,
            rng: Mutex::new(rng),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &TextIndex {
        &self.index
    }

    pub fn settings(&self) -> &RecommenderSettings {
        &self.settings
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // The generator holds no invariant a panicking holder could break.
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Parses `(kind, value)` and runs the query. Never fails: errors are
    /// logged and reported in the outcome notice.
    pub fn recommend_songs(&self, kind: &str, value: &str) -> RecommendationOutcome {
        let result = Query::parse(kind, value).and_then(|query| self.recommend(&query));
        match result {
            Ok(rows) => RecommendationOutcome { rows, notice: None },
            Err(err) => {
                warn!("{}", err);
                RecommendationOutcome {
                    rows: Vec::new(),
                    notice: Some(err),
                }
            }
        }
    }

    pub fn recommend(&self, query: &Query) -> Result<Vec<Recommendation>, RecommendError> {
        debug!("Running {} query \"{}\"", query.kind(), query.value());
        match query {
            Query::Mood(value) => self.recommend_by_mood(value),
            Query::Artist(value) => self.recommend_similar_songs(value),
            Query::Tag(value) => self.recommend_by_tag(value),
        }
    }

    /// Songs with the highest mood score after a random boost in
    /// `[0, mood_jitter)`, so repeated calls vary.
    pub fn recommend_by_mood(&self, mood: &str) -> Result<Vec<Recommendation>, RecommendError> {
        let mood: Mood = mood
            .parse()
            .map_err(|_| RecommendError::UnknownMood(mood.to_string()))?;
        let songs = self.catalog.songs();
        let jitter = self.settings.mood_jitter;

        let mut scored: Vec<(usize, f64)> = {
            let mut rng = self.rng();
            songs
                .iter()
                .enumerate()
                .map(|(i, song)| {
                    let boost = if jitter > 0.0 {
                        rng.random_range(0.0..jitter)
                    } else {
                        0.0
                    };
                    (i, song.mood_score(mood) + boost)
                })
                .collect()
        };
        rank_top(&mut scored, self.settings.max_results);

        Ok(scored
            .into_iter()
            .map(|(i, _)| {
                let song = &songs[i];
                row(i, song, RecommendationScore::Mood(song.mood_score(mood)))
            })
            .collect())
    }

    /// Songs whose tag text is closest to a random song of the matching
    /// artist, excluding the artist named exactly by the query.
    pub fn recommend_similar_songs(
        &self,
        artist_name: &str,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let needle = artist_name.to_lowercase();
        let songs = self.catalog.songs();
        let matching: Vec<usize> = songs
            .iter()
            .enumerate()
            .filter(|(_, s)| s.artist_name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        if matching.is_empty() {
            return Err(RecommendError::NoMatch {
                kind: QueryKind::Artist,
                value: artist_name.to_string(),
            });
        }

        let anchor = matching[self.rng().random_range(0..matching.len())];
        debug!("Using \"{}\" as similarity anchor", songs[anchor].name);
        let similarities = self
            .index
            .similarities_to(anchor)
            .unwrap_or_else(|| vec![0.0; songs.len()]);

        let mut scored: Vec<(usize, f64)> = songs
            .iter()
            .enumerate()
            .filter(|(_, s)| s.artist_name.to_lowercase() != needle)
            .map(|(i, _)| (i, similarities[i]))
            .collect();
        rank_top(&mut scored, self.settings.max_results);

        Ok(scored
            .into_iter()
            .map(|(i, similarity)| row(i, &songs[i], RecommendationScore::Similarity(similarity)))
            .collect())
    }

    /// A random sample of the songs whose tag text contains the query.
    pub fn recommend_by_tag(&self, tag: &str) -> Result<Vec<Recommendation>, RecommendError> {
        let needle = tag.to_lowercase();
        let songs = self.catalog.songs();
        let mut scored: Vec<(usize, f64)> = {
            let mut rng = self.rng();
            songs
                .iter()
                .enumerate()
                .filter(|(_, s)| s.tag_text.to_lowercase().contains(&needle))
                .map(|(i, _)| (i, rng.random::<f64>()))
                .collect()
        };
        if scored.is_empty() {
            return Err(RecommendError::NoMatch {
                kind: QueryKind::Tag,
                value: tag.to_string(),
            });
        }
        rank_top(&mut scored, self.settings.max_results);

        Ok(scored
            .into_iter()
            .map(|(i, _)| row(i, &songs[i], RecommendationScore::Unranked))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_top_is_stable_and_bounded() {
        let mut scored = vec![(0, 0.5), (1, 0.9), (2, 0.5), (3, 0.1), (4, 0.9)];
        rank_top(&mut scored, 3);
        assert_eq!(scored, vec![(1, 0.9), (4, 0.9), (0, 0.5)]);
    }

    #[test]
    fn default_settings() {
        let settings = RecommenderSettings::default();
        assert_eq!(settings.max_results, 5);
        assert_eq!(settings.mood_jitter, 0.2);
        assert_eq!(settings.max_features, 1000);
        assert!(settings.seed.is_none());
    }
}
