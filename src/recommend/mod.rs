//! Query routing and ranking over the built catalog.

mod recommender;

pub use recommender::{Recommender, RecommenderSettings};

use crate::mood::Mood;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_MOOD_JITTER: f64 = 0.2;

/// Query-level failures. None of them is fatal, the router turns them into
/// an empty [`RecommendationOutcome`] with a notice.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecommendError {
    #[error("Unknown mood \"{0}\". Available moods: {moods}", moods = Mood::names().join(", "))]
    UnknownMood(String),

    #[error("No songs found for {kind}: {value}")]
    NoMatch { kind: QueryKind, value: String },

    #[error("Unknown query type: {0}. Valid types are: mood, artist, tag")]
    UnknownQueryType(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Mood,
    Artist,
    Tag,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryKind::Mood => "mood",
            QueryKind::Artist => "artist",
            QueryKind::Tag => "tag",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Mood(String),
    Artist(String),
    Tag(String),
}

impl Query {
    pub fn parse(kind: &str, value: &str) -> Result<Query, RecommendError> {
        let value = value.to_string();
        match kind.trim().to_lowercase().as_str() {
            "mood" => Ok(Query::Mood(value)),
            "artist" => Ok(Query::Artist(value)),
            "tag" => Ok(Query::Tag(value)),
            _ => Err(RecommendError::UnknownQueryType(kind.to_string())),
        }
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            Query::Mood(_) => QueryKind::Mood,
            Query::Artist(_) => QueryKind::Artist,
            Query::Tag(_) => QueryKind::Tag,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Query::Mood(v) | Query::Artist(v) | Query::Tag(v) => v,
        }
    }
}

/// The score a row was ranked by, as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RecommendationScore {
    /// Cached mood score, without the per-query jitter.
    Mood(f64),
    /// Cosine similarity to the anchor song.
    Similarity(f64),
    /// Random sample, no meaningful score.
    Unranked,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub song_index: usize,
    pub song_name: String,
    pub artist_name: String,
    pub url: String,
    pub search_link: String,
    pub score: RecommendationScore,
}

/// Result of a query that never fails: errors become an empty row set plus a
/// human-readable notice.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOutcome {
    pub rows: Vec<Recommendation>,
    pub notice: Option<RecommendError>,
}

impl RecommendationOutcome {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
