//! Moodtrack Library
//!
//! Mood based music recommendations over the LastFM hetrec2011 dataset. This
//! library exposes the modules used by the `moodtrack` REPL and the
//! `video-recommend` tool, and by the integration tests.

pub mod app;
pub mod captions;
pub mod catalog;
pub mod classifier;
pub mod cli_style;
pub mod config;
pub mod dataset;
pub mod features;
pub mod mood;
pub mod recommend;
pub mod text_index;
pub mod video;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, Catalog, Song};
pub use config::{AppConfig, CliConfig, FileConfig};
pub use mood::Mood;
pub use recommend::{
    Query, RecommendError, Recommendation, RecommendationOutcome, Recommender,
    RecommenderSettings,
};
