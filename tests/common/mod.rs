//! Common test infrastructure
//!
//! Integration tests build a small LastFM-shaped dataset on disk and load it
//! through the same path the binaries use. Tests should only import from this
//! module.

mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{
    build_recommender, create_test_captions, create_test_dataset, ARTIST_NAMES, LATIN1_ARTIST,
};
