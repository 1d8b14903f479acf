//! End-to-end tests for dataset loading and catalog synthesis

mod common;

use common::{create_test_dataset, ARTIST_NAMES, LATIN1_ARTIST};
use moodtrack::catalog::{load_catalog, SongTemplate};
use moodtrack::dataset::DatasetError;
use moodtrack::features::RandomFeatureProvider;
use moodtrack::mood::Mood;
use std::fs;
use tempfile::TempDir;

const NO_URL: &str = "http://unused.invalid/dataset.zip";

#[test]
fn test_every_artist_gets_one_song_per_template() {
    let dir = create_test_dataset().unwrap();
    let mut features = RandomFeatureProvider::seeded(1);
    let catalog = load_catalog(dir.path(), NO_URL, false, &mut features).unwrap();

    assert_eq!(catalog.get_artists_count(), ARTIST_NAMES.len());
    assert_eq!(
        catalog.get_songs_count(),
        ARTIST_NAMES.len() * SongTemplate::ALL.len()
    );
    assert_eq!(catalog.get_tags_count(), 12);
    for (name, count) in catalog.songs_per_artist() {
        assert_eq!(count, SongTemplate::ALL.len(), "{} has {} songs", name, count);
    }
    assert!(catalog.duplicate_artist_names().is_empty());
    assert_eq!(catalog.get_untagged_artists_count(), 1);

    let air: Vec<&str> = catalog
        .songs()
        .iter()
        .filter(|s| s.artist_name == "Air")
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(air[0], "Air - Greatest Hits");
    assert_eq!(air[8], "Air - Studio Recording");
}

#[test]
fn test_latin1_names_are_decoded() {
    let dir = create_test_dataset().unwrap();
    let mut features = RandomFeatureProvider::seeded(1);
    let catalog = load_catalog(dir.path(), NO_URL, false, &mut features).unwrap();

    assert!(catalog.iter_artists().any(|a| a.name == LATIN1_ARTIST));
    let song = catalog
        .songs()
        .iter()
        .find(|s| s.artist_name == LATIN1_ARTIST)
        .unwrap();
    assert_eq!(song.name, "Röyksopp - Greatest Hits");
    assert!(song
        .search_link
        .ends_with("search_query=R%C3%B6yksopp%20-%20Greatest%20Hits%20R%C3%B6yksopp"));
}

#[test]
fn test_tags_follow_event_order() {
    let dir = create_test_dataset().unwrap();
    let mut features = RandomFeatureProvider::seeded(1);
    let catalog = load_catalog(dir.path(), NO_URL, false, &mut features).unwrap();

    let by_artist = |name: &str| {
        catalog
            .songs()
            .iter()
            .find(|s| s.artist_name == name)
            .unwrap()
            .clone()
    };
    assert_eq!(by_artist("Air").tag_text, "chillout electronic ambient");
    assert_eq!(by_artist("Massive Attack").tag_text, "trip-hop chillout electronic");
    // The event with an unknown tag id is dropped.
    assert_eq!(by_artist("Air Supply").tag_text, "soft rock love songs romantic");
    let untagged = by_artist("Untagged Artist");
    assert!(!untagged.has_tags());
    assert_eq!(untagged.tag_text, "");
}

#[test]
fn test_mood_scores_are_bounded() {
    let dir = create_test_dataset().unwrap();
    for seed in 0..5 {
        let mut features = RandomFeatureProvider::seeded(seed);
        let catalog = load_catalog(dir.path(), NO_URL, false, &mut features).unwrap();
        for song in catalog.songs() {
            for mood in Mood::ALL {
                let score = song.mood_score(mood);
                assert!(
                    (0.0..=1.0).contains(&score),
                    "{} scored {} for {}",
                    song.name,
                    score,
                    mood
                );
            }
        }
    }
}

#[test]
fn test_missing_dataset_without_download_fails() {
    let dir = TempDir::new().unwrap();
    let mut features = RandomFeatureProvider::seeded(1);
    let err = load_catalog(dir.path(), NO_URL, false, &mut features).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DatasetError>(),
        Some(DatasetError::DataUnavailable { .. })
    ));
}

#[test]
fn test_malformed_row_is_reported() {
    let dir = create_test_dataset().unwrap();
    fs::write(
        dir.path().join("user_artists.dat"),
        "userID\tartistID\tweight\n2\tnot-a-number\t13883\n",
    )
    .unwrap();
    let mut features = RandomFeatureProvider::seeded(1);
    let err = load_catalog(dir.path(), NO_URL, false, &mut features).unwrap_err();
    match err.downcast_ref::<DatasetError>() {
        Some(DatasetError::Malformed { file, line, .. }) => {
            assert_eq!(*file, "user_artists.dat");
            assert_eq!(*line, 2);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
