//! End-to-end tests for mood, artist and tag queries

mod common;

use common::{build_recommender, create_test_dataset};
use moodtrack::mood::Mood;
use moodtrack::recommend::{QueryKind, RecommendError, RecommendationScore};
use moodtrack::text_index::{TextIndex, DEFAULT_MAX_FEATURES};

#[test]
fn test_mood_query_returns_top_songs_from_catalog() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 7, 0.2).unwrap();

    for mood in Mood::ALL {
        let outcome = recommender.recommend_songs("mood", mood.as_str());
        assert!(outcome.notice.is_none());
        assert_eq!(outcome.rows.len(), 5);
        for row in outcome.rows.iter() {
            let song = recommender.catalog().get_song(row.song_index).unwrap();
            assert_eq!(row.song_name, song.name);
            assert_eq!(row.artist_name, song.artist_name);
            match row.score {
                RecommendationScore::Mood(score) => {
                    assert!(score >= 0.0 && score <= 1.0);
                    assert_eq!(score, song.mood_score(mood));
                }
                other => panic!("unexpected score {:?}", other),
            }
        }
    }
}

#[test]
fn test_mood_query_is_case_insensitive() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 7, 0.2).unwrap();
    let outcome = recommender.recommend_songs("mood", "  HaPpY ");
    assert!(outcome.notice.is_none());
    assert!(!outcome.is_empty());
}

#[test]
fn test_base_mood_scores_are_stable_across_queries() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 11, 0.2).unwrap();

    let first = recommender.recommend_songs("mood", "sad");
    let second = recommender.recommend_songs("mood", "sad");
    for a in first.rows.iter() {
        if let Some(b) = second.rows.iter().find(|b| b.song_index == a.song_index) {
            assert_eq!(a.score, b.score);
        }
    }
}

#[test]
fn test_without_jitter_mood_ranking_is_deterministic() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 3, 0.0).unwrap();

    let first = recommender.recommend_songs("mood", "relaxing");
    let second = recommender.recommend_songs("mood", "relaxing");
    assert_eq!(first, second);

    let scores: Vec<f64> = first
        .rows
        .iter()
        .map(|r| match r.score {
            RecommendationScore::Mood(s) => s,
            _ => unreachable!(),
        })
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));

    let best = recommender
        .catalog()
        .songs()
        .iter()
        .map(|s| s.mood_score(Mood::Relaxing))
        .fold(f64::MIN, f64::max);
    assert_eq!(scores[0], best);
}

#[test]
fn test_unknown_mood_gives_empty_outcome() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 7, 0.2).unwrap();
    let outcome = recommender.recommend_songs("mood", "grumpy");
    assert!(outcome.is_empty());
    assert_eq!(
        outcome.notice,
        Some(RecommendError::UnknownMood("grumpy".to_string()))
    );
}

#[test]
fn test_unknown_query_type_gives_empty_outcome() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 7, 0.2).unwrap();
    let outcome = recommender.recommend_songs("genre", "rock");
    assert!(outcome.is_empty());
    assert_eq!(
        outcome.notice,
        Some(RecommendError::UnknownQueryType("genre".to_string()))
    );
}

#[test]
fn test_artist_query_for_unknown_artist() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 7, 0.2).unwrap();
    let outcome = recommender.recommend_songs("artist", "Nonexistent Band");
    assert!(outcome.is_empty());
    assert_eq!(
        outcome.notice,
        Some(RecommendError::NoMatch {
            kind: QueryKind::Artist,
            value: "Nonexistent Band".to_string(),
        })
    );
}

#[test]
fn test_artist_query_ranks_by_tag_similarity() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 7, 0.2).unwrap();

    let outcome = recommender.recommend_songs("artist", "slayer");
    assert!(outcome.notice.is_none());
    assert_eq!(outcome.rows.len(), 5);
    for row in outcome.rows.iter() {
        assert_ne!(row.artist_name, "Slayer");
        // Metallica is the only other artist tagged with "metal".
        assert_eq!(row.artist_name, "Metallica");
        match row.score {
            RecommendationScore::Similarity(s) => assert!(s > 0.0 && s <= 1.0 + 1e-9),
            other => panic!("unexpected score {:?}", other),
        }
    }
}

#[test]
fn test_artist_query_never_returns_the_queried_artist() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 13, 0.2).unwrap();

    for _ in 0..10 {
        let outcome = recommender.recommend_songs("artist", "AIR");
        assert!(outcome.notice.is_none());
        assert!(outcome.rows.len() <= 5);
        assert!(outcome.rows.iter().all(|r| r.artist_name != "Air"));
    }
}

#[test]
fn test_tag_query_samples_matching_songs() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 7, 0.2).unwrap();

    let outcome = recommender.recommend_songs("tag", "Metal");
    assert!(outcome.notice.is_none());
    assert_eq!(outcome.rows.len(), 5);
    for row in outcome.rows.iter() {
        assert!(row.artist_name == "Slayer" || row.artist_name == "Metallica");
        assert_eq!(row.score, RecommendationScore::Unranked);
    }

    let outcome = recommender.recommend_songs("tag", "polka");
    assert!(outcome.is_empty());
    assert!(matches!(
        outcome.notice,
        Some(RecommendError::NoMatch {
            kind: QueryKind::Tag,
            ..
        })
    ));
}

#[test]
fn test_rebuilding_the_index_gives_identical_similarities() {
    let dir = create_test_dataset().unwrap();
    let recommender = build_recommender(dir.path(), 7, 0.2).unwrap();
    let corpus: Vec<&str> = recommender
        .catalog()
        .songs()
        .iter()
        .map(|s| s.tag_text.as_str())
        .collect();

    let rebuilt = TextIndex::build(corpus.iter().copied(), DEFAULT_MAX_FEATURES);
    for i in 0..corpus.len() {
        assert_eq!(
            recommender.index().similarities_to(i),
            rebuilt.similarities_to(i)
        );
    }
}
