//! End-to-end tests for the video flow, wired the way the binaries wire it

mod common;

use common::{create_test_captions, create_test_dataset};
use moodtrack::app::Services;
use moodtrack::classifier::ClassifierError;
use moodtrack::config::{AppConfig, CliConfig, FileConfig};
use moodtrack::mood::Mood;
use moodtrack::video::VideoError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn services(dataset: &TempDir, classifier: Option<&str>) -> Services {
    let captions = create_test_captions(dataset.path()).unwrap();
    let cli = CliConfig {
        data_dir: Some(dataset.path().to_path_buf()),
        download_if_missing: false,
        captions_path: Some(captions),
        seed: Some(21),
        ..CliConfig::default()
    };
    let file = FileConfig {
        classifier_command: classifier.map(String::from),
        ..FileConfig::default()
    };
    let config = AppConfig::resolve(&cli, Some(file)).unwrap();
    Services::load(config).unwrap()
}

fn video(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("birthday.mp4");
    fs::write(&path, b"fake video").unwrap();
    path
}

#[test]
fn test_video_without_classifier_has_no_pipeline() {
    let dataset = create_test_dataset().unwrap();
    let services = services(&dataset, None);
    assert!(services.video_pipeline().is_none());
    assert_eq!(services.captions.as_ref().unwrap().len(), 3);
}

#[cfg(unix)]
#[test]
fn test_video_recommends_songs_and_captions() {
    let dataset = create_test_dataset().unwrap();
    let services = services(&dataset, Some("sh -c 'echo Mood: happy'"));
    let pipeline = services.video_pipeline().unwrap();

    let result = pipeline.recommend_for_video(&video(&dataset)).unwrap();
    assert_eq!(result.mood, Mood::Happy);
    assert!(result.songs.notice.is_none());
    assert_eq!(result.songs.rows.len(), 5);
    assert_eq!(
        result.caption_links,
        vec![
            "https://youtu.be/-0SdAVK79lg?start=30",
            "https://youtu.be/-0vPFx-wRRI?start=30",
        ]
    );

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["mood"], "happy");
    assert_eq!(json["songs"].as_array().unwrap().len(), 5);
    assert_eq!(json["songs"][0]["score"]["kind"], "mood");
}

#[cfg(unix)]
#[test]
fn test_video_classifier_failure_is_reported() {
    let dataset = create_test_dataset().unwrap();
    let services = services(&dataset, Some("sh -c 'exit 1'"));
    let pipeline = services.video_pipeline().unwrap();

    let err = pipeline.recommend_for_video(&video(&dataset)).unwrap_err();
    assert!(matches!(
        err,
        VideoError::Classification(ClassifierError::Failed { .. })
    ));

    // The recommender keeps answering after a failed classification.
    let outcome = services.recommender.recommend_songs("mood", "happy");
    assert_eq!(outcome.rows.len(), 5);
}

#[test]
fn test_video_missing_file_is_reported() {
    let dataset = create_test_dataset().unwrap();
    let services = services(&dataset, Some("classify-video"));
    let pipeline = services.video_pipeline().unwrap();

    let err = pipeline
        .recommend_for_video(&dataset.path().join("missing.mp4"))
        .unwrap_err();
    assert!(matches!(
        err,
        VideoError::Classification(ClassifierError::MissingVideo(_))
    ));
}

fn services_with(dataset: &TempDir, captions: PathBuf, classifier: Option<&str>) -> Services {
    let cli = CliConfig {
        data_dir: Some(dataset.path().to_path_buf()),
        download_if_missing: false,
        captions_path: Some(captions),
        classifier_command: classifier.map(String::from),
        seed: Some(21),
        ..CliConfig::default()
    };
    let config = AppConfig::resolve(&cli, None).unwrap();
    Services::load(config).unwrap()
}

#[test]
fn test_broken_captions_file_only_disables_captions() {
    let dataset = create_test_dataset().unwrap();
    let captions = dataset.path().join("broken-captions.csv");
    fs::write(&captions, "foo,bar\n1,2\n").unwrap();

    let services = services_with(&dataset, captions, None);
    assert!(services.captions.is_none());

    let outcome = services.recommender.recommend_songs("mood", "sad");
    assert!(outcome.notice.is_none());
    assert_eq!(outcome.rows.len(), 5);
}

#[test]
fn test_missing_captions_file_only_disables_captions() {
    let dataset = create_test_dataset().unwrap();
    let services = services_with(&dataset, dataset.path().join("nope.csv"), None);
    assert!(services.captions.is_none());

    let outcome = services.recommender.recommend_songs("mood", "relaxing");
    assert!(outcome.notice.is_none());
    assert_eq!(outcome.rows.len(), 5);
}

#[test]
fn test_unparsable_classifier_only_disables_videos() {
    let dataset = create_test_dataset().unwrap();
    let captions = create_test_captions(dataset.path()).unwrap();
    let services = services_with(&dataset, captions, Some("\"unterminated"));

    assert!(services.classifier.is_none());
    assert!(services.video_pipeline().is_none());
    assert_eq!(services.captions.as_ref().unwrap().len(), 3);

    let outcome = services.recommender.recommend_songs("mood", "happy");
    assert_eq!(outcome.rows.len(), 5);
}
