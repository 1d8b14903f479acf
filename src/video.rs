//! Video to music: classify a clip, then recommend for its mood.

use crate::captions::{CaptionLibrary, DEFAULT_CAPTION_LINKS};
use crate::classifier::{ClassifierError, MoodClassifier};
use crate::mood::Mood;
use crate::recommend::{Recommendation, RecommendationOutcome, Recommender};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("Could not classify video: {0}")]
    Classification(#[from] ClassifierError),

    #[error("Video worker panicked")]
    WorkerPanicked,

    #[error("Could not start video worker: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct VideoRecommendation {
    pub video: PathBuf,
    pub mood: Mood,
    pub songs: RecommendationOutcome,
    pub caption_links: Vec<String>,
}

#[derive(Serialize)]
struct VideoRecommendationJson<'a> {
    video: &'a Path,
    mood: Mood,
    songs: &'a [Recommendation],
    notice: Option<String>,
    caption_links: &'a [String],
}

impl VideoRecommendation {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&VideoRecommendationJson {
            video: &self.video,
            mood: self.mood,
            songs: &self.songs.rows,
            notice: self.songs.notice.as_ref().map(|n| n.to_string()),
            caption_links: &self.caption_links,
        })
    }
}

/// Everything the worker needs, shared read-only with the caller.
#[derive(Clone)]
pub struct VideoPipeline {
    recommender: Arc<Recommender>,
    classifier: Arc<dyn MoodClassifier>,
    captions: Option<Arc<CaptionLibrary>>,
}

impl VideoPipeline {
    pub fn new(
        recommender: Arc<Recommender>,
        classifier: Arc<dyn MoodClassifier>,
        captions: Option<Arc<CaptionLibrary>>,
    ) -> Self {
        Self {
            recommender,
            classifier,
            captions,
        }
    }

    /// Runs classification and recommendation inline on the current thread.
    pub fn process(&self, video: &Path) -> Result<VideoRecommendation, VideoError> {
        let mood = self.classifier.classify(video)?;
        info!("Video {} classified as {}", video.display(), mood);

        let songs = self.recommender.recommend_songs("mood", mood.as_str());
        let caption_links = match &self.captions {
            Some(library) => library.links_for_mood(mood, DEFAULT_CAPTION_LINKS),
            None => Vec::new(),
        };
        Ok(VideoRecommendation {
            video: video.to_path_buf(),
            mood,
            songs,
            caption_links,
        })
    }

    /// Hands the video to a single worker thread and waits for its result.
    pub fn recommend_for_video(&self, video: &Path) -> Result<VideoRecommendation, VideoError> {
        let pipeline = self.clone();
        let video = video.to_path_buf();
        let handle = thread::Builder::new()
            .name("video-classifier".to_string())
            .spawn(move || pipeline.process(&video))?;
        match handle.join() {
            Ok(result) => {
                if let Err(err) = &result {
                    warn!("{}", err);
                }
                result
            }
            Err(_) => Err(VideoError::WorkerPanicked),
        }
    }
}
