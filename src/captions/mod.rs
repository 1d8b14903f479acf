//! Mood filter over the MusicCaps caption dataset.

use crate::mood::Mood;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_CAPTION_LINKS: usize = 5;

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("Caption file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read caption file {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// One captioned clip. Only the columns used for linking are kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptionClip {
    pub ytid: String,
    pub start_s: String,
    #[serde(default)]
    pub aspect_list: String,
}

impl CaptionClip {
    pub fn link(&self) -> String {
        format!("https://youtu.be/{}?start={}", self.ytid, self.start_s)
    }
}

/// Caption rows in file order, loaded once and then read-only.
#[derive(Debug, Clone, Default)]
pub struct CaptionLibrary {
    clips: Vec<CaptionClip>,
}

impl CaptionLibrary {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<CaptionLibrary, CaptionError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CaptionError::NotFound(path.to_path_buf()));
        }
        let to_error = |source: csv::Error| CaptionError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(to_error)?;
        let clips = reader
            .deserialize::<CaptionClip>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_error)?;

        info!("Loaded {} caption clips from {}", clips.len(), path.display());
        Ok(CaptionLibrary { clips })
    }

    pub fn from_clips(clips: Vec<CaptionClip>) -> CaptionLibrary {
        CaptionLibrary { clips }
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Links of the first `limit` clips whose aspect list mentions the mood,
    /// case-insensitively.
    pub fn links_for_mood(&self, mood: Mood, limit: usize) -> Vec<String> {
        let links: Vec<String> = self
            .clips
            .iter()
            .filter(|c| c.aspect_list.to_lowercase().contains(mood.as_str()))
            .take(limit)
            .map(CaptionClip::link)
            .collect();
        debug!("{} caption links for mood {}", links.len(), mood);
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CSV: &str = "\
ytid,start_s,end_s,audioset_positive_labels,aspect_list,caption
a1,30,40,/m/x,\"['Happy tune', 'upbeat']\",A happy song
b2,0,10,/m/x,\"['sad piano']\",Slow
c3,10,20,/m/x,\"['HAPPY', 'loud']\",Loud
d4,50,60,/m/x,,Empty aspects
e5,20,30,/m/x,\"['unhappy']\",Gloomy
";

    fn write_library() -> (TempDir, CaptionLibrary) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("musiccaps-public.csv");
        fs::write(&path, CSV).unwrap();
        let library = CaptionLibrary::load(&path).unwrap();
        (dir, library)
    }

    #[test]
    fn loads_all_rows() {
        let (_dir, library) = write_library();
        assert_eq!(library.len(), 5);
    }

    #[test]
    fn filters_by_mood_case_insensitively() {
        let (_dir, library) = write_library();
        assert_eq!(
            library.links_for_mood(Mood::Happy, DEFAULT_CAPTION_LINKS),
            vec![
                "https://youtu.be/a1?start=30",
                "https://youtu.be/c3?start=10",
                "https://youtu.be/e5?start=20",
            ]
        );
        assert_eq!(
            library.links_for_mood(Mood::Sad, DEFAULT_CAPTION_LINKS),
            vec!["https://youtu.be/b2?start=0"]
        );
        assert!(library
            .links_for_mood(Mood::Angry, DEFAULT_CAPTION_LINKS)
            .is_empty());
    }

    #[test]
    fn keeps_only_the_first_matches() {
        let (_dir, library) = write_library();
        assert_eq!(
            library.links_for_mood(Mood::Happy, 1),
            vec!["https://youtu.be/a1?start=30"]
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let result = CaptionLibrary::load(dir.path().join("nope.csv"));
        assert!(matches!(result, Err(CaptionError::NotFound(_))));
    }
}
