use crate::features::AudioFeatures;
use crate::mood::{Mood, MoodScores};
use serde::Serialize;
use std::sync::Arc;

const SEARCH_URL_PREFIX: &str = "https://www.youtube.com/results?search_query=";

/// Kinds of synthetic song generated for every artist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum SongTemplate {
    GreatestHits,
    LivePerformance,
    AcousticVersion,
    RadioEdit,
    AlbumVersion,
    SingleVersion,
    Remix,
    ExtendedMix,
    StudioRecording,
}

impl SongTemplate {
    pub const ALL: [SongTemplate; 9] = [
        SongTemplate::GreatestHits,
        SongTemplate::LivePerformance,
        SongTemplate::AcousticVersion,
        SongTemplate::RadioEdit,
        SongTemplate::AlbumVersion,
        SongTemplate::SingleVersion,
        SongTemplate::Remix,
        SongTemplate::ExtendedMix,
        SongTemplate::StudioRecording,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            SongTemplate::GreatestHits => "Greatest Hits",
            SongTemplate::LivePerformance => "Live Performance",
            SongTemplate::AcousticVersion => "Acoustic Version",
            SongTemplate::RadioEdit => "Radio Edit",
            SongTemplate::AlbumVersion => "Album Version",
            SongTemplate::SingleVersion => "Single Version",
            SongTemplate::Remix => "Remix",
            SongTemplate::ExtendedMix => "Extended Mix",
            SongTemplate::StudioRecording => "Studio Recording",
        }
    }

    pub fn song_name(&self, artist_name: &str) -> String {
        format!("{} - {}", artist_name, self.suffix())
    }
}

/// A synthetic song, one per (artist, template) pair.
///
/// `tags` is the artist's tag list, shared by every song of that artist and
/// never mutated after the catalog is built.
#[derive(Debug, Clone)]
pub struct Song {
    pub name: String,
    pub template: SongTemplate,
    pub artist_id: i64,
    pub artist_name: String,
    pub tags: Arc<[String]>,
    pub tag_text: String,
    pub features: AudioFeatures,
    pub url: String,
    pub search_link: String,
    pub moods: MoodScores,
}

impl Song {
    pub fn mood_score(&self, mood: Mood) -> f64 {
        self.moods.get(mood)
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

/// Link to a web search for the song, built from its own name and artist.
pub fn search_link(song_name: &str, artist_name: &str) -> String {
    let query = format!("{} {}", song_name, artist_name);
    format!("{}{}", SEARCH_URL_PREFIX, urlencoding::encode(&query))
}
