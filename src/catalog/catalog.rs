use super::song::search_link;
use super::{Artist, Song, SongTemplate};
use crate::dataset::LastFmTables;
use crate::features::FeatureProvider;
use crate::mood::MoodScores;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable song catalog synthesized from the dataset tables.
///
/// Songs are ordered by artist (dataset order), then by [`SongTemplate::ALL`].
#[derive(Debug)]
pub struct Catalog {
    artists: Vec<Artist>,
    songs: Vec<Song>,
    tags_count: usize,
}

impl Catalog {
    pub fn build(tables: &LastFmTables, features: &mut dyn FeatureProvider) -> Result<Catalog> {
        let mut artist_tags = tables.artist_tags();
        let mut songs = Vec::with_capacity(tables.artists.len() * SongTemplate::ALL.len());

        for artist in tables.artists.iter() {
            let tags: Arc<[String]> = artist_tags
                .remove(&artist.id)
                .map(Arc::from)
                .unwrap_or_else(|| Arc::from(Vec::new()));
            let tag_text = tags.join(" ");

            for template in SongTemplate::ALL {
                let name = template.song_name(&artist.name);
                let song_features = features
                    .features_for(artist, template)
                    .with_context(|| format!("Could not compute features for \"{}\"", name))?;
                let moods = MoodScores::compute(&song_features, &tags);
                let search_link = search_link(&name, &artist.name);
                songs.push(Song {
                    name,
                    template,
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    tags: tags.clone(),
                    tag_text: tag_text.clone(),
                    features: song_features,
                    url: artist.url.clone(),
                    search_link,
                    moods,
                });
            }
        }

        Ok(Catalog {
            artists: tables.artists.clone(),
            songs,
            tags_count: tables.tags.len(),
        })
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn get_song(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn iter_artists(&self) -> impl Iterator<Item = &Artist> {
        self.artists.iter()
    }

    pub fn get_songs_count(&self) -> usize {
        self.songs.len()
    }

    pub fn get_artists_count(&self) -> usize {
        self.artists.len()
    }

    pub fn get_tags_count(&self) -> usize {
        self.tags_count
    }

    /// Number of songs per artist name.
    pub fn songs_per_artist(&self) -> HashMap<&str, usize> {
        let mut out = HashMap::new();
        for song in self.songs.iter() {
            *out.entry(song.artist_name.as_str()).or_insert(0) += 1;
        }
        out
    }

    /// Names carried by more than one artist, compared case-insensitively,
    /// sorted. Artist queries and exclusion match by name, so these artists
    /// are indistinguishable there.
    pub fn duplicate_artist_names(&self) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for artist in self.artists.iter() {
            *counts.entry(artist.name.to_lowercase()).or_insert(0) += 1;
        }
        let mut out: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect();
        out.sort();
        out
    }

    /// Artists without any tagging event. Their songs only score on features.
    pub fn get_untagged_artists_count(&self) -> usize {
        self.songs
            .chunks(SongTemplate::ALL.len())
            .filter(|songs| !songs[0].has_tags())
            .count()
    }
}
