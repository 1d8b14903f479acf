use super::{
    DatasetError, ARTISTS_FILE, TAGS_FILE, USER_ARTISTS_FILE, USER_TAGGED_ARTISTS_FILE,
};
use crate::catalog::{Artist, Tag};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// How many times a user listened to an artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRecord {
    pub user_id: i64,
    pub artist_id: i64,
    pub weight: i64,
}

/// A user assigning a tag to an artist on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggingEvent {
    pub user_id: i64,
    pub artist_id: i64,
    pub tag_id: i64,
    pub day: u32,
    pub month: u32,
    pub year: u32,
}

/// The four raw tables of the dataset, in file order.
#[derive(Debug, Clone, Default)]
pub struct LastFmTables {
    pub artists: Vec<Artist>,
    pub plays: Vec<PlayRecord>,
    pub tags: Vec<Tag>,
    pub tagging_events: Vec<TaggingEvent>,
}

/// The dataset files are Latin-1, every byte maps to the code point of the
/// same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn field<'a>(fields: &[&'a str], index: usize, name: &str) -> Result<&'a str, String> {
    fields
        .get(index)
        .copied()
        .ok_or_else(|| format!("missing column \"{}\"", name))
}

fn int_field<T: std::str::FromStr>(fields: &[&str], index: usize, name: &str) -> Result<T, String> {
    let raw = field(fields, index, name)?;
    raw.trim()
        .parse()
        .map_err(|_| format!("column \"{}\" is not a number: \"{}\"", name, raw))
}

fn parse_artist(fields: &[&str]) -> Result<Artist, String> {
    Ok(Artist {
        id: int_field(fields, 0, "id")?,
        name: field(fields, 1, "name")?.to_string(),
        url: field(fields, 2, "url")?.to_string(),
    })
}

fn parse_play(fields: &[&str]) -> Result<PlayRecord, String> {
    Ok(PlayRecord {
        user_id: int_field(fields, 0, "userID")?,
        artist_id: int_field(fields, 1, "artistID")?,
        weight: int_field(fields, 2, "weight")?,
    })
}

fn parse_tag(fields: &[&str]) -> Result<Tag, String> {
    Ok(Tag {
        id: int_field(fields, 0, "tagID")?,
        value: field(fields, 1, "tagValue")?.to_string(),
    })
}

fn parse_tagging_event(fields: &[&str]) -> Result<TaggingEvent, String> {
    Ok(TaggingEvent {
        user_id: int_field(fields, 0, "userID")?,
        artist_id: int_field(fields, 1, "artistID")?,
        tag_id: int_field(fields, 2, "tagID")?,
        day: int_field(fields, 3, "day")?,
        month: int_field(fields, 4, "month")?,
        year: int_field(fields, 5, "year")?,
    })
}

/// Reads a tab separated table, skipping the header line and blank lines.
fn read_table<T>(
    dir: &Path,
    file: &'static str,
    parse: fn(&[&str]) -> Result<T, String>,
) -> Result<Vec<T>, DatasetError> {
    let path = dir.join(file);
    let bytes = std::fs::read(&path).map_err(|err| DatasetError::DataUnavailable {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    let text = decode_latin1(&bytes);

    let mut lines = text.lines().enumerate();
    if lines.next().is_none() {
        return Err(DatasetError::DataUnavailable {
            path,
            reason: "file is empty, expected a header line".to_string(),
        });
    }

    let mut rows = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let row = parse(&fields).map_err(|reason| DatasetError::Malformed {
            file,
            line: index + 1,
            reason,
        })?;
        rows.push(row);
    }
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

impl LastFmTables {
    pub fn read(dir: &Path) -> Result<LastFmTables, DatasetError> {
        let artists = read_table(dir, ARTISTS_FILE, parse_artist)?;
        let plays = read_table(dir, USER_ARTISTS_FILE, parse_play)?;
        let tags = read_table(dir, TAGS_FILE, parse_tag)?;
        let tagging_events = read_table(dir, USER_TAGGED_ARTISTS_FILE, parse_tagging_event)?;
        info!(
            "Dataset has {} artists, {} play records, {} tags, {} tagging events",
            artists.len(),
            plays.len(),
            tags.len(),
            tagging_events.len()
        );
        Ok(LastFmTables {
            artists,
            plays,
            tags,
            tagging_events,
        })
    }

    /// Tag values assigned to each artist, in tagging-event order.
    ///
    /// Repeated assignments of the same tag are kept. Events pointing to a
    /// tag id missing from the tag dictionary are dropped.
    pub fn artist_tags(&self) -> HashMap<i64, Vec<String>> {
        let dictionary: HashMap<i64, &str> = self
            .tags
            .iter()
            .map(|t| (t.id, t.value.as_str()))
            .collect();

        let mut out: HashMap<i64, Vec<String>> = HashMap::new();
        for event in self.tagging_events.iter() {
            if let Some(value) = dictionary.get(&event.tag_id) {
                out.entry(event.artist_id)
                    .or_default()
                    .push((*value).to_string());
            }
        }
        out
    }
}
