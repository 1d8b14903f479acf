//! Mood categories and per-song mood affinity scoring.

mod scorer;

pub use scorer::{feature_score, score_song, tag_overlap_score, MoodScores};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Relaxing,
    Romantic,
    Angry,
    Energetic,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Relaxing,
        Mood::Romantic,
        Mood::Angry,
        Mood::Energetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Relaxing => "relaxing",
            Mood::Romantic => "romantic",
            Mood::Angry => "angry",
            Mood::Energetic => "energetic",
        }
    }

    /// Tag substrings that signal this mood, all lowercase.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Mood::Happy => &[
                "happy", "upbeat", "fun", "cheerful", "joyful", "energetic", "party",
            ],
            Mood::Sad => &[
                "sad",
                "melancholic",
                "depressing",
                "gloomy",
                "dark",
                "emotional",
            ],
            Mood::Relaxing => &["chill", "relaxing", "calm", "peaceful", "mellow", "ambient"],
            Mood::Romantic => &["romantic", "love", "lovely", "sweet", "beautiful"],
            Mood::Angry => &["angry", "aggressive", "intense", "heavy", "rage"],
            Mood::Energetic => &["energetic", "upbeat", "powerful", "dynamic", "lively"],
        }
    }

    /// Short human description, shown by the interactive menu.
    pub fn description(&self) -> &'static str {
        match self {
            Mood::Happy => "upbeat, cheerful, energetic",
            Mood::Sad => "melancholic, emotional, gloomy",
            Mood::Relaxing => "calm, peaceful, mellow",
            Mood::Romantic => "love songs, sweet, beautiful",
            Mood::Angry => "aggressive, intense, heavy",
            Mood::Energetic => "powerful, dynamic, lively",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Mood::Happy => 0,
            Mood::Sad => 1,
            Mood::Relaxing => 2,
            Mood::Romantic => 3,
            Mood::Angry => 4,
            Mood::Energetic => 5,
        }
    }

    pub fn names() -> Vec<&'static str> {
        Mood::ALL.iter().map(Mood::as_str).collect()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMoodName(pub String);

impl fmt::Display for UnknownMoodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown mood \"{}\", available moods: {}",
            self.0,
            Mood::names().join(", ")
        )
    }
}

impl std::error::Error for UnknownMoodName {}

impl FromStr for Mood {
    type Err = UnknownMoodName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| UnknownMoodName(s.to_string()))
    }
}
