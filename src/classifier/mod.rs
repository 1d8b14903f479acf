//! Video mood classification through an external program.

use crate::mood::Mood;
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Video file {0:?} does not exist")]
    MissingVideo(std::path::PathBuf),

    #[error("Invalid classifier command: {0}")]
    InvalidCommand(String),

    #[error("Failed to execute classifier {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Classifier exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Classifier output has no mood: {0:?}")]
    UnrecognizedOutput(String),
}

/// Maps a video file to a mood category.
pub trait MoodClassifier: Send + Sync {
    fn classify(&self, video: &Path) -> Result<Mood, ClassifierError>;
}

/// Runs `program args... <video>` and takes the first mood name found in its
/// standard output.
#[derive(Debug, Clone)]
pub struct CommandMoodClassifier {
    program: String,
    args: Vec<String>,
}

impl CommandMoodClassifier {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Builds a classifier from a shell-like command line.
    pub fn from_command_line(command: &str) -> Result<Self, ClassifierError> {
        let mut parts = shlex::split(command)
            .ok_or_else(|| ClassifierError::InvalidCommand(command.to_string()))?
            .into_iter();
        let program = parts
            .next()
            .ok_or_else(|| ClassifierError::InvalidCommand(command.to_string()))?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

/// First word of `output` naming a mood, case-insensitive.
pub fn parse_mood_output(output: &str) -> Option<Mood> {
    output
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .find_map(|w| w.parse::<Mood>().ok())
}

impl MoodClassifier for CommandMoodClassifier {
    fn classify(&self, video: &Path) -> Result<Mood, ClassifierError> {
        if !video.exists() {
            return Err(ClassifierError::MissingVideo(video.to_path_buf()));
        }
        info!("Classifying {} with {}", video.display(), self.program);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(video)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ClassifierError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClassifierError::Failed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("Classifier output: {}", stdout.trim());
        parse_mood_output(&stdout)
            .ok_or_else(|| ClassifierError::UnrecognizedOutput(stdout.trim().to_string()))
    }
}
