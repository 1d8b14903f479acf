use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Dataset
    pub data_dir: Option<String>,
    pub dataset_url: Option<String>,
    pub download_if_missing: Option<bool>,
    pub captions_path: Option<String>,

    // Recommendation
    pub max_results: Option<usize>,
    pub mood_jitter: Option<f64>,
    pub max_features: Option<usize>,
    pub seed: Option<u64>,

    // Video
    pub classifier_command: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
