//! Startup shared by the binaries: arguments, logging, and building the
//! recommender and its collaborators from the resolved config.

use crate::captions::CaptionLibrary;
use crate::catalog::load_catalog;
use crate::classifier::{CommandMoodClassifier, MoodClassifier};
use crate::config::{AppConfig, CliConfig, FileConfig};
use crate::dataset::DEFAULT_DATASET_URL;
use crate::features::RandomFeatureProvider;
use crate::recommend::{Recommender, DEFAULT_MAX_RESULTS, DEFAULT_MOOD_JITTER};
use crate::text_index::DEFAULT_MAX_FEATURES;
use crate::video::VideoPipeline;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Arguments shared by every binary. Values in the `--config` TOML file take
/// precedence.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to a TOML config file.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding (or receiving) the LastFM dataset files.
    #[clap(long, value_parser = parse_path)]
    pub data_dir: Option<PathBuf>,

    /// Where to download the dataset archive from.
    #[clap(long, default_value = DEFAULT_DATASET_URL)]
    pub dataset_url: String,

    /// Fail instead of downloading when the dataset is missing.
    #[clap(long)]
    pub no_download: bool,

    /// MusicCaps CSV used for caption-based links.
    #[clap(long, value_parser = parse_path)]
    pub captions: Option<PathBuf>,

    /// Number of songs returned per query.
    #[clap(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// Width of the random boost added to mood scores. 0 disables it.
    #[clap(long, default_value_t = DEFAULT_MOOD_JITTER)]
    pub mood_jitter: f64,

    /// Vocabulary size of the tag index.
    #[clap(long, default_value_t = DEFAULT_MAX_FEATURES)]
    pub max_features: usize,

    /// Seed for synthetic features and query randomness.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Command line of the video mood classifier, the video path is appended.
    #[clap(long)]
    pub classifier: Option<String>,
}

impl CommonArgs {
    pub fn cli_config(&self) -> CliConfig {
        CliConfig {
            data_dir: self.data_dir.clone(),
            dataset_url: self.dataset_url.clone(),
            download_if_missing: !self.no_download,
            captions_path: self.captions.clone(),
            max_results: self.max_results,
            mood_jitter: self.mood_jitter,
            max_features: self.max_features,
            seed: self.seed,
            classifier_command: self.classifier.clone(),
        }
    }

    pub fn resolve(&self) -> Result<AppConfig> {
        let file_config = match &self.config {
            Some(path) => {
                info!("Loading config from {:?}", path);
                Some(FileConfig::load(path)?)
            }
            None => None,
        };
        AppConfig::resolve(&self.cli_config(), file_config)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init();
}

/// The long-lived objects of a session, built once at startup.
pub struct Services {
    pub config: AppConfig,
    pub recommender: Arc<Recommender>,
    pub captions: Option<Arc<CaptionLibrary>>,
    pub classifier: Option<Arc<dyn MoodClassifier>>,
}

impl Services {
    pub fn load(config: AppConfig) -> Result<Services> {
        let mut features = match config.recommender.seed {
            Some(seed) => RandomFeatureProvider::seeded(seed),
            None => RandomFeatureProvider::new(),
        };
        let catalog = load_catalog(
            &config.data_dir,
            &config.dataset_url,
            config.download_if_missing,
            &mut features,
        )?;
        let recommender = Arc::new(Recommender::new(catalog, config.recommender.clone()));

        // Captions and classifier are optional, a broken one only disables
        // its own feature.
        let captions = match &config.captions_path {
            Some(path) => match CaptionLibrary::load(path) {
                Ok(library) => Some(Arc::new(library)),
                Err(err) => {
                    warn!("Could not load captions, caption links disabled: {}", err);
                    None
                }
            },
            None => None,
        };

        let classifier = match &config.classifier_command {
            Some(command) => match CommandMoodClassifier::from_command_line(command) {
                Ok(classifier) => Some(Arc::new(classifier) as Arc<dyn MoodClassifier>),
                Err(err) => {
                    warn!("Could not set up video classifier, videos disabled: {}", err);
                    None
                }
            },
            None => None,
        };

        Ok(Services {
            config,
            recommender,
            captions,
            classifier,
        })
    }

    /// `None` when no classifier is configured.
    pub fn video_pipeline(&self) -> Option<VideoPipeline> {
        let classifier = self.classifier.clone()?;
        Some(VideoPipeline::new(
            self.recommender.clone(),
            classifier,
            self.captions.clone(),
        ))
    }
}
