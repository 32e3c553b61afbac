//! Application configuration.
//!
//! The configuration system layers, lowest precedence first:
//! - Bundled defaults (include_str! from dreadcast.toml)
//! - `~/.config/dreadcast/dreadcast.toml`
//! - `./dreadcast.toml`
//! - An explicit `--config` file
//! - `DREADCAST_<SECTION>__<KEY>` environment variables

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use dreadcast_error::{ConfigError, ConfigErrorKind, DreadcastError, DreadcastResult};
use dreadcast_narration::{NarrationConfig, VideoConfig};
use dreadcast_reddit::RedditConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../dreadcast.toml");

/// Where stories and artifacts live on disk.
///
/// ```toml
/// [paths]
/// stories_dir = "reddit_stories"
/// audio_dir = "audio"
/// video_dir = "videos"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Story store directory, one `<id>.json` per story
    pub stories_dir: PathBuf,
    /// Narration WAV output directory
    pub audio_dir: PathBuf,
    /// Rendered MP4 output directory
    pub video_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            stories_dir: PathBuf::from("reddit_stories"),
            audio_dir: PathBuf::from("audio"),
            video_dir: PathBuf::from("videos"),
        }
    }
}

/// Complete Dreadcast configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DreadcastConfig {
    /// `[reddit]` scraper settings
    pub reddit: RedditConfig,
    /// `[narration]` text-to-speech settings
    pub narration: NarrationConfig,
    /// `[paths]` storage locations
    pub paths: PathsConfig,
    /// `[video]` rendering settings
    pub video: VideoConfig,
}

impl DreadcastConfig {
    /// Load configuration from a single TOML file, without defaults layering.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> DreadcastResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration from file");

        Config::builder()
            .add_source(File::from(path))
            .build()
            .map_err(|e| {
                DreadcastError::from(
                    ConfigError::new(ConfigErrorKind::Unreadable(e.to_string())).in_file(path),
                )
            })?
            .try_deserialize()
            .map_err(|e| {
                DreadcastError::from(
                    ConfigError::new(ConfigErrorKind::Invalid(e.to_string())).in_file(path),
                )
            })
    }

    /// The bundled defaults on their own.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the bundled file is invalid.
    pub fn bundled() -> DreadcastResult<Self> {
        Self::finish(Self::defaults())
    }

    /// Load configuration with the full precedence chain.
    ///
    /// User config files are optional and skipped when absent; an explicit
    /// file must exist. A `.env` file in the working directory is loaded
    /// first so `GEMINI_API_KEY` and `DREADCAST_*` variables can live there.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dreadcast::DreadcastConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = DreadcastConfig::load(None)?;
    /// println!("Stories in {}", config.paths.stories_dir.display());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> DreadcastResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/dreadcast/dreadcast.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("dreadcast").required(false));

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::new(ConfigErrorKind::FileNotFound)
                    .in_file(path)
                    .into());
            }
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("DREADCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> DreadcastResult<Self> {
        builder
            .build()
            .map_err(|e| {
                DreadcastError::from(ConfigError::new(ConfigErrorKind::Unreadable(
                    e.to_string(),
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                DreadcastError::from(ConfigError::new(ConfigErrorKind::Invalid(e.to_string())))
            })
    }
}
