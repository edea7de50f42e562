//! Configuration structures and layered loading.

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use storyboard_error::{ConfigError, ConfigErrorKind};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../storyboard.toml");

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "STORYBOARD";

/// Settings for the Gemini REST client.
///
/// # Example
///
/// ```toml
/// [gemini]
/// text_model = "gemini-2.5-flash"
/// max_retries = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// Base URL of the Generative Language API
    pub api_base: String,
    /// Model used for the story and shotlist
    pub text_model: String,
    /// Model used for shot images
    pub image_model: String,
    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,
    /// Retry attempts for transient failures
    pub max_retries: usize,
    /// Initial retry backoff in milliseconds
    pub retry_backoff_ms: u64,
    /// Upper bound for a single retry delay in seconds
    pub max_retry_delay_secs: u64,
    /// Disable retries entirely
    #[serde(default)]
    pub no_retry: bool,
}

impl GeminiConfig {
    /// HTTP timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Settings for the shot generation controllers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Per-shot timeout in seconds, 0 for none
    #[serde(default)]
    pub shot_timeout_secs: u64,
}

impl GenerationConfig {
    /// The per-shot timeout, if enabled.
    pub fn shot_timeout(&self) -> Option<Duration> {
        (self.shot_timeout_secs > 0).then(|| Duration::from_secs(self.shot_timeout_secs))
    }
}

/// Settings for archive export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Directory archives are written to
    pub output_dir: String,
}

/// Top-level storyboard configuration.
///
/// # Example
///
/// ```no_run
/// use storyboard_config::StoryboardConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryboardConfig::load()?;
/// println!("Image model: {}", config.gemini.image_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoryboardConfig {
    /// Gemini client settings
    pub gemini: GeminiConfig,
    /// Generation controller settings
    pub generation: GenerationConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl StoryboardConfig {
    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse, which would be a
    /// packaging bug.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::finish(Self::defaults())
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be read or the merged
    /// result does not validate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Like [`load`](Self::load), with an extra required file layered just
    /// below the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is missing or any source fails to parse.
    #[instrument]
    pub fn load_with(path: Option<&Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyboard/storyboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyboard").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        Self::finish(builder.add_source(Self::environment()))
    }

    /// Load a specific file on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration from file");
        Self::finish(Self::defaults().add_source(File::from(path.as_ref())))
    }

    /// Parse TOML text on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::finish(Self::defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Check value ranges after merging.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, reason: &str| {
            Err(ConfigError::new(ConfigErrorKind::InvalidValue {
                key: key.to_string(),
                reason: reason.to_string(),
            }))
        };

        if self.gemini.api_base.trim().is_empty() {
            return invalid("gemini.api_base", "must not be empty");
        }
        if self.gemini.text_model.trim().is_empty() {
            return invalid("gemini.text_model", "must not be empty");
        }
        if self.gemini.image_model.trim().is_empty() {
            return invalid("gemini.image_model", "must not be empty");
        }
        if self.gemini.request_timeout_secs == 0 {
            return invalid("gemini.request_timeout_secs", "must be at least 1");
        }
        Ok(())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        config.validate()?;
        Ok(config)
    }
}
