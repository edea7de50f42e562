//! Top-level error wrapper types.

use crate::{ConfigError, ExportError, GenerationError, ValidationError};

/// Every error condition the storyboard crates can report.
///
/// # Examples
///
/// ```
/// use storyboard_error::{GenerationError, GenerationErrorKind, StoryboardError};
///
/// let err: StoryboardError = GenerationError::new(GenerationErrorKind::QuotaExceeded).into();
/// assert!(format!("{}", err).contains("quota"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryboardErrorKind {
    /// User input rejected before any backend call
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Text or image backend failure
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Configuration loading or parsing failure
    #[from(ConfigError)]
    Config(ConfigError),
    /// Manifest or archive export failure
    #[from(ExportError)]
    Export(ExportError),
}

/// Storyboard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyboard_error::{ConfigError, ConfigErrorKind, StoryboardResult};
///
/// fn load() -> StoryboardResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Parse("bad toml".to_string())))?
/// }
///
/// assert!(load().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {}", _0)]
pub struct StoryboardError(Box<StoryboardErrorKind>);

impl StoryboardError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryboardErrorKind {
        &self.0
    }

    /// Message suitable for the session error banner.
    ///
    /// Validation and generation errors carry their own user-facing text;
    /// everything else falls back to the display form.
    pub fn user_message(&self) -> String {
        match self.kind() {
            StoryboardErrorKind::Validation(e) => e.kind().to_string(),
            StoryboardErrorKind::Generation(e) => e.kind.user_message(),
            other => other.to_string(),
        }
    }
}

impl<T> From<T> for StoryboardError
where
    T: Into<StoryboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for storyboard operations.
pub type StoryboardResult<T> = std::result::Result<T, StoryboardError>;
