//! Input validation errors raised before any backend call.

/// Specific validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Scene idea left blank at the compose step
    #[display("Please enter a scene idea to get started.")]
    EmptySeed,

    /// More reference images than the backend accepts
    #[display("You can upload a maximum of {} anchor images ({} supplied).", max, count)]
    TooManyReferences {
        /// Number of images supplied
        count: usize,
        /// Upper bound
        max: usize,
    },

    /// Field missing or out of range
    #[display("Invalid value for '{}': {}", field, reason)]
    InvalidField {
        /// The field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::EmptySeed);
/// assert_eq!(err.kind(), &ValidationErrorKind::EmptySeed);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    line: u32,
    file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}

/// Convert from derive_builder validation messages.
impl From<String> for ValidationError {
    #[track_caller]
    fn from(msg: String) -> Self {
        Self::new(ValidationErrorKind::InvalidField {
            field: "builder".to_string(),
            reason: msg,
        })
    }
}
