//! Backend generation errors and retry classification.

/// Failure conditions reported by the text and image backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Network failure or unreachable service
    #[display("Backend unavailable: {}", _0)]
    BackendUnavailable(String),
    /// Non-success HTTP status from the backend
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// Prompt or output blocked by the backend's safety filters
    #[display("Blocked by safety policy: {}", _0)]
    PolicyRefusal(String),
    /// Account quota exhausted
    #[display("API quota exhausted")]
    QuotaExceeded,
    /// Response could not be parsed into the expected structure
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
    /// Response carried no usable output
    #[display("Empty response from model")]
    EmptyResponse,
    /// Image requested but the model answered with text only
    #[display("Model returned text instead of an image: {}", _0)]
    TextInsteadOfImage(String),
    /// Call did not resolve within the configured limit
    #[display("Generation timed out after {} seconds", _0)]
    Timeout(u64),
}

impl GenerationErrorKind {
    /// Human-readable explanation shown in the session error banner.
    pub fn user_message(&self) -> String {
        match self {
            GenerationErrorKind::PolicyRefusal(_) => {
                "Image generation was blocked due to safety policies. Please revise the prompt to be more neutral.".to_string()
            }
            GenerationErrorKind::QuotaExceeded => {
                "You have exceeded your API quota. Please check your Google AI account plan and billing details.".to_string()
            }
            GenerationErrorKind::TextInsteadOfImage(text) => {
                format!("The model responded with text instead of an image: \"{}\"", text)
            }
            GenerationErrorKind::EmptyResponse => {
                "The model did not return an image. This might be due to safety filters or the complexity of the request.".to_string()
            }
            GenerationErrorKind::Timeout(secs) => {
                format!("Image generation did not finish within {} seconds.", secs)
            }
            other => format!("Image generation failed: {}", other),
        }
    }

    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationErrorKind::HttpStatus { status_code, .. } => {
                matches!(*status_code, 408 | 500 | 502 | 503 | 504)
            }
            GenerationErrorKind::BackendUnavailable(_) => true,
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            GenerationErrorKind::HttpStatus { status_code, .. } => match *status_code {
                503 => (2000, 5, 60),
                500 | 502 | 504 => (1000, 3, 8),
                408 => (2000, 4, 30),
                _ => (2000, 3, 30),
            },
            GenerationErrorKind::BackendUnavailable(_) => (1000, 3, 10),
            _ => (2000, 3, 30),
        }
    }

    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            GenerationErrorKind::MissingApiKey => "auth",
            GenerationErrorKind::BackendUnavailable(_) => "network",
            GenerationErrorKind::HttpStatus { .. } => "http",
            GenerationErrorKind::PolicyRefusal(_) => "policy",
            GenerationErrorKind::QuotaExceeded => "quota",
            GenerationErrorKind::MalformedResponse(_) => "malformed",
            GenerationErrorKind::EmptyResponse => "empty",
            GenerationErrorKind::TextInsteadOfImage(_) => "text_only",
            GenerationErrorKind::Timeout(_) => "timeout",
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Human-readable explanation, see [`GenerationErrorKind::user_message`].
    pub fn user_message(&self) -> String {
        self.kind.user_message()
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use storyboard_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::HttpStatus {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 5);
///
/// let quota = GenerationError::new(GenerationErrorKind::QuotaExceeded);
/// assert!(!quota.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient conditions (503, timeouts at the HTTP layer, dropped
    /// connections) return true. Policy refusals, quota exhaustion and
    /// malformed output never do: repeating the call cannot fix them.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 3, 30)
    }
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
