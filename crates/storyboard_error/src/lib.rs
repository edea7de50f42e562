//! Error types for the storyboard director.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Every kind converts into [`StoryboardError`], so `?` works across crates.
//!
//! # Examples
//!
//! ```
//! use storyboard_error::{StoryboardResult, ValidationError, ValidationErrorKind};
//!
//! fn submit(seed: &str) -> StoryboardResult<()> {
//!     if seed.trim().is_empty() {
//!         return Err(ValidationError::new(ValidationErrorKind::EmptySeed).into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(submit("").is_err());
//! assert!(submit("A rooftop at dusk").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod export;
mod generation;
mod validation;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{StoryboardError, StoryboardErrorKind, StoryboardResult};
pub use export::{ExportError, ExportErrorKind};
pub use generation::{GenerationError, GenerationErrorKind, RetryableError};
pub use validation::{ValidationError, ValidationErrorKind};
