//! Export error types.

/// Kinds of export errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExportErrorKind {
    /// Export requested before every shot reached a terminal status
    #[display("Scene is not ready for export: {}", _0)]
    NotReady(String),
    /// Failed to create the output directory
    #[display("Failed to create output directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read a file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Archive packaging failed
    #[display("Archive error: {}", _0)]
    Archive(String),
    /// Manifest serialization failed
    #[display("Manifest serialization failed: {}", _0)]
    Serialization(String),
}

/// Export error with location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{ExportError, ExportErrorKind};
///
/// let err = ExportError::new(ExportErrorKind::NotReady("2 shots pending".to_string()));
/// assert!(format!("{}", err).contains("not ready"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: {} at line {} in {}", kind, line, file)]
pub struct ExportError {
    /// The kind of error that occurred
    pub kind: ExportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExportError {
    /// Create a new export error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
