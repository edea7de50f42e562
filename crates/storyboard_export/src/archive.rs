//! ZIP packaging of a finished scene.
//!
//! Archive layout:
//!
//! ```text
//! StoryDirector_<scene>.zip
//! ├── manifest.json
//! └── images/
//!     ├── shot_1.png
//!     └── shot_3.png      (only shots that hold an image)
//! ```

use crate::SceneManifest;
use derive_getters::Getters;
use derive_setters::Setters;
use std::io::{Cursor, Seek, Write};
use std::path::PathBuf;
use storyboard_core::{SceneConfig, Shot};
use storyboard_error::{ExportError, ExportErrorKind, StoryboardResult};
use storyboard_session::SceneSession;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// File name of the archive for a scene idea.
///
/// Every character outside `[A-Za-z0-9]` becomes `_` and the result is
/// lowercased.
///
/// # Examples
///
/// ```
/// use storyboard_export::archive_file_name;
///
/// assert_eq!(
///     archive_file_name("A Spy & a Wizard!"),
///     "StoryDirector_a_spy___a_wizard_.zip"
/// );
/// ```
pub fn archive_file_name(seed: &str) -> String {
    let safe: String = seed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("StoryDirector_{}.zip", safe)
}

fn archive_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::new(ExportErrorKind::Archive(e.to_string()))
}

/// Write the manifest and every available shot image into `writer`.
///
/// Returns the writer once the archive is finished.
pub fn write_archive<W: Write + Seek>(
    writer: W,
    config: &SceneConfig,
    shots: &[Shot],
) -> Result<W, ExportError> {
    let manifest = SceneManifest::new(config, shots).to_json()?;

    let mut zip = ZipWriter::new(writer);
    let deflated = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let stored = FileOptions::default().compression_method(CompressionMethod::Stored);

    zip.start_file("manifest.json", deflated)
        .map_err(archive_error)?;
    zip.write_all(manifest.as_bytes()).map_err(archive_error)?;

    zip.add_directory("images/", stored).map_err(archive_error)?;
    let mut images = 0;
    for shot in shots {
        if let Some(image) = shot.image() {
            zip.start_file(format!("images/{}.png", shot.id()), stored)
                .map_err(archive_error)?;
            zip.write_all(image.data()).map_err(archive_error)?;
            images += 1;
        }
    }

    let writer = zip.finish().map_err(archive_error)?;
    tracing::debug!(shots = shots.len(), images, "Archive assembled");
    Ok(writer)
}

/// Writes scene archives into a directory.
#[derive(Debug, Clone, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct ArchiveExporter {
    /// Directory archives are written to
    #[setters(skip)]
    output_dir: PathBuf,
    /// Replace an existing archive with the same name
    overwrite: bool,
}

impl ArchiveExporter {
    /// Create an exporter, creating `output_dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(output_dir))]
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let output_dir = output_dir.into();

        std::fs::create_dir_all(&output_dir).map_err(|e| {
            ExportError::new(ExportErrorKind::DirectoryCreation(format!(
                "{}: {}",
                output_dir.display(),
                e
            )))
        })?;

        Ok(Self {
            output_dir,
            overwrite: true,
        })
    }

    /// Package the session's scene and return the archive path.
    ///
    /// # Errors
    ///
    /// `NotReady` unless every shot has finished and no batch is running.
    /// `FileWrite` when the archive exists and overwriting is off, or the
    /// file cannot be written.
    #[tracing::instrument(
        skip_all,
        fields(dir = %self.output_dir.display(), shots = session.shots().len())
    )]
    pub async fn export(&self, session: &SceneSession) -> StoryboardResult<PathBuf> {
        if !session.can_export() {
            let reason = not_ready_reason(session);
            return Err(ExportError::new(ExportErrorKind::NotReady(reason)).into());
        }
        let config = session.config().as_ref().ok_or_else(|| {
            ExportError::new(ExportErrorKind::NotReady("no scene composed".to_string()))
        })?;

        let bytes = write_archive(Cursor::new(Vec::new()), config, session.shots())?.into_inner();
        let path = self.output_dir.join(archive_file_name(config.seed()));

        if !self.overwrite && tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(ExportError::new(ExportErrorKind::FileWrite(format!(
                "{} already exists",
                path.display()
            )))
            .into());
        }

        // Write to temp file first, then rename
        let temp_path = path.with_extension("zip.tmp");
        tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
            ExportError::new(ExportErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            ExportError::new(ExportErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Exported storyboard archive");
        Ok(path)
    }
}

fn not_ready_reason(session: &SceneSession) -> String {
    if *session.batch_running() {
        return "batch generation is still running".to_string();
    }
    if session.shots().is_empty() {
        return "there are no shots".to_string();
    }
    let (pending, generating, _, _) = session.status_counts();
    format!(
        "{} of {} shots have not finished",
        pending + generating,
        session.shots().len()
    )
}
