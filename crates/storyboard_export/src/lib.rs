//! Export of finished storyboard scenes.
//!
//! A scene leaves the director in two forms:
//!
//! - a ZIP archive holding `manifest.json` plus one PNG per rendered shot
//! - an [`Animatic`], a timed slideshow of the rendered shots
//!
//! # Example
//!
//! ```rust,no_run
//! use storyboard_export::{Animatic, ArchiveExporter};
//! use storyboard_session::SceneSession;
//!
//! # async fn example(session: &SceneSession) -> Result<(), Box<dyn std::error::Error>> {
//! let exporter = ArchiveExporter::new("exports")?;
//! let path = exporter.export(session).await?;
//! println!("wrote {}", path.display());
//!
//! let animatic = Animatic::from_shots(session.shots());
//! println!("{} frames, {:?}", animatic.len(), animatic.total_duration());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animatic;
mod archive;
mod manifest;

pub use animatic::{Animatic, AnimaticFrame};
pub use archive::{ArchiveExporter, archive_file_name, write_archive};
pub use manifest::SceneManifest;
pub use storyboard_error::{ExportError, ExportErrorKind};
