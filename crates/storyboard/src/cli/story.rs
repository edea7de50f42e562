//! The `story` command.

use std::path::Path;
use storyboard::{ExportError, ExportErrorKind, StoryboardResult, link_narrative};

/// Print the segments of a marker-annotated story file.
pub async fn print_story_file(path: &Path) -> StoryboardResult<()> {
    let story = tokio::fs::read_to_string(path).await.map_err(|e| {
        ExportError::new(ExportErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    let segments = link_narrative(&story);
    tracing::debug!(segments = segments.len(), "Story linked");

    for (i, segment) in segments.iter().enumerate() {
        let label = segment
            .shot_ref()
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:>3}  {:<8} {}", i + 1, label, segment.text());
    }
    Ok(())
}
