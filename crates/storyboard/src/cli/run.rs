//! The `compose` and `demo` commands.

use crate::cli::OutputArgs;
use crate::cli::printer::{ProgressPrinter, print_report, print_shots, print_story};
use futures_util::future::try_join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storyboard::{
    ArchiveExporter, AspectRatio, Director, GeminiClient, Mood, Observers, Quality,
    ReferenceImage, SceneConfig, SceneSession, StoryboardConfig, StoryboardResult,
    TracingObserver, ValidationError, ValidationErrorKind, load_demo,
};

/// Scene settings collected from the command line.
#[derive(Debug, Clone)]
pub struct ComposeArgs {
    /// Scene idea
    pub seed: String,
    /// Visual mood
    pub mood: Mood,
    /// Frame shape
    pub aspect: AspectRatio,
    /// Rendering quality hint
    pub quality: Quality,
    /// Continuity constraints
    pub continuity: String,
    /// Anchor image files
    pub references: Vec<PathBuf>,
}

type GeminiDirector = Director<GeminiClient, GeminiClient>;

fn build_director(config: &StoryboardConfig) -> StoryboardResult<GeminiDirector> {
    let client = GeminiClient::new(&config.gemini)?;
    Ok(Director::new(client.clone(), client)
        .with_shot_timeout(config.generation.shot_timeout())
        .with_observer(Arc::new(TracingObserver))
        .with_observer(Arc::new(ProgressPrinter)))
}

/// Compose a scene with the Gemini backend, then optionally render and
/// export it.
#[tracing::instrument(skip_all, fields(references = args.references.len()))]
pub async fn run_compose(
    args: ComposeArgs,
    output: &OutputArgs,
    config: &StoryboardConfig,
) -> StoryboardResult<()> {
    let references = load_references(&args.references).await?;
    let scene = SceneConfig::new(
        args.seed,
        references,
        args.mood,
        args.aspect,
        args.quality,
        args.continuity,
    );

    let director = build_director(config)?;
    let mut session = SceneSession::new();
    println!("Writing the story...");
    director.compose(&mut session, scene).await?;

    print_story(&session);
    print_shots(&session);
    finish(&director, &mut session, output, config).await
}

/// Load the demo scene; rendering it needs the Gemini backend.
pub async fn run_demo(output: &OutputArgs, config: &StoryboardConfig) -> StoryboardResult<()> {
    let mut session = SceneSession::new();

    if !output.generate {
        let mut observers = Observers::new();
        observers.push(Arc::new(TracingObserver));
        observers.push(Arc::new(ProgressPrinter));
        load_demo(&observers, &mut session);
        print_story(&session);
        print_shots(&session);
        return Ok(());
    }

    let director = build_director(config)?;
    director.load_demo(&mut session);
    print_story(&session);
    print_shots(&session);
    finish(&director, &mut session, output, config).await
}

async fn finish(
    director: &GeminiDirector,
    session: &mut SceneSession,
    output: &OutputArgs,
    config: &StoryboardConfig,
) -> StoryboardResult<()> {
    if !output.generate {
        return Ok(());
    }

    println!("Rendering {} shots...", session.shots().len());
    if let Some(report) = director.generate_all(session).await {
        print_report(&report, session);
    }
    print_shots(session);

    if output.export {
        let dir = output
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.export.output_dir));
        let path = ArchiveExporter::new(dir)?.export(session).await?;
        println!("Archive written to {}", path.display());
    }
    Ok(())
}

async fn load_references(paths: &[PathBuf]) -> StoryboardResult<Vec<ReferenceImage>> {
    let images = try_join_all(paths.iter().map(|path| load_reference(path))).await?;
    Ok(images)
}

async fn load_reference(path: &Path) -> Result<ReferenceImage, ValidationError> {
    let invalid = |reason: String| {
        ValidationError::new(ValidationErrorKind::InvalidField {
            field: "reference".to_string(),
            reason,
        })
    };

    let mime_type = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => return Err(invalid(format!("{}: unsupported image type", path.display()))),
    };

    let data = tokio::fs::read(path)
        .await
        .map_err(|e| invalid(format!("{}: {}", path.display(), e)))?;
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("reference")
        .to_string();

    tracing::debug!(%id, bytes = data.len(), "Loaded reference image");
    Ok(ReferenceImage::new(id, mime_type, data))
}
