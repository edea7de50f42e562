//! Tests for archive export.

use std::io::Read;
use storyboard_core::{ImagePayload, ShotId};
use storyboard_error::{ExportErrorKind, StoryboardErrorKind};
use storyboard_export::{Animatic, ArchiveExporter, SceneManifest, archive_file_name};
use storyboard_narrative::demo_preset;
use storyboard_session::{SceneSession, SessionEvent};
use tempfile::TempDir;

fn demo_session() -> SceneSession {
    let (config, story, shots) = demo_preset().dissolve();
    let mut session = SceneSession::new();
    assert!(session.apply(&SessionEvent::StoryAcquired {
        config,
        story,
        shots,
    }));
    session
}

fn render(session: &mut SceneSession, id: &str, bytes: Vec<u8>) {
    let ticket = session
        .begin_generation(&ShotId::new(id))
        .expect("shot can start generating");
    let image = ImagePayload::new("image/png", bytes).expect("non-empty image");
    assert!(session.apply(&SessionEvent::GenerationSucceeded { ticket, image }));
}

fn fail(session: &mut SceneSession, id: &str) {
    let ticket = session
        .begin_generation(&ShotId::new(id))
        .expect("shot can start generating");
    assert!(session.apply(&SessionEvent::GenerationFailed {
        ticket,
        message: format!("Error for \"{}\": blocked", id),
    }));
}

#[tokio::test]
async fn test_export_refused_while_shots_pending() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let exporter = ArchiveExporter::new(temp_dir.path())?;
    let mut session = demo_session();
    render(&mut session, "shot_1", vec![1, 2, 3]);

    let err = exporter.export(&session).await.unwrap_err();
    match err.kind() {
        StoryboardErrorKind::Export(e) => {
            assert!(matches!(
                &e.kind,
                ExportErrorKind::NotReady(reason) if reason.contains("4 of 5")
            ))
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_export_writes_manifest_and_rendered_images() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let exporter = ArchiveExporter::new(temp_dir.path().join("out"))?;
    let mut session = demo_session();
    for id in ["shot_1", "shot_2", "shot_4", "shot_5"] {
        render(&mut session, id, id.as_bytes().to_vec());
    }
    fail(&mut session, "shot_3");
    assert!(session.can_export());

    let path = exporter.export(&session).await?;

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some(archive_file_name(session.config().as_ref().unwrap().seed()).as_str())
    );
    assert!(
        path.to_string_lossy()
            .ends_with("StoryDirector_a_spy_and_a_wizard_have_a_tense_meeting_on_a_rooftop_at_dusk.zip")
    );

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&path)?)?;
    let mut manifest_json = String::new();
    archive
        .by_name("manifest.json")?
        .read_to_string(&mut manifest_json)?;
    let manifest: SceneManifest = serde_json::from_str(&manifest_json)?;
    assert_eq!(manifest.shots().len(), 5);
    assert_eq!(manifest.scene(), session.config().as_ref().unwrap().seed());

    let mut image = Vec::new();
    archive.by_name("images/shot_4.png")?.read_to_end(&mut image)?;
    assert_eq!(image, b"shot_4");
    assert!(archive.by_name("images/shot_3.png").is_err());
    Ok(())
}

#[tokio::test]
async fn test_existing_archive_kept_without_overwrite() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut session = demo_session();
    for id in ["shot_1", "shot_2", "shot_3", "shot_4", "shot_5"] {
        render(&mut session, id, vec![7]);
    }

    let first = ArchiveExporter::new(temp_dir.path())?.export(&session).await?;
    let again = ArchiveExporter::new(temp_dir.path())?
        .with_overwrite(false)
        .export(&session)
        .await;

    assert!(again.is_err());
    assert!(first.exists());
    Ok(())
}

#[test]
fn test_animatic_follows_demo_durations() {
    let mut session = demo_session();
    render(&mut session, "shot_1", vec![1]);
    render(&mut session, "shot_3", vec![3]);

    let animatic = Animatic::from_shots(session.shots());

    assert_eq!(animatic.len(), 2);
    assert_eq!(
        animatic.total_duration(),
        std::time::Duration::from_secs(5)
    );
    let frame = animatic
        .frame_at(std::time::Duration::from_millis(3500))
        .expect("second frame on screen");
    assert_eq!(frame.shot_id().as_str(), "shot_3");
}
