//! Single-shot generation through the generator and director.

mod test_utils;

use std::time::Duration;
use storyboard_core::{ShotId, ShotStatus};
use storyboard_error::GenerationErrorKind;
use storyboard_session::{Director, SceneSession, ShotGenerator, ShotOutcome};
use test_utils::{
    MockBehavior, MockImageBackend, MockShotlistBackend, test_config, test_document,
};

#[tokio::test]
async fn test_generate_without_scene_does_nothing() {
    let images = MockImageBackend::success();
    let generator = ShotGenerator::new(images.clone());
    let mut session = SceneSession::new();

    let outcome = generator.generate(&mut session, &ShotId::new("shot_1")).await;

    assert!(outcome.is_none());
    assert_eq!(images.call_count(), 0);
    assert_eq!(session, SceneSession::new());
}

#[tokio::test]
async fn test_unknown_shot_does_nothing() -> anyhow::Result<()> {
    let images = MockImageBackend::success();
    let director = Director::new(MockShotlistBackend::success(test_document(2)), images.clone());
    let mut session = SceneSession::new();
    director.compose(&mut session, test_config("Rain on the docks")).await?;
    let before = session.clone();

    let outcome = director
        .generate_shot(&mut session, &ShotId::new("shot_9"))
        .await;

    assert!(outcome.is_none());
    assert_eq!(images.call_count(), 0);
    assert_eq!(session, before);
    Ok(())
}

#[tokio::test]
async fn test_success_stores_image_and_keeps_prompt() -> anyhow::Result<()> {
    let images = MockImageBackend::success();
    let director = Director::new(MockShotlistBackend::success(test_document(2)), images.clone());
    let mut session = SceneSession::new();
    director.compose(&mut session, test_config("Rain on the docks")).await?;

    let id = ShotId::new("shot_1");
    let outcome = director.generate_shot(&mut session, &id).await;

    assert_eq!(outcome, Some(ShotOutcome::Succeeded));
    let shot = session.shot(&id).expect("shot exists");
    assert_eq!(shot.status(), &ShotStatus::Success);
    assert!(shot.image().is_some());
    assert_eq!(shot.prompt(), "A courier crossing bridge number 1");
    assert_eq!(
        session.shot(&ShotId::new("shot_2")).map(|s| *s.status()),
        Some(ShotStatus::Pending)
    );

    let prompts = images.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("1:1 aspect ratio"));
    assert!(prompts[0].contains("red scarf"));
    Ok(())
}

#[tokio::test]
async fn test_failure_names_the_shot() -> anyhow::Result<()> {
    let images = MockImageBackend::failing(GenerationErrorKind::QuotaExceeded);
    let director = Director::new(MockShotlistBackend::success(test_document(1)), images);
    let mut session = SceneSession::new();
    director.compose(&mut session, test_config("Rain on the docks")).await?;

    let id = ShotId::new("shot_1");
    let outcome = director.generate_shot(&mut session, &id).await;

    match outcome {
        Some(ShotOutcome::Failed { message, kind }) => {
            assert_eq!(kind, GenerationErrorKind::QuotaExceeded);
            assert!(message.starts_with("Error for \"Beat 1\": You have exceeded your API quota"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    let shot = session.shot(&id).expect("shot exists");
    assert_eq!(shot.status(), &ShotStatus::Failed);
    assert!(shot.image().is_none());
    assert!(session.error().is_some());
    Ok(())
}

#[tokio::test]
async fn test_retry_after_failure_clears_banner() -> anyhow::Result<()> {
    let images = MockImageBackend::new(MockBehavior::Sequence(vec![
        test_utils::MockResponse::Error(GenerationErrorKind::EmptyResponse),
    ]));
    let director = Director::new(MockShotlistBackend::success(test_document(1)), images);
    let mut session = SceneSession::new();
    director.compose(&mut session, test_config("Rain on the docks")).await?;

    let id = ShotId::new("shot_1");
    director.generate_shot(&mut session, &id).await;
    assert!(session.error().is_some());

    let outcome = director.generate_shot(&mut session, &id).await;
    assert_eq!(outcome, Some(ShotOutcome::Succeeded));
    assert!(session.error().is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stuck_request_times_out() -> anyhow::Result<()> {
    let images = MockImageBackend::new(MockBehavior::Hang);
    let director = Director::new(MockShotlistBackend::success(test_document(1)), images)
        .with_shot_timeout(Some(Duration::from_secs(90)));
    let mut session = SceneSession::new();
    director.compose(&mut session, test_config("Rain on the docks")).await?;

    let id = ShotId::new("shot_1");
    let outcome = director.generate_shot(&mut session, &id).await;

    match outcome {
        Some(ShotOutcome::Failed { kind, .. }) => {
            assert_eq!(kind, GenerationErrorKind::Timeout(90))
        }
        other => panic!("expected timeout, got {:?}", other),
    }
    assert_eq!(
        session.shot(&id).map(|s| *s.status()),
        Some(ShotStatus::Failed)
    );
    Ok(())
}
