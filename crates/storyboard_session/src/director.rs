//! User-facing actions over a scene session.

use crate::{
    BatchReport, BatchRun, Observers, SceneSession, SessionEvent, SessionObserver, ShotGenerator,
    ShotOutcome,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use storyboard_core::{SceneConfig, SessionPhase, ShotId, ShotlistRequest};
use storyboard_error::StoryboardResult;
use storyboard_interface::{ImageBackend, ShotlistBackend};
use storyboard_narrative::{demo_preset, marker_ids};
use tracing::{info, instrument, warn};

/// Banner text shown when the story and shotlist could not be produced.
pub const STORY_FAILURE_MESSAGE: &str = "Failed to generate story and shotlist. \
The AI model might be busy or the prompt could not be processed.";

/// Owns the text and image backends and drives a [`SceneSession`].
///
/// Every action takes the session by `&mut`, so a session has exactly one
/// driver at a time. Actions whose preconditions do not hold leave the
/// session untouched.
pub struct Director<S: ShotlistBackend, I: ImageBackend> {
    shotlist: S,
    generator: ShotGenerator<I>,
}

impl<S: ShotlistBackend, I: ImageBackend> std::fmt::Debug for Director<S, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Director")
            .field("shotlist", &self.shotlist.provider_name())
            .field("generator", &self.generator)
            .finish()
    }
}

impl<S: ShotlistBackend, I: ImageBackend> Director<S, I> {
    /// Create a director from a text backend and an image backend.
    pub fn new(shotlist: S, images: I) -> Self {
        Self {
            shotlist,
            generator: ShotGenerator::new(images),
        }
    }

    /// Fail shots whose image request takes longer than `timeout`.
    pub fn with_shot_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.generator = self.generator.with_timeout(timeout);
        self
    }

    /// Register an observer for every event the director applies.
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.generator.add_observer(observer);
        self
    }

    /// The single-shot generator.
    pub fn generator(&self) -> &ShotGenerator<I> {
        &self.generator
    }

    fn dispatch(&self, session: &mut SceneSession, event: SessionEvent) -> bool {
        self.generator.observers().dispatch(session, event)
    }

    /// Generate the story and shotlist for `config` and move to the story
    /// phase.
    ///
    /// Does nothing outside the compose phase or while a request is already
    /// loading.
    ///
    /// # Errors
    ///
    /// A validation error when the seed is blank or too many anchors are
    /// attached; the backend is not called. A generation error when the
    /// backend fails; the session banner then shows
    /// [`STORY_FAILURE_MESSAGE`] and the phase stays `Compose`.
    #[instrument(skip_all, fields(provider = self.shotlist.provider_name(), mood = %config.mood()))]
    pub async fn compose(
        &self,
        session: &mut SceneSession,
        config: SceneConfig,
    ) -> StoryboardResult<()> {
        if session.phase() != &SessionPhase::Compose || *session.loading() {
            return Ok(());
        }

        if let Err(e) = config.validate() {
            warn!(error = %e, "Scene rejected");
            self.dispatch(
                session,
                SessionEvent::ValidationFailed {
                    message: e.kind().to_string(),
                },
            );
            return Err(e.into());
        }

        self.dispatch(session, SessionEvent::ComposeStarted);

        let request = ShotlistRequest::from(&config);
        match self.shotlist.generate_shotlist(&request).await {
            Ok(document) => {
                let (story, shots) = document.into_shots();
                check_markers(&story, shots.iter().map(|s| s.id()));
                info!(shots = shots.len(), "Story generated");
                self.dispatch(
                    session,
                    SessionEvent::StoryAcquired {
                        config,
                        story,
                        shots,
                    },
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Story generation failed");
                self.dispatch(
                    session,
                    SessionEvent::StoryFailed {
                        message: STORY_FAILURE_MESSAGE.to_string(),
                    },
                );
                Err(e.into())
            }
        }
    }

    /// Load the built-in rooftop scene without calling any backend.
    ///
    /// Returns false outside the compose phase.
    pub fn load_demo(&self, session: &mut SceneSession) -> bool {
        load_demo(self.generator.observers(), session)
    }

    /// Replace a shot's prompt. Its image is dropped and it becomes
    /// `Pending`.
    pub fn edit_prompt(
        &self,
        session: &mut SceneSession,
        shot_id: &ShotId,
        prompt: impl Into<String>,
    ) -> bool {
        self.dispatch(
            session,
            SessionEvent::PromptEdited {
                shot_id: shot_id.clone(),
                prompt: prompt.into(),
            },
        )
    }

    /// Generate one shot. Refused while a batch is running.
    pub async fn generate_shot(
        &self,
        session: &mut SceneSession,
        shot_id: &ShotId,
    ) -> Option<ShotOutcome> {
        if *session.batch_running() {
            return None;
        }
        self.generator.generate(session, shot_id).await
    }

    /// Generate every shot that does not have an image yet.
    pub async fn generate_all(&self, session: &mut SceneSession) -> Option<BatchReport> {
        BatchRun::plan(session).run(&self.generator, session).await
    }

    /// Clear the error banner.
    pub fn dismiss_error(&self, session: &mut SceneSession) -> bool {
        self.dispatch(session, SessionEvent::ErrorDismissed)
    }

    /// Throw the scene away and return to the compose phase.
    pub fn restart(&self, session: &mut SceneSession) {
        self.dispatch(session, SessionEvent::Restarted);
    }
}

/// Load the built-in rooftop scene and notify `observers`.
///
/// Needs no backend, so a caller that only wants to show the demo does not
/// have to build a [`Director`]. Returns false outside the compose phase or
/// while a story request is loading.
#[instrument(skip_all)]
pub fn load_demo(observers: &Observers, session: &mut SceneSession) -> bool {
    if session.phase() != &SessionPhase::Compose || *session.loading() {
        return false;
    }
    let (config, story, shots) = demo_preset().dissolve();
    observers.dispatch(
        session,
        SessionEvent::StoryAcquired {
            config,
            story,
            shots,
        },
    )
}

/// Log shot ids the story and shotlist disagree on.
fn check_markers<'a>(story: &str, ids: impl Iterator<Item = &'a ShotId>) {
    let mut known = HashSet::new();
    for id in ids {
        if !known.insert(id) {
            warn!(shot_id = %id, "Duplicate shot id in shotlist");
        }
    }
    for marker in marker_ids(story) {
        if !known.contains(&marker) {
            warn!(shot_id = %marker, "Story references an unknown shot");
        }
    }
}
