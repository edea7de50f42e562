//! Single-shot image generation.

use crate::{Observers, SceneSession, SessionEvent, SessionObserver};
use std::sync::Arc;
use std::time::Duration;
use storyboard_core::{ImagePayload, ImageRequest, ShotId, ShotStatus};
use storyboard_error::{GenerationError, GenerationErrorKind};
use storyboard_interface::ImageBackend;
use tracing::{debug, instrument, warn};

/// Result of one generation attempt that actually ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The shot now holds an image
    Succeeded,
    /// The shot is `Failed`; `message` was put on the error banner
    Failed {
        /// Banner text naming the shot
        message: String,
        /// Underlying failure
        kind: GenerationErrorKind,
    },
    /// The prompt changed while the request was in flight; the result was
    /// discarded and the shot is `Pending` again
    Stale,
}

/// Renders one shot at a time through an [`ImageBackend`].
pub struct ShotGenerator<I: ImageBackend> {
    backend: I,
    timeout: Option<Duration>,
    observers: Observers,
}

impl<I: ImageBackend> std::fmt::Debug for ShotGenerator<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShotGenerator")
            .field("provider", &self.backend.provider_name())
            .field("timeout", &self.timeout)
            .field("observers", &self.observers)
            .finish()
    }
}

impl<I: ImageBackend> ShotGenerator<I> {
    /// Create a generator without a timeout or observers.
    pub fn new(backend: I) -> Self {
        Self {
            backend,
            timeout: None,
            observers: Observers::new(),
        }
    }

    /// Fail a shot whose request has not resolved after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add an observer for the events this generator applies.
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub(crate) fn add_observer(&mut self, observer: Arc<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Observers notified of applied events.
    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    /// The image backend.
    pub fn backend(&self) -> &I {
        &self.backend
    }

    /// Generate the image for one shot.
    ///
    /// Returns `None` without touching the session when no scene is
    /// composed, the shot does not exist, or it is already generating.
    /// Otherwise the shot is marked `Generating` before the backend is
    /// called and exactly one completion is applied afterwards.
    #[instrument(
        skip(self, session),
        fields(shot_id = %shot_id, provider = self.backend.provider_name())
    )]
    pub async fn generate(
        &self,
        session: &mut SceneSession,
        shot_id: &ShotId,
    ) -> Option<ShotOutcome> {
        let (request, title) = {
            let config = session.config().as_ref()?;
            let shot = session.shot(shot_id)?;
            (ImageRequest::for_shot(shot, config), shot.title().clone())
        };

        let ticket = session.begin_generation(shot_id)?;
        self.observers.notify(
            &SessionEvent::GenerationStarted {
                shot_id: shot_id.clone(),
            },
            session,
        );

        match self.request_image(&request).await {
            Ok(image) => {
                debug!(bytes = image.len(), "Shot image received");
                let event = SessionEvent::GenerationSucceeded { ticket, image };
                let stale = self.complete(session, event, shot_id);
                Some(if stale {
                    ShotOutcome::Stale
                } else {
                    ShotOutcome::Succeeded
                })
            }
            Err(e) => {
                let message = format!("Error for \"{}\": {}", title, e.user_message());
                warn!(error = %e, "Shot generation failed");
                let event = SessionEvent::GenerationFailed {
                    ticket,
                    message: message.clone(),
                };
                let stale = self.complete(session, event, shot_id);
                Some(if stale {
                    ShotOutcome::Stale
                } else {
                    ShotOutcome::Failed {
                        message,
                        kind: e.kind,
                    }
                })
            }
        }
    }

    async fn request_image(
        &self,
        request: &ImageRequest,
    ) -> Result<ImagePayload, GenerationError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.backend.generate_image(request))
                .await
                .unwrap_or_else(|_| {
                    Err(GenerationError::new(GenerationErrorKind::Timeout(
                        limit.as_secs(),
                    )))
                }),
            None => self.backend.generate_image(request).await,
        }
    }

    /// Apply a completion. Returns true when it turned out stale.
    fn complete(&self, session: &mut SceneSession, event: SessionEvent, shot_id: &ShotId) -> bool {
        self.observers.dispatch(session, event);
        session
            .shot(shot_id)
            .is_some_and(|shot| shot.status() == &ShotStatus::Pending)
    }
}
