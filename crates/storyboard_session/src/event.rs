//! Events that drive the scene session.

use storyboard_core::{GenerationTicket, ImagePayload, SceneConfig, Shot, ShotId};

/// A single change request to a [`SceneSession`](crate::SceneSession).
///
/// Events are applied in order; each is either accepted (and changes the
/// session) or rejected (and changes nothing).
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
pub enum SessionEvent {
    /// A scene was submitted and the shotlist backend is being asked
    ComposeStarted,
    /// The submitted scene was rejected before any backend call
    ValidationFailed {
        /// User-facing reason
        message: String,
    },
    /// A story and shotlist are available, from the backend or the demo
    StoryAcquired {
        /// The submitted scene
        config: SceneConfig,
        /// Marker-annotated story
        story: String,
        /// Pending shots in story order
        shots: Vec<Shot>,
    },
    /// The shotlist backend failed
    StoryFailed {
        /// User-facing reason
        message: String,
    },
    /// A shot's prompt was replaced
    PromptEdited {
        /// Target shot
        shot_id: ShotId,
        /// New prompt text
        prompt: String,
    },
    /// An image request for a shot is about to be issued
    GenerationStarted {
        /// Target shot
        shot_id: ShotId,
    },
    /// An image request returned an image
    GenerationSucceeded {
        /// Ticket issued when the request started
        ticket: GenerationTicket,
        /// The rendered image
        image: ImagePayload,
    },
    /// An image request failed
    GenerationFailed {
        /// Ticket issued when the request started
        ticket: GenerationTicket,
        /// User-facing reason, already naming the shot
        message: String,
    },
    /// A batch run over `total` shots began
    BatchStarted {
        /// Size of the worklist
        total: usize,
    },
    /// A batch run finished `completed` of `total` shots
    BatchProgressed {
        /// Shots done so far
        completed: usize,
        /// Size of the worklist
        total: usize,
    },
    /// A batch run ended
    BatchFinished,
    /// The user dismissed the error banner
    ErrorDismissed,
    /// Everything was reset to a blank compose step
    Restarted,
}

impl SessionEvent {
    /// Variant name, for logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
