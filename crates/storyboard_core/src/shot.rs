//! Shots and their generation lifecycle.
//!
//! A [`Shot`] owns its status and image; the only way to change either is
//! through the lifecycle methods below. They enforce that a shot in
//! `Success` always carries an image and that editing the prompt discards
//! any image rendered from the old prompt.

use crate::{ImagePayload, ShotDraft};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Playback duration used when a backend supplies a non-positive value.
pub const DEFAULT_SHOT_DURATION_SECS: f64 = 2.0;

/// Identifier of a shot, e.g. `shot_3`.
///
/// Unique within a session and referenced by narrative markers.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ShotId(String);

impl ShotId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShotId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for ShotId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Image generation status of a shot.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum ShotStatus {
    /// No image yet, or the previous one was discarded
    #[default]
    #[display("pending")]
    Pending,
    /// A request is in flight
    #[display("generating")]
    Generating,
    /// An image for the current prompt is attached
    #[display("success")]
    Success,
    /// The last request failed
    #[display("failed")]
    Failed,
}

impl ShotStatus {
    /// True for `Success` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, ShotStatus::Success | ShotStatus::Failed)
    }
}

/// Proof that a generation request was started for a shot.
///
/// Records the prompt revision at start time. A completion presented with
/// a ticket whose revision no longer matches is stale and its image is
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GenerationTicket {
    shot_id: ShotId,
    revision: u64,
}

/// What happened when a completion was presented to a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The result was recorded
    Applied,
    /// The prompt changed while generating; the shot went back to `Pending`
    Stale,
    /// The shot was not waiting for this ticket
    Ignored,
}

/// One planned camera shot.
///
/// # Examples
///
/// ```
/// use storyboard_core::{ImagePayload, Shot, ShotDraftBuilder, ShotStatus};
///
/// let draft = ShotDraftBuilder::default()
///     .id("shot_1")
///     .title("Rooftop")
///     .shot_type("Wide")
///     .duration(3.0)
///     .camera_notes("Slow push in")
///     .short_prompt("Two figures on a rooftop at dusk")
///     .build()
///     .unwrap();
/// let mut shot = Shot::from_draft(draft);
///
/// let ticket = shot.begin_generation().unwrap();
/// assert_eq!(shot.status(), &ShotStatus::Generating);
///
/// let image = ImagePayload::new("image/png", vec![1, 2, 3]).unwrap();
/// shot.complete_generation(&ticket, image);
/// assert_eq!(shot.status(), &ShotStatus::Success);
/// assert!(shot.image().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct Shot {
    /// Stable identifier
    id: ShotId,
    /// Short label
    title: String,
    /// Framing, e.g. "Wide Shot" or "Close-Up"
    shot_type: String,
    /// Playback duration in seconds
    duration_seconds: f64,
    /// Direction for camera movement or angle
    camera_notes: String,
    /// Text prompt for the image backend
    prompt: String,
    /// Rendered image, present exactly when `status` is `Success`
    /// (it may linger while a regeneration is in flight)
    #[serde(skip)]
    image: Option<ImagePayload>,
    /// Lifecycle status
    status: ShotStatus,
    #[serde(skip)]
    #[getter(skip)]
    prompt_revision: u64,
}

impl Shot {
    /// Build a pending shot from a backend draft.
    ///
    /// Non-positive or non-finite durations fall back to
    /// [`DEFAULT_SHOT_DURATION_SECS`].
    pub fn from_draft(draft: ShotDraft) -> Self {
        let duration_seconds = if draft.duration.is_finite() && draft.duration > 0.0 {
            draft.duration
        } else {
            DEFAULT_SHOT_DURATION_SECS
        };
        Self {
            id: ShotId::new(draft.id),
            title: draft.title,
            shot_type: draft.shot_type,
            duration_seconds,
            camera_notes: draft.camera_notes,
            prompt: draft.short_prompt,
            image: None,
            status: ShotStatus::Pending,
            prompt_revision: 0,
        }
    }

    /// The draft form of this shot, as written into manifests.
    pub fn to_draft(&self) -> ShotDraft {
        ShotDraft {
            id: self.id.to_string(),
            title: self.title.clone(),
            shot_type: self.shot_type.clone(),
            duration: self.duration_seconds,
            camera_notes: self.camera_notes.clone(),
            short_prompt: self.prompt.clone(),
        }
    }

    /// Move to `Generating`.
    ///
    /// Returns `None` and leaves the shot untouched when a request is
    /// already in flight.
    pub fn begin_generation(&mut self) -> Option<GenerationTicket> {
        if self.status == ShotStatus::Generating {
            return None;
        }
        self.status = ShotStatus::Generating;
        Some(GenerationTicket {
            shot_id: self.id.clone(),
            revision: self.prompt_revision,
        })
    }

    /// Record a generated image.
    pub fn complete_generation(
        &mut self,
        ticket: &GenerationTicket,
        image: ImagePayload,
    ) -> CompletionOutcome {
        match self.check_ticket(ticket) {
            CompletionOutcome::Applied => {
                self.image = Some(image);
                self.status = ShotStatus::Success;
                CompletionOutcome::Applied
            }
            other => other,
        }
    }

    /// Record a failed generation. Any previous image is dropped.
    pub fn fail_generation(&mut self, ticket: &GenerationTicket) -> CompletionOutcome {
        match self.check_ticket(ticket) {
            CompletionOutcome::Applied => {
                self.image = None;
                self.status = ShotStatus::Failed;
                CompletionOutcome::Applied
            }
            other => other,
        }
    }

    /// Replace the prompt.
    ///
    /// The image is always discarded. `Success` and `Failed` shots return
    /// to `Pending`; a shot that is `Generating` stays so, but the in-flight
    /// result will be treated as stale.
    pub fn edit_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
        self.prompt_revision += 1;
        self.image = None;
        if self.status.is_terminal() {
            self.status = ShotStatus::Pending;
        }
    }

    fn check_ticket(&mut self, ticket: &GenerationTicket) -> CompletionOutcome {
        if ticket.shot_id != self.id || self.status != ShotStatus::Generating {
            return CompletionOutcome::Ignored;
        }
        if ticket.revision != self.prompt_revision {
            self.image = None;
            self.status = ShotStatus::Pending;
            return CompletionOutcome::Stale;
        }
        CompletionOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(id: &str) -> Shot {
        Shot::from_draft(ShotDraft {
            id: id.to_string(),
            title: "Title".to_string(),
            shot_type: "Wide Shot".to_string(),
            duration: 3.0,
            camera_notes: String::new(),
            short_prompt: "a prompt".to_string(),
        })
    }

    fn png() -> ImagePayload {
        ImagePayload::new("image/png", vec![7; 8]).unwrap()
    }

    #[test]
    fn second_begin_is_refused() {
        let mut s = shot("shot_1");
        assert!(s.begin_generation().is_some());
        assert!(s.begin_generation().is_none());
        assert_eq!(s.status, ShotStatus::Generating);
    }

    #[test]
    fn failure_clears_previous_image() {
        let mut s = shot("shot_1");
        let t = s.begin_generation().unwrap();
        s.complete_generation(&t, png());
        let t = s.begin_generation().unwrap();
        assert!(s.image.is_some());
        assert_eq!(s.fail_generation(&t), CompletionOutcome::Applied);
        assert_eq!(s.status, ShotStatus::Failed);
        assert!(s.image.is_none());
    }

    #[test]
    fn edit_while_generating_makes_completion_stale() {
        let mut s = shot("shot_1");
        let t = s.begin_generation().unwrap();
        s.edit_prompt("new prompt");
        assert_eq!(s.status, ShotStatus::Generating);
        assert_eq!(s.complete_generation(&t, png()), CompletionOutcome::Stale);
        assert_eq!(s.status, ShotStatus::Pending);
        assert!(s.image.is_none());
    }

    #[test]
    fn ticket_for_other_shot_is_ignored() {
        let mut a = shot("shot_1");
        let mut b = shot("shot_2");
        let ta = a.begin_generation().unwrap();
        b.begin_generation().unwrap();
        assert_eq!(b.complete_generation(&ta, png()), CompletionOutcome::Ignored);
        assert_eq!(b.status, ShotStatus::Generating);
    }

    #[test]
    fn completion_without_begin_is_ignored() {
        let mut s = shot("shot_1");
        let t = s.begin_generation().unwrap();
        s.fail_generation(&t);
        assert_eq!(s.complete_generation(&t, png()), CompletionOutcome::Ignored);
        assert_eq!(s.status, ShotStatus::Failed);
    }

    #[test]
    fn nonpositive_duration_falls_back() {
        let mut draft = shot("shot_1").to_draft();
        draft.duration = 0.0;
        assert_eq!(
            Shot::from_draft(draft).duration_seconds,
            DEFAULT_SHOT_DURATION_SECS
        );
    }
}
