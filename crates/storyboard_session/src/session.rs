//! The scene session aggregate and its reducer.

use crate::SessionEvent;
use derive_getters::Getters;
use storyboard_core::{
    CompletionOutcome, GenerationTicket, NarrativeSegment, SceneConfig, SessionPhase, Shot,
    ShotId, ShotStatus,
};
use storyboard_narrative::link_narrative;
use tracing::debug;

/// One storyboard in progress.
///
/// Fields are read through getters; the only way to change them is
/// [`apply`](Self::apply).
///
/// # Examples
///
/// ```
/// use storyboard_core::SessionPhase;
/// use storyboard_session::{SceneSession, SessionEvent};
///
/// let mut session = SceneSession::new();
/// assert_eq!(session.phase(), &SessionPhase::Compose);
///
/// assert!(session.apply(&SessionEvent::ValidationFailed {
///     message: "Please enter a scene idea to get started.".to_string(),
/// }));
/// assert!(session.error().is_some());
///
/// assert!(session.apply(&SessionEvent::ErrorDismissed));
/// assert!(session.error().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Getters)]
pub struct SceneSession {
    /// Current macro phase
    phase: SessionPhase,
    /// Submitted scene, absent until a story is acquired
    config: Option<SceneConfig>,
    /// Marker-annotated story
    story: String,
    /// Shots in story order
    shots: Vec<Shot>,
    /// The single error banner
    error: Option<String>,
    /// Waiting on the shotlist backend
    loading: bool,
    /// A batch run is in progress
    batch_running: bool,
    /// Batch progress in percent
    progress: f64,
}

impl SceneSession {
    /// A blank session at the compose step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a shot by id.
    pub fn shot(&self, id: &ShotId) -> Option<&Shot> {
        self.shots.iter().find(|shot| shot.id() == id)
    }

    /// The current story split into shot-labelled segments.
    pub fn narrative(&self) -> Vec<NarrativeSegment> {
        link_narrative(&self.story)
    }

    /// True when every shot has finished (successfully or not) and no batch
    /// is running.
    pub fn can_export(&self) -> bool {
        !self.batch_running
            && !self.shots.is_empty()
            && self.shots.iter().all(|shot| shot.status().is_terminal())
    }

    /// Number of shots in each status, as `(pending, generating, success, failed)`.
    pub fn status_counts(&self) -> (usize, usize, usize, usize) {
        self.shots
            .iter()
            .fold((0, 0, 0, 0), |(p, g, s, f), shot| match shot.status() {
                ShotStatus::Pending => (p + 1, g, s, f),
                ShotStatus::Generating => (p, g + 1, s, f),
                ShotStatus::Success => (p, g, s + 1, f),
                ShotStatus::Failed => (p, g, s, f + 1),
            })
    }

    /// Apply `GenerationStarted` for `shot_id` and hand back the ticket the
    /// completion must present.
    ///
    /// Clears the error banner unless a batch is running. Returns `None`
    /// (and changes nothing) when no scene is composed, the shot does not
    /// exist, or it is already generating.
    pub fn begin_generation(&mut self, shot_id: &ShotId) -> Option<GenerationTicket> {
        if self.config.is_none() {
            return None;
        }
        let ticket = self.shot_mut(shot_id)?.begin_generation()?;
        // Inside a batch the banner keeps the latest failure until the run ends.
        if !self.batch_running {
            self.error = None;
        }
        debug!(shot_id = %shot_id, "Shot generating");
        Some(ticket)
    }

    /// Apply an event. Returns whether it was accepted.
    pub fn apply(&mut self, event: &SessionEvent) -> bool {
        let accepted = match event {
            SessionEvent::ComposeStarted => {
                if self.phase != SessionPhase::Compose || self.loading {
                    false
                } else {
                    self.loading = true;
                    self.error = None;
                    true
                }
            }
            SessionEvent::ValidationFailed { message } | SessionEvent::StoryFailed { message } => {
                self.loading = false;
                self.error = Some(message.clone());
                true
            }
            SessionEvent::StoryAcquired {
                config,
                story,
                shots,
            } => {
                if self.phase != SessionPhase::Compose {
                    false
                } else {
                    self.phase = SessionPhase::Story;
                    self.config = Some(config.clone());
                    self.story = story.clone();
                    self.shots = shots.clone();
                    self.error = None;
                    self.loading = false;
                    self.batch_running = false;
                    self.progress = 0.0;
                    true
                }
            }
            SessionEvent::PromptEdited { shot_id, prompt } => {
                if self.phase < SessionPhase::Story || self.batch_running {
                    false
                } else if let Some(shot) = self.shot_mut(shot_id) {
                    shot.edit_prompt(prompt.clone());
                    true
                } else {
                    false
                }
            }
            SessionEvent::GenerationStarted { shot_id } => self.begin_generation(shot_id).is_some(),
            SessionEvent::GenerationSucceeded { ticket, image } => {
                match self.shot_mut(ticket.shot_id()) {
                    Some(shot) => {
                        let outcome = shot.complete_generation(ticket, image.clone());
                        self.settle(outcome)
                    }
                    None => false,
                }
            }
            SessionEvent::GenerationFailed { ticket, message } => {
                match self.shot_mut(ticket.shot_id()) {
                    Some(shot) => {
                        let outcome = shot.fail_generation(ticket);
                        if outcome == CompletionOutcome::Applied {
                            self.error = Some(message.clone());
                        }
                        self.settle(outcome)
                    }
                    None => false,
                }
            }
            SessionEvent::BatchStarted { .. } => {
                if self.config.is_none() || self.batch_running {
                    false
                } else {
                    self.batch_running = true;
                    self.progress = 0.0;
                    self.error = None;
                    true
                }
            }
            SessionEvent::BatchProgressed { completed, total } => {
                if !self.batch_running {
                    false
                } else {
                    self.progress = percent(*completed, *total);
                    true
                }
            }
            SessionEvent::BatchFinished => {
                if !self.batch_running {
                    false
                } else {
                    self.batch_running = false;
                    self.progress = 100.0;
                    self.phase = self.phase.max(SessionPhase::Generate);
                    true
                }
            }
            SessionEvent::ErrorDismissed => self.error.take().is_some(),
            SessionEvent::Restarted => {
                *self = Self::default();
                true
            }
        };

        debug!(
            event = event.name(),
            accepted,
            phase = %self.phase,
            progress = self.progress,
            "Session event"
        );
        accepted
    }

    fn shot_mut(&mut self, id: &ShotId) -> Option<&mut Shot> {
        self.shots.iter_mut().find(|shot| shot.id() == id)
    }

    /// Outside a batch, a story whose shots have all finished moves on to
    /// the generate phase.
    fn settle(&mut self, outcome: CompletionOutcome) -> bool {
        if outcome == CompletionOutcome::Ignored {
            return false;
        }
        if self.phase == SessionPhase::Story && self.can_export() {
            self.phase = SessionPhase::Generate;
        }
        true
    }
}

/// Pure form of [`SceneSession::apply`].
pub fn transition(mut state: SceneSession, event: &SessionEvent) -> SceneSession {
    state.apply(event);
    state
}

fn percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_core::{ImagePayload, ShotDraft};
    use storyboard_narrative::demo_preset;

    fn story_session() -> SceneSession {
        let (config, story, shots) = demo_preset().dissolve();
        transition(
            SceneSession::new(),
            &SessionEvent::StoryAcquired {
                config,
                story,
                shots,
            },
        )
    }

    fn image() -> ImagePayload {
        ImagePayload::new("image/png", vec![1, 2, 3]).unwrap()
    }

    #[test]
    fn story_acquired_only_from_compose() {
        let mut session = story_session();
        assert_eq!(session.phase, SessionPhase::Story);
        let again = SessionEvent::StoryAcquired {
            config: session.config.clone().unwrap(),
            story: String::new(),
            shots: Vec::new(),
        };
        assert!(!session.apply(&again));
        assert_eq!(session.shots.len(), 5);
    }

    #[test]
    fn prompt_edit_rejected_before_story() {
        let mut session = SceneSession::new();
        assert!(!session.apply(&SessionEvent::PromptEdited {
            shot_id: ShotId::from("shot_1"),
            prompt: "x".to_string(),
        }));
    }

    #[test]
    fn begin_generation_without_config_is_noop() {
        let mut session = SceneSession::new();
        assert!(session.begin_generation(&ShotId::from("shot_1")).is_none());
        assert_eq!(session, SceneSession::new());
    }

    #[test]
    fn generation_started_clears_error() {
        let mut session = story_session();
        session.apply(&SessionEvent::ValidationFailed {
            message: "old".to_string(),
        });
        assert!(session.apply(&SessionEvent::GenerationStarted {
            shot_id: ShotId::from("shot_2"),
        }));
        assert!(session.error.is_none());
        assert_eq!(
            session.shot(&ShotId::from("shot_2")).unwrap().status(),
            &ShotStatus::Generating
        );
    }

    #[test]
    fn batch_keeps_earlier_failure_when_next_shot_starts() {
        let mut session = story_session();
        assert!(session.apply(&SessionEvent::BatchStarted { total: 2 }));
        let ticket = session.begin_generation(&ShotId::from("shot_1")).unwrap();
        assert!(session.apply(&SessionEvent::GenerationFailed {
            ticket,
            message: "Error for \"The Standoff\": quota".to_string(),
        }));

        let ticket = session.begin_generation(&ShotId::from("shot_2")).unwrap();
        assert_eq!(
            session.error.as_deref(),
            Some("Error for \"The Standoff\": quota")
        );
        assert!(session.apply(&SessionEvent::GenerationSucceeded {
            ticket,
            image: image(),
        }));
        assert!(session.apply(&SessionEvent::BatchFinished));
        assert!(session.error.is_some());
    }

    #[test]
    fn last_terminal_shot_outside_batch_advances_phase() {
        let mut session = transition(
            SceneSession::new(),
            &SessionEvent::StoryAcquired {
                config: demo_preset().config().clone(),
                story: "[SHOT:shot_1] Only one.".to_string(),
                shots: vec![Shot::from_draft(ShotDraft {
                    id: "shot_1".to_string(),
                    title: "One".to_string(),
                    shot_type: "Wide".to_string(),
                    duration: 2.0,
                    camera_notes: String::new(),
                    short_prompt: "p".to_string(),
                })],
            },
        );
        let ticket = session.begin_generation(&ShotId::from("shot_1")).unwrap();
        assert!(!session.can_export());
        assert!(session.apply(&SessionEvent::GenerationSucceeded {
            ticket,
            image: image(),
        }));
        assert_eq!(session.phase, SessionPhase::Generate);
        assert!(session.can_export());
    }

    #[test]
    fn batch_progress_requires_running_batch() {
        let mut session = story_session();
        assert!(!session.apply(&SessionEvent::BatchProgressed {
            completed: 1,
            total: 5
        }));
        assert!(session.apply(&SessionEvent::BatchStarted { total: 5 }));
        assert!(!session.apply(&SessionEvent::BatchStarted { total: 5 }));
        assert!(session.apply(&SessionEvent::BatchProgressed {
            completed: 1,
            total: 5
        }));
        assert_eq!(session.progress, 20.0);
        assert!(session.apply(&SessionEvent::BatchFinished));
        assert_eq!(session.progress, 100.0);
        assert_eq!(session.phase, SessionPhase::Generate);
    }

    #[test]
    fn dismissing_without_error_is_rejected() {
        let mut session = SceneSession::new();
        assert!(!session.apply(&SessionEvent::ErrorDismissed));
    }
}
