//! Sequential generation of every unfinished shot.

use crate::{SceneSession, SessionEvent, ShotGenerator, ShotOutcome};
use derive_getters::Getters;
use storyboard_core::{ShotId, ShotStatus};
use storyboard_interface::ImageBackend;
use tracing::{info, instrument};

/// Summary of a finished batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct BatchReport {
    /// Shots in the worklist
    attempted: usize,
    /// Shots that ended with an image
    succeeded: usize,
    /// Shots that ended `Failed`
    failed: usize,
    /// Banner text of the last failure, in worklist order
    last_error: Option<String>,
}

/// One pass over the shots that still need an image.
///
/// The worklist is fixed when the run is planned; a shot that reaches
/// `Success` during the run is not visited again. Shots are generated one
/// at a time and a failure never stops the run.
///
/// # Examples
///
/// ```
/// use storyboard_narrative::demo_preset;
/// use storyboard_session::{BatchRun, SceneSession, SessionEvent};
///
/// let (config, story, shots) = demo_preset().dissolve();
/// let mut session = SceneSession::new();
/// session.apply(&SessionEvent::StoryAcquired { config, story, shots });
///
/// let run = BatchRun::plan(&session);
/// assert_eq!(run.worklist().len(), 5);
/// assert_eq!(run.progress(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct BatchRun {
    /// Shot ids to generate, in shot order
    worklist: Vec<ShotId>,
    /// Index of the next shot to generate
    current_index: usize,
    /// Shots that succeeded so far
    #[getter(skip)]
    succeeded: usize,
    /// Shots that failed so far
    failures: usize,
    /// Banner text of the most recent failure
    last_error: Option<String>,
}

impl BatchRun {
    /// Snapshot the shots whose status is not `Success`.
    pub fn plan(session: &SceneSession) -> Self {
        let worklist = session
            .shots()
            .iter()
            .filter(|shot| shot.status() != &ShotStatus::Success)
            .map(|shot| shot.id().clone())
            .collect();
        Self {
            worklist,
            current_index: 0,
            succeeded: 0,
            failures: 0,
            last_error: None,
        }
    }

    /// The next shot to generate.
    pub fn next_shot(&self) -> Option<&ShotId> {
        self.worklist.get(self.current_index)
    }

    /// True when every worklist entry has been visited.
    pub fn is_finished(&self) -> bool {
        self.current_index >= self.worklist.len()
    }

    /// Percentage of the worklist visited; 100 for an empty worklist.
    pub fn progress(&self) -> f64 {
        if self.worklist.is_empty() {
            100.0
        } else {
            self.current_index as f64 / self.worklist.len() as f64 * 100.0
        }
    }

    /// Record the outcome for the current shot and move to the next one.
    fn advance(&mut self, outcome: Option<ShotOutcome>) {
        match outcome {
            Some(ShotOutcome::Succeeded) => self.succeeded += 1,
            Some(ShotOutcome::Failed { message, .. }) => {
                self.failures += 1;
                self.last_error = Some(message);
            }
            Some(ShotOutcome::Stale) | None => {}
        }
        self.current_index += 1;
    }

    /// Generate every worklist shot in order, then finish the run.
    ///
    /// Returns `None` without touching the session when no scene is
    /// composed or a batch is already running.
    #[instrument(skip_all, fields(shots = self.worklist.len()))]
    pub async fn run<I: ImageBackend>(
        mut self,
        generator: &ShotGenerator<I>,
        session: &mut SceneSession,
    ) -> Option<BatchReport> {
        let observers = generator.observers();
        let total = self.worklist.len();

        if !observers.dispatch(session, SessionEvent::BatchStarted { total }) {
            return None;
        }
        info!(total, "Batch generation started");

        while let Some(shot_id) = self.next_shot().cloned() {
            let outcome = generator.generate(session, &shot_id).await;
            self.advance(outcome);
            observers.dispatch(
                session,
                SessionEvent::BatchProgressed {
                    completed: self.current_index,
                    total,
                },
            );
        }

        observers.dispatch(session, SessionEvent::BatchFinished);
        info!(
            succeeded = self.succeeded,
            failed = self.failures,
            "Batch generation finished"
        );

        Some(BatchReport {
            attempted: total,
            succeeded: self.succeeded,
            failed: self.failures,
            last_error: self.last_error,
        })
    }
}
