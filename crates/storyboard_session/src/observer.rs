//! Observation of applied session events.

use crate::{SceneSession, SessionEvent};
use std::sync::Arc;
use tracing::info;

/// Receives every event the session accepted, after it was applied.
///
/// Observers only read; they cannot change the session.
pub trait SessionObserver: Send + Sync {
    /// Called once per accepted event.
    fn on_event(&self, event: &SessionEvent, session: &SceneSession);
}

/// An ordered list of observers.
#[derive(Clone, Default)]
pub struct Observers(Vec<Arc<dyn SessionObserver>>);

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.0.len())
            .finish()
    }
}

impl Observers {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer.
    pub fn push(&mut self, observer: Arc<dyn SessionObserver>) {
        self.0.push(observer);
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tell every observer about an already applied event.
    pub fn notify(&self, event: &SessionEvent, session: &SceneSession) {
        for observer in &self.0 {
            observer.on_event(event, session);
        }
    }

    /// Apply `event` and notify observers if it was accepted.
    pub fn dispatch(&self, session: &mut SceneSession, event: SessionEvent) -> bool {
        let accepted = session.apply(&event);
        if accepted {
            self.notify(&event, session);
        }
        accepted
    }
}

/// Logs progress and failures through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn on_event(&self, event: &SessionEvent, session: &SceneSession) {
        match event {
            SessionEvent::BatchProgressed { completed, total } => {
                info!(completed, total, progress = session.progress(), "Batch progress");
            }
            SessionEvent::GenerationFailed { message, .. } => {
                info!(%message, "Shot failed");
            }
            SessionEvent::StoryAcquired { shots, .. } => {
                info!(shots = shots.len(), "Story ready");
            }
            other => {
                tracing::debug!(event = other.name(), phase = %session.phase(), "Session updated");
            }
        }
    }
}
