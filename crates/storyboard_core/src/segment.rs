//! Narrative segments produced by the linker.

use crate::{Shot, ShotId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A contiguous span of story prose, optionally bound to a shot.
///
/// Segments hold a shot id rather than a shot, so they stay valid while
/// the shot list changes underneath them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct NarrativeSegment {
    /// Id named by the marker that opened this segment
    shot_ref: Option<ShotId>,
    /// Trimmed prose
    text: String,
}

impl NarrativeSegment {
    /// Create a segment.
    pub fn new(shot_ref: Option<ShotId>, text: impl Into<String>) -> Self {
        Self {
            shot_ref,
            text: text.into(),
        }
    }

    /// Look up the referenced shot in the current shot list.
    ///
    /// Returns `None` for unlinked segments and for markers whose id is not
    /// in `shots`.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_core::{NarrativeSegment, ShotId};
    ///
    /// let segment = NarrativeSegment::new(Some(ShotId::from("shot_9")), "Rain falls.");
    /// assert!(segment.resolve(&[]).is_none());
    /// ```
    pub fn resolve<'a>(&self, shots: &'a [Shot]) -> Option<&'a Shot> {
        let id = self.shot_ref.as_ref()?;
        shots.iter().find(|shot| shot.id() == id)
    }
}
