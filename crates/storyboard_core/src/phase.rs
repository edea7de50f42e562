//! Macro phases of a storyboard session.

use serde::{Deserialize, Serialize};

/// The three macro phases a session moves through.
///
/// Phases only move forward; restart is the single way back to
/// [`SessionPhase::Compose`].
///
/// # Examples
///
/// ```
/// use storyboard_core::SessionPhase;
///
/// assert!(SessionPhase::Compose < SessionPhase::Story);
/// assert!(SessionPhase::Story < SessionPhase::Generate);
/// assert_eq!(SessionPhase::default(), SessionPhase::Compose);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Entering the scene idea and style parameters
    #[default]
    #[display("compose")]
    Compose,
    /// Story and shotlist available, images may be generated
    #[display("story")]
    Story,
    /// A batch run finished; export may be available
    #[display("generate")]
    Generate,
}
