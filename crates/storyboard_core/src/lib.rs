//! Core data types for the storyboard director.
//!
//! This crate provides the data model shared by every other storyboard crate:
//! shots and their generation lifecycle, scene configuration, session phases,
//! narrative segments and the request/response shapes exchanged with the
//! generative backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod media;
mod phase;
mod request;
mod scene;
mod segment;
mod shot;

pub use media::{ImagePayload, ReferenceImage};
pub use phase::SessionPhase;
pub use request::{
    ImageRequest, ImageRequestBuilder, ShotDraft, ShotDraftBuilder, ShotlistDocument,
    ShotlistRequest,
};
pub use scene::{
    AspectRatio, MAX_REFERENCE_IMAGES, Mood, Quality, SceneConfig, SceneConfigBuilder,
    SceneConfigBuilderError,
};
pub use segment::NarrativeSegment;
pub use shot::{
    CompletionOutcome, DEFAULT_SHOT_DURATION_SECS, GenerationTicket, Shot, ShotId, ShotStatus,
};
