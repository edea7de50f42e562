//! Test utilities for session tests.
//!
//! Mock backends plus a few scene helpers.

#![allow(dead_code)]

pub mod mock_backends;

pub use mock_backends::{
    MockBehavior, MockImageBackend, MockResponse, MockShotlistBackend, RecordingObserver,
};

use storyboard_core::{
    AspectRatio, Mood, SceneConfig, SceneConfigBuilder, ShotDraftBuilder, ShotlistDocument,
};

/// A valid scene with continuity notes.
pub fn test_config(seed: &str) -> SceneConfig {
    SceneConfigBuilder::default()
        .seed(seed)
        .mood(Mood::Noir)
        .aspect_ratio(AspectRatio::Square)
        .continuity_notes("The courier wears a red scarf.")
        .build()
        .expect("Failed to build scene config")
}

/// A shotlist with `count` shots, each referenced once in the story.
pub fn test_document(count: usize) -> ShotlistDocument {
    let shots = (1..=count)
        .map(|i| {
            ShotDraftBuilder::default()
                .id(format!("shot_{}", i))
                .title(format!("Beat {}", i))
                .shot_type("Wide Shot")
                .duration(2.5)
                .short_prompt(format!("A courier crossing bridge number {}", i))
                .build()
                .expect("Failed to build shot draft")
        })
        .collect();
    let story = (1..=count)
        .map(|i| format!("Beat {} of the chase. [SHOT:shot_{}]", i, i))
        .collect::<Vec<_>>()
        .join("\n\n");
    ShotlistDocument { story, shots }
}
