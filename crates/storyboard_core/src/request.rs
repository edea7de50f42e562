//! Request and response shapes exchanged with the generative backends.

use crate::{AspectRatio, Mood, ReferenceImage, SceneConfig, Shot};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Input to the story and shotlist backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotlistRequest {
    /// Scene idea
    pub seed: String,
    /// Visual mood
    pub mood: Mood,
    /// Frame shape
    pub aspect_ratio: AspectRatio,
    /// Continuity constraints
    pub continuity_notes: String,
}

impl From<&SceneConfig> for ShotlistRequest {
    fn from(config: &SceneConfig) -> Self {
        Self {
            seed: config.seed().clone(),
            mood: *config.mood(),
            aspect_ratio: *config.aspect_ratio(),
            continuity_notes: config.continuity_notes().clone(),
        }
    }
}

/// One shot as described by the shotlist backend.
///
/// Field names follow the JSON the backend is asked to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct ShotDraft {
    /// Identifier such as `shot_1`
    pub id: String,
    /// Short label
    pub title: String,
    /// Framing
    pub shot_type: String,
    /// Seconds of playback
    pub duration: f64,
    /// Camera direction
    #[builder(default)]
    #[serde(default)]
    pub camera_notes: String,
    /// Image prompt
    pub short_prompt: String,
}

/// Story text plus ordered shot drafts.
///
/// # Examples
///
/// ```
/// use storyboard_core::ShotlistDocument;
///
/// let json = r#"{
///     "story": "[SHOT:shot_1] A door creaks open.",
///     "shots": [{
///         "id": "shot_1",
///         "title": "Door",
///         "shot_type": "Close-Up",
///         "duration": 2.5,
///         "camera_notes": "static",
///         "short_prompt": "An old wooden door opening"
///     }]
/// }"#;
///
/// let doc: ShotlistDocument = serde_json::from_str(json).unwrap();
/// assert_eq!(doc.shots.len(), 1);
/// assert_eq!(doc.shots[0].id, "shot_1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotlistDocument {
    /// Prose containing `[SHOT:shot_N]` markers
    pub story: String,
    /// Shots in story order
    pub shots: Vec<ShotDraft>,
}

impl ShotlistDocument {
    /// Convert the drafts into pending shots.
    pub fn into_shots(self) -> (String, Vec<Shot>) {
        let shots = self.shots.into_iter().map(Shot::from_draft).collect();
        (self.story, shots)
    }
}

/// Input to the image backend for one shot.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// The shot's current prompt
    pub prompt: String,
    /// Anchor images sent alongside the prompt
    #[builder(default)]
    pub reference_images: Vec<ReferenceImage>,
    /// Frame shape
    #[builder(default)]
    pub aspect_ratio: AspectRatio,
    /// Continuity constraints
    #[builder(default)]
    pub continuity_notes: String,
}

impl ImageRequest {
    /// Request an image for `shot` under `config`.
    pub fn for_shot(shot: &Shot, config: &SceneConfig) -> Self {
        Self {
            prompt: shot.prompt().clone(),
            reference_images: config.reference_images().clone(),
            aspect_ratio: *config.aspect_ratio(),
            continuity_notes: config.continuity_notes().clone(),
        }
    }

    /// Full text instruction for the image model.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_core::{AspectRatio, ImageRequestBuilder};
    ///
    /// let request = ImageRequestBuilder::default()
    ///     .prompt("A lighthouse in a storm")
    ///     .aspect_ratio(AspectRatio::Classic)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     request.composed_prompt(),
    ///     "A lighthouse in a storm. The image should have a 3:2 aspect ratio."
    /// );
    /// ```
    pub fn composed_prompt(&self) -> String {
        let mut text = format!(
            "{}. The image should have a {} aspect ratio.",
            self.prompt.trim_end_matches('.'),
            self.aspect_ratio
        );
        let notes = self.continuity_notes.trim();
        if !notes.is_empty() {
            text.push_str(" Key continuity notes to maintain: ");
            text.push_str(notes);
        }
        text
    }
}
