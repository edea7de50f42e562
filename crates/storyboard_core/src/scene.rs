//! Scene configuration captured at the compose step.

use crate::ReferenceImage;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyboard_error::{ValidationError, ValidationErrorKind};

/// Upper bound on anchor images accepted per scene.
pub const MAX_REFERENCE_IMAGES: usize = 4;

/// Visual mood applied to the story and every image.
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
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Mood {
    /// Dramatic film look
    #[default]
    Cinematic,
    /// High-contrast black and white
    Noir,
    /// Playful and light
    Whimsical,
    /// Fantastical glow
    Magical,
    /// Saturated daylight
    Bright,
    /// Caller-described mood carried in the continuity notes
    Custom,
}

impl Mood {
    /// Moods offered as presets (everything except `Custom`).
    pub fn presets() -> impl Iterator<Item = Mood> {
        use strum::IntoEnumIterator;
        Mood::iter().filter(|m| *m != Mood::Custom)
    }
}

/// Output frame shape.
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
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
pub enum AspectRatio {
    /// Widescreen
    #[default]
    #[serde(rename = "16:9")]
    #[strum(serialize = "16:9")]
    Widescreen,
    /// Classic 35mm still
    #[serde(rename = "3:2")]
    #[strum(serialize = "3:2")]
    Classic,
    /// Square
    #[serde(rename = "1:1")]
    #[strum(serialize = "1:1")]
    Square,
}

/// Rendering quality hint.
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
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Quality {
    /// Fast iteration
    #[default]
    Draft,
    /// Final render
    Final,
}

/// Everything the user supplies before the story is generated.
///
/// Captured once per session at the compose step and then treated as
/// read-only.
///
/// # Examples
///
/// ```
/// use storyboard_core::{AspectRatio, Mood, SceneConfigBuilder};
///
/// let config = SceneConfigBuilder::default()
///     .seed("A chase through a night market")
///     .mood(Mood::Noir)
///     .aspect_ratio(AspectRatio::Square)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seed(), "A chase through a night market");
/// assert!(config.reference_images().is_empty());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[builder(build_fn(validate = "Self::validate_references"))]
pub struct SceneConfig {
    /// Free-text scene idea
    #[builder(setter(into))]
    seed: String,
    /// Anchor images for character likeness
    #[builder(default, setter(each(name = "reference_image")))]
    #[serde(default)]
    reference_images: Vec<ReferenceImage>,
    /// Visual mood
    #[builder(default)]
    #[serde(default)]
    mood: Mood,
    /// Frame shape
    #[builder(default)]
    #[serde(default)]
    aspect_ratio: AspectRatio,
    /// Rendering quality hint
    #[builder(default)]
    #[serde(default)]
    quality: Quality,
    /// Free text such as "the hero has a scar over the left eye"
    #[builder(default, setter(into))]
    #[serde(default)]
    continuity_notes: String,
}

impl SceneConfigBuilder {
    fn validate_references(&self) -> Result<(), String> {
        match &self.reference_images {
            Some(images) if images.len() > MAX_REFERENCE_IMAGES => Err(
                ValidationErrorKind::TooManyReferences {
                    count: images.len(),
                    max: MAX_REFERENCE_IMAGES,
                }
                .to_string(),
            ),
            _ => Ok(()),
        }
    }
}

impl SceneConfig {
    /// Assemble a configuration directly.
    ///
    /// Unlike the builder this does not check the anchor count; call
    /// [`validate`](Self::validate) before submitting it.
    pub fn new(
        seed: impl Into<String>,
        reference_images: Vec<ReferenceImage>,
        mood: Mood,
        aspect_ratio: AspectRatio,
        quality: Quality,
        continuity_notes: impl Into<String>,
    ) -> Self {
        Self {
            seed: seed.into(),
            reference_images,
            mood,
            aspect_ratio,
            quality,
            continuity_notes: continuity_notes.into(),
        }
    }

    /// Check the configuration before any backend call.
    ///
    /// # Errors
    ///
    /// `EmptySeed` when the seed is blank after trimming, and
    /// `TooManyReferences` when more than [`MAX_REFERENCE_IMAGES`] anchors
    /// are attached.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.seed.trim().is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptySeed));
        }
        if self.reference_images.len() > MAX_REFERENCE_IMAGES {
            return Err(ValidationError::new(
                ValidationErrorKind::TooManyReferences {
                    count: self.reference_images.len(),
                    max: MAX_REFERENCE_IMAGES,
                },
            ));
        }
        Ok(())
    }
}
