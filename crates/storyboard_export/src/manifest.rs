//! The `manifest.json` written into every archive.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyboard_core::{AspectRatio, Mood, SceneConfig, Shot, ShotDraft};
use storyboard_error::{ExportError, ExportErrorKind};

/// Scene settings plus every shot without its image or status.
///
/// # Examples
///
/// ```
/// use storyboard_core::{SceneConfigBuilder, Shot, ShotDraftBuilder};
/// use storyboard_export::SceneManifest;
///
/// let config = SceneConfigBuilder::default()
///     .seed("Lanterns over the harbor")
///     .build()
///     .unwrap();
/// let shot = Shot::from_draft(
///     ShotDraftBuilder::default()
///         .id("shot_1")
///         .title("Harbor")
///         .shot_type("Wide Shot")
///         .duration(3.0)
///         .short_prompt("Paper lanterns drifting over a dark harbor")
///         .build()
///         .unwrap(),
/// );
///
/// let manifest = SceneManifest::new(&config, &[shot]);
/// let json = manifest.to_json().unwrap();
/// assert!(json.contains("\"aspectRatio\": \"16:9\""));
/// assert!(!json.contains("status"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct SceneManifest {
    /// The scene idea
    scene: String,
    /// Visual mood
    mood: Mood,
    /// Frame shape
    aspect_ratio: AspectRatio,
    /// Continuity constraints
    continuity_notes: String,
    /// Shots in story order
    shots: Vec<ShotDraft>,
}

impl SceneManifest {
    /// Describe `shots` under `config`.
    pub fn new(config: &SceneConfig, shots: &[Shot]) -> Self {
        Self {
            scene: config.seed().clone(),
            mood: *config.mood(),
            aspect_ratio: *config.aspect_ratio(),
            continuity_notes: config.continuity_notes().clone(),
            shots: shots.iter().map(Shot::to_draft).collect(),
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::new(ExportErrorKind::Serialization(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_core::{ImagePayload, Quality, ShotDraftBuilder};

    fn shot(id: &str, prompt: &str) -> Shot {
        Shot::from_draft(
            ShotDraftBuilder::default()
                .id(id)
                .title("Title")
                .shot_type("Close-Up")
                .duration(2.0)
                .camera_notes("handheld")
                .short_prompt(prompt)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn shot_fields_use_backend_names() {
        let config = SceneConfig::new(
            "Night train",
            Vec::new(),
            Mood::Noir,
            AspectRatio::Classic,
            Quality::Final,
            "Conductor has a limp",
        );
        let mut shots = vec![shot("shot_1", "A conductor in the corridor")];
        let ticket = shots[0].begin_generation().unwrap();
        shots[0].complete_generation(&ticket, ImagePayload::new("image/png", vec![1]).unwrap());

        let value: serde_json::Value =
            serde_json::from_str(&SceneManifest::new(&config, &shots).to_json().unwrap()).unwrap();

        assert_eq!(value["scene"], "Night train");
        assert_eq!(value["mood"], "Noir");
        assert_eq!(value["aspectRatio"], "3:2");
        assert_eq!(value["continuityNotes"], "Conductor has a limp");
        let first = &value["shots"][0];
        assert_eq!(first["id"], "shot_1");
        assert_eq!(first["shot_type"], "Close-Up");
        assert_eq!(first["camera_notes"], "handheld");
        assert_eq!(first["short_prompt"], "A conductor in the corridor");
        assert!(first.get("image").is_none());
        assert!(first.get("status").is_none());
    }
}
