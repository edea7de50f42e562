//! Instructions sent to the shotlist model.

use serde_json::{Value, json};
use storyboard_core::ShotlistRequest;

/// Build the story and shotlist instruction for a scene.
///
/// The continuity block is only included when notes are present.
///
/// # Examples
///
/// ```
/// use storyboard_core::{AspectRatio, Mood, ShotlistRequest};
/// use storyboard_narrative::shotlist_prompt;
///
/// let request = ShotlistRequest {
///     seed: "A lighthouse keeper finds a message in a bottle".to_string(),
///     mood: Mood::Whimsical,
///     aspect_ratio: AspectRatio::Classic,
///     continuity_notes: String::new(),
/// };
///
/// let prompt = shotlist_prompt(&request);
/// assert!(prompt.contains("Scene Idea: \"A lighthouse keeper finds a message in a bottle\""));
/// assert!(prompt.contains("Mood: \"Whimsical\""));
/// assert!(!prompt.contains("continuity details"));
/// ```
pub fn shotlist_prompt(request: &ShotlistRequest) -> String {
    let notes = request.continuity_notes.trim();
    let continuity = if notes.is_empty() {
        String::new()
    } else {
        format!(
            "\nCRITICAL: Maintain the following continuity details across all shots: \"{}\"\n",
            notes
        )
    };

    format!(
        r#"You are a professional screenwriter and film director. Expand the scene idea below into a short story and a detailed shotlist.

Step 1: Write a short story
- Write an engaging short story for the scene, around 200 to 400 words.
- Give it a clear beginning, middle and end.
- Weave the mood and any continuity notes into the narrative.
- After each paragraph that describes a key visual moment, insert a marker of the form [SHOT:shot_id], where shot_id is a unique identifier such as shot_1 or shot_2.

Step 2: Create the shotlist
- Based on the story, identify 5 to 10 distinct cinematic shots.
- For each shot give an id (matching its [SHOT:shot_id] marker), a title, a shot type (e.g. Wide Shot, Close-Up), a duration in seconds, camera notes, and a concise visual prompt for an image generator in 'short_prompt'.

Rules for 'short_prompt':
- It must be a purely visual, safe-for-work description that an image generator will not block.
- Do not use words implying violence, combat or harm, such as duel, fight, attack, shoot, battle, weapon, gun, sword, kill, injure, blood or blast.
- Describe what is visible instead of the conflict: "a spy in a tuxedo and a wizard in robes stand facing each other, one holds a glowing staff, the other a futuristic gadget".
- Describe actions neutrally: "a beam of blue energy emerges from his hand".
- Cover setting, lighting, colors, character appearance and mood.
- Avoid complex compositions such as split-screen or picture-in-picture.
- Keep it to one concise sentence or a series of descriptive phrases.

Input:
- Scene Idea: "{seed}"
- Mood: "{mood}"
- Aspect Ratio: "{aspect}"
{continuity}
Output:
Respond ONLY with a single valid JSON object and no other text or markdown.
It must have two keys: "story" (the full story including shot markers) and "shots" (an array of shot objects)."#,
        seed = request.seed.trim(),
        mood = request.mood,
        aspect = request.aspect_ratio,
        continuity = continuity,
    )
}

/// Response schema constraining the shotlist model's JSON output.
pub fn shotlist_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "story": { "type": "STRING" },
            "shots": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "title": { "type": "STRING" },
                        "shot_type": { "type": "STRING" },
                        "duration": { "type": "NUMBER" },
                        "camera_notes": { "type": "STRING" },
                        "short_prompt": { "type": "STRING" }
                    },
                    "required": ["id", "title", "shot_type", "duration", "camera_notes", "short_prompt"]
                }
            }
        },
        "required": ["story", "shots"]
    })
}
