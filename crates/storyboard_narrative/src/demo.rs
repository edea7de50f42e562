//! A ready-made rooftop scene for trying the workflow without a backend call.

use derive_getters::{Dissolve, Getters};
use storyboard_core::{
    AspectRatio, Mood, Quality, SceneConfig, Shot, ShotDraft, ShotlistDocument,
};

/// Scene configuration, story and shotlist of the demo scene.
#[derive(Debug, Clone, Getters, Dissolve)]
pub struct DemoPreset {
    config: SceneConfig,
    story: String,
    shots: Vec<Shot>,
}

const SEED: &str = "A spy and a wizard have a tense meeting on a rooftop at dusk";

const CONTINUITY: &str = "The spy character has a small, barely visible scar above his right eyebrow. \
The wizard character wears a silver ring with a glowing blue gem on his index finger.";

const STORY: &str = "The city air hung thick and heavy, the last rays of sun painting the skyline in hues of orange and purple. On the windswept rooftop of the Zenith Tower, two figures stood in stark contrast. Elias, the wizard, wore robes the color of midnight, his silver ring pulsing with a soft, ethereal blue light. Across from him, the spy known only as 'Silas' was a silhouette in a perfectly tailored tuxedo, his posture relaxed but radiating lethal focus. A faint scar above his right eyebrow was the only imperfection on his otherwise flawless composure. [SHOT:shot_1]

Without a word, Elias raised a hand. The air crackled, and shimmering runes materialized around his fingers. He spoke a single, ancient word, and a beam of pure arcane energy projected from his hand, illuminating the rooftop. The wizard's eyes glowed with the same blue as his ring, his expression one of immense concentration. He was a force of nature, a conduit of raw power. [SHOT:shot_2]

Silas moved with impossible grace. He sidestepped the brilliant beam, the energy striking a concrete ledge behind him and exploding into a shower of harmless sparks. As the light faded, Silas had already closed half the distance, his hand reaching inside his jacket. His movements were fluid, economical, a dance of deadly precision. [SHOT:shot_3]

From the wizard's perspective, Silas was a blur. The spy drew not a weapon, but a sleek, chrome device that hummed with a low-frequency energy. He thumbed a switch, and a shimmering barrier of golden light projected from it, just in time to block a second, more powerful wave of magic from Elias. The impact threw Silas back a step, his heels skidding on the gravel rooftop. [SHOT:shot_4]

The two adversaries were now at a silent impasse. The wizard's raw, untamed magic faced the spy's sophisticated, cutting-edge technology. Their faces were masks of intense determination, the cool blue light of the wizard's energy reflecting in the spy's focused eyes. The fate of the city below hung in the balance, a secret conflict waged in the dying light of dusk. [SHOT:shot_5]";

/// (id, title, shot type, duration, camera notes, prompt)
const SHOTS: [(&str, &str, &str, f64, &str, &str); 5] = [
    (
        "shot_1",
        "The Standoff",
        "Wide Shot",
        3.0,
        "Establish the scene. Show both characters on the rooftop with the city skyline behind them as dusk settles. Low angle to make them look heroic.",
        "Epic wide shot of a spy in a sleek tuxedo and a wizard in flowing robes standing opposite each other on a skyscraper rooftop at dusk, dramatic city skyline, cinematic lighting, low angle.",
    ),
    (
        "shot_2",
        "Wizard's Power",
        "Medium Close-Up",
        2.0,
        "Focus on the wizard chanting, eyes glowing with magical energy. A beam of light projects from his hand.",
        "Medium close-up on a wise, old wizard with a long white beard, his eyes glowing blue with arcane energy as he casts a spell, a beam of light projecting from his hand, determined expression.",
    ),
    (
        "shot_3",
        "Spy's Movement",
        "Full Shot",
        2.0,
        "Capture the spy's athletic movement away from the light. Motion blur to emphasize speed. The background shows the light hitting a wall.",
        "Full shot of a nimble spy in a tuxedo gracefully moving to the side of a beam of blue magic, motion blur effect, on a skyscraper rooftop, cityscape background.",
    ),
    (
        "shot_4",
        "Spy's Tech",
        "Over-the-Shoulder",
        2.0,
        "Over the wizard's shoulder, we see the spy activating a futuristic gadget. A glint of light from the device.",
        "Over-the-shoulder view from behind a wizard, focusing on a spy activating a high-tech chrome gadget that emits a golden energy shield.",
    ),
    (
        "shot_5",
        "The Impasse",
        "Dynamic Close-Up",
        3.0,
        "Intense close-up on their faces as they observe each other. The wizard's magical aura contrasts with the spy's cool technology. Determined expressions.",
        "Dynamic close-up of a wizard's face, glowing with blue magical power, near a spy's cool, determined face reflecting golden light from a gadget.",
    ),
];

/// The demo scene: a spy and a wizard on a rooftop, five pending shots.
///
/// # Examples
///
/// ```
/// use storyboard_core::ShotStatus;
/// use storyboard_narrative::{demo_preset, marker_ids};
///
/// let demo = demo_preset();
/// assert_eq!(demo.shots().len(), 5);
/// assert!(demo.shots().iter().all(|s| s.status() == &ShotStatus::Pending));
/// assert_eq!(marker_ids(demo.story()).len(), 5);
/// ```
pub fn demo_preset() -> DemoPreset {
    let document = ShotlistDocument {
        story: STORY.to_string(),
        shots: SHOTS
            .iter()
            .map(
                |&(id, title, shot_type, duration, camera_notes, prompt)| ShotDraft {
                    id: id.to_string(),
                    title: title.to_string(),
                    shot_type: shot_type.to_string(),
                    duration,
                    camera_notes: camera_notes.to_string(),
                    short_prompt: prompt.to_string(),
                },
            )
            .collect(),
    };
    let (story, shots) = document.into_shots();

    DemoPreset {
        config: demo_config(),
        story,
        shots,
    }
}

fn demo_config() -> SceneConfig {
    SceneConfig::new(
        SEED,
        Vec::new(),
        Mood::Cinematic,
        AspectRatio::Widescreen,
        Quality::Draft,
        CONTINUITY,
    )
}
