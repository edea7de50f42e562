//! Timed slideshow of rendered shots.

use derive_getters::Getters;
use std::time::Duration;
use storyboard_core::{DEFAULT_SHOT_DURATION_SECS, ImagePayload, Shot, ShotId};

/// One slide of the animatic.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct AnimaticFrame {
    /// Shot shown in this frame
    shot_id: ShotId,
    /// Shot title
    title: String,
    /// Offset from the start of playback
    start: Duration,
    /// How long the frame stays on screen
    duration: Duration,
    /// The rendered image
    image: ImagePayload,
}

impl AnimaticFrame {
    /// Offset at which the next frame starts.
    pub fn end(&self) -> Duration {
        self.start.saturating_add(self.duration)
    }
}

/// Rendered shots played back in story order for their durations.
///
/// Shots without an image are left out. Playback runs once; past the end
/// there is no frame to show.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use storyboard_core::{ImagePayload, Shot, ShotDraftBuilder};
/// use storyboard_export::Animatic;
///
/// let mut shot = Shot::from_draft(
///     ShotDraftBuilder::default()
///         .id("shot_1")
///         .title("Harbor")
///         .shot_type("Wide Shot")
///         .duration(3.0)
///         .short_prompt("Lanterns over a dark harbor")
///         .build()
///         .unwrap(),
/// );
/// let ticket = shot.begin_generation().unwrap();
/// shot.complete_generation(&ticket, ImagePayload::new("image/png", vec![1]).unwrap());
///
/// let animatic = Animatic::from_shots(&[shot]);
/// assert_eq!(animatic.total_duration(), Duration::from_secs(3));
/// assert!(animatic.frame_at(Duration::from_millis(2999)).is_some());
/// assert!(animatic.frame_at(Duration::from_secs(3)).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Getters)]
pub struct Animatic {
    frames: Vec<AnimaticFrame>,
}

impl Animatic {
    /// Build the frame list from shots in story order.
    pub fn from_shots(shots: &[Shot]) -> Self {
        let mut start = Duration::ZERO;
        let frames = shots
            .iter()
            .filter_map(|shot| {
                let image = shot.image().clone()?;
                let duration = frame_duration(*shot.duration_seconds());
                let frame = AnimaticFrame {
                    shot_id: shot.id().clone(),
                    title: shot.title().clone(),
                    start,
                    duration,
                    image,
                };
                start = start.saturating_add(duration);
                Some(frame)
            })
            .collect();
        Self { frames }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when no shot has an image yet.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Length of one full playback.
    pub fn total_duration(&self) -> Duration {
        self.frames.last().map(AnimaticFrame::end).unwrap_or_default()
    }

    /// Index of the frame on screen `elapsed` after playback started.
    pub fn frame_index_at(&self, elapsed: Duration) -> Option<usize> {
        if elapsed >= self.total_duration() {
            return None;
        }
        Some(self.frames.partition_point(|frame| frame.end() <= elapsed))
    }

    /// The frame on screen `elapsed` after playback started.
    pub fn frame_at(&self, elapsed: Duration) -> Option<&AnimaticFrame> {
        self.frame_index_at(elapsed).and_then(|i| self.frames.get(i))
    }
}

/// Durations that are not positive or do not fit a [`Duration`] play for
/// the default length.
fn frame_duration(secs: f64) -> Duration {
    let fallback = Duration::from_secs_f64(DEFAULT_SHOT_DURATION_SECS);
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(fallback)
    } else {
        fallback
    }
}
