//! Splits a story into shot-labelled segments.
//!
//! A marker `[SHOT:shot_N]` labels the text that follows it, up to the next
//! marker or the end of the story. Text before the first marker belongs to
//! no shot.

use regex::Regex;
use std::sync::LazyLock;
use storyboard_core::{NarrativeSegment, ShotId};

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[SHOT:(shot_\d+)\]").expect("Valid shot marker regex"));

/// Split `story` into ordered segments.
///
/// Segment text is trimmed and whitespace-only spans are dropped. A story
/// without markers yields a single unlinked segment; a blank story yields
/// none. Markers naming unknown shots are emitted as-is.
///
/// # Examples
///
/// ```
/// use storyboard_narrative::link_narrative;
///
/// let segments = link_narrative("Just prose, no shots.");
/// assert_eq!(segments.len(), 1);
/// assert_eq!(segments[0].text(), "Just prose, no shots.");
/// ```
pub fn link_narrative(story: &str) -> Vec<NarrativeSegment> {
    let mut segments = Vec::new();
    let mut current: Option<ShotId> = None;
    let mut cursor = 0;

    for captures in MARKER.captures_iter(story) {
        let (Some(whole), Some(id)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        push_span(&mut segments, current.take(), &story[cursor..whole.start()]);
        current = Some(ShotId::new(id.as_str()));
        cursor = whole.end();
    }
    push_span(&mut segments, current, &story[cursor..]);

    tracing::trace!(segments = segments.len(), "Linked narrative");
    segments
}

/// Shot ids named by markers, in order of appearance.
///
/// Repeated markers appear repeatedly.
pub fn marker_ids(story: &str) -> Vec<ShotId> {
    MARKER
        .captures_iter(story)
        .filter_map(|c| c.get(1))
        .map(|m| ShotId::new(m.as_str()))
        .collect()
}

fn push_span(segments: &mut Vec<NarrativeSegment>, shot_ref: Option<ShotId>, span: &str) {
    let text = span.trim();
    if !text.is_empty() {
        segments.push(NarrativeSegment::new(shot_ref, text));
    }
}
