//! Narrative linking against shot lists.

use storyboard_core::{ShotId, ShotStatus};
use storyboard_narrative::{demo_preset, link_narrative, marker_ids};

#[test]
fn test_markers_label_the_text_that_follows() {
    let segments = link_narrative("A. [SHOT:shot_1] B. [SHOT:shot_2] C.");

    let pairs: Vec<(Option<ShotId>, &str)> = segments
        .iter()
        .map(|s| (s.shot_ref().clone(), s.text().as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (None, "A."),
            (Some(ShotId::from("shot_1")), "B."),
            (Some(ShotId::from("shot_2")), "C."),
        ]
    );
}

#[test]
fn test_leading_text_is_unlinked() {
    let segments = link_narrative("Rain on the window. [SHOT:shot_1] A hand wipes the glass.");

    assert_eq!(segments.len(), 2);
    assert!(segments[0].shot_ref().is_none());
    assert_eq!(segments[0].text(), "Rain on the window.");
    assert_eq!(segments[1].shot_ref(), &Some(ShotId::from("shot_1")));
    assert_eq!(segments[1].text(), "A hand wipes the glass.");
}

#[test]
fn test_story_without_markers_is_one_trimmed_segment() {
    let segments = link_narrative("\n  A single quiet paragraph.  \n");

    assert_eq!(segments.len(), 1);
    assert!(segments[0].shot_ref().is_none());
    assert_eq!(segments[0].text(), "A single quiet paragraph.");
}

#[test]
fn test_unknown_shot_id_is_tolerated() -> anyhow::Result<()> {
    let demo = demo_preset();
    let segments = link_narrative("[SHOT:shot_1] Known. [SHOT:shot_99] Unknown.");

    assert_eq!(segments.len(), 2);
    let known = segments[0]
        .resolve(demo.shots())
        .ok_or_else(|| anyhow::anyhow!("shot_1 should resolve"))?;
    assert_eq!(known.title(), "The Standoff");
    assert_eq!(segments[1].shot_ref(), &Some(ShotId::from("shot_99")));
    assert!(segments[1].resolve(demo.shots()).is_none());
    Ok(())
}

#[test]
fn test_linking_is_repeatable() {
    let demo = demo_preset();
    assert_eq!(link_narrative(demo.story()), link_narrative(demo.story()));
}

#[test]
fn test_demo_markers_match_demo_shots() {
    let demo = demo_preset();
    let ids = marker_ids(demo.story());
    let shot_ids: Vec<ShotId> = demo.shots().iter().map(|s| s.id().clone()).collect();

    assert_eq!(ids, shot_ids);
    assert!(demo.shots().iter().all(|s| s.status() == &ShotStatus::Pending));
    assert!(demo.config().validate().is_ok());
}

#[test]
fn test_demo_segments_follow_markers() {
    let demo = demo_preset();
    let segments = link_narrative(demo.story());

    // Opening paragraph precedes the first marker.
    assert_eq!(segments.len(), 5);
    assert!(segments[0].shot_ref().is_none());
    assert!(segments[0].text().starts_with("The city air"));
    assert_eq!(segments[1].shot_ref(), &Some(ShotId::from("shot_1")));
    assert!(segments[1].text().starts_with("Without a word"));
    assert_eq!(segments[4].shot_ref(), &Some(ShotId::from("shot_4")));
}
