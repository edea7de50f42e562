//! Narrative handling for the storyboard director.
//!
//! This crate covers everything that deals with story text rather than
//! session state:
//!
//! - **Linking**: split a marker-annotated story into shot-labelled segments
//! - **Prompting**: build the shotlist instruction and its response schema
//! - **Extraction**: recover the shotlist JSON from model output
//! - **Demo preset**: a ready-made scene for trying the workflow offline
//!
//! # Example
//!
//! ```
//! use storyboard_narrative::link_narrative;
//!
//! let segments = link_narrative("Dusk falls. [SHOT:shot_1] Two figures meet.");
//! assert_eq!(segments.len(), 2);
//! assert!(segments[0].shot_ref().is_none());
//! assert_eq!(segments[1].shot_ref().as_ref().unwrap().as_str(), "shot_1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod demo;
mod extraction;
mod linker;
mod prompt;

pub use demo::{DemoPreset, demo_preset};
pub use extraction::{extract_json, parse_json, parse_shotlist};
pub use linker::{link_narrative, marker_ids};
pub use prompt::{shotlist_prompt, shotlist_response_schema};
