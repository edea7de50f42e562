//! Trait definitions for the storyboard generative backends.
//!
//! The session layer talks to two collaborators: one that turns a scene
//! idea into a story with a shotlist, and one that renders a single shot.
//! Both are expressed as traits so the HTTP client can be swapped for test
//! doubles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageBackend, ShotlistBackend};
