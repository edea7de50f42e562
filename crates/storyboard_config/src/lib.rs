//! Layered configuration for the storyboard director.
//!
//! Values are merged from, in increasing precedence:
//! - bundled defaults (`storyboard.toml` shipped with this crate)
//! - `~/.config/storyboard/storyboard.toml`
//! - `./storyboard.toml`
//! - `STORYBOARD_<SECTION>__<KEY>` environment variables

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{ExportConfig, GeminiConfig, GenerationConfig, StoryboardConfig};
