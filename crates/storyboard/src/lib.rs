//! Storyboard director.
//!
//! Turns a one-line scene idea into a short story with embedded shot
//! markers, a shotlist of camera setups, and one rendered image per shot.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storyboard::{Director, GeminiClient, SceneConfigBuilder, SceneSession, StoryboardConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoryboardConfig::load()?;
//!     let client = GeminiClient::new(&config.gemini)?;
//!     let director = Director::new(client.clone(), client);
//!
//!     let scene = SceneConfigBuilder::default()
//!         .seed("A chase through a night market")
//!         .build()?;
//!
//!     let mut session = SceneSession::new();
//!     director.compose(&mut session, scene).await?;
//!     director.generate_all(&mut session).await;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `storyboard_core` - Shot, scene and request types
//! - `storyboard_error` - Error types
//! - `storyboard_interface` - Text and image backend traits
//! - `storyboard_config` - Layered configuration
//! - `storyboard_narrative` - Story linking, shotlist parsing, demo scene
//! - `storyboard_models` - Gemini backend
//! - `storyboard_session` - Session state, generation and batch control
//! - `storyboard_export` - Archive and animatic export
//!
//! This crate re-exports everything for convenience.

pub use storyboard_config::*;
pub use storyboard_core::*;
pub use storyboard_error::*;
pub use storyboard_export::*;
pub use storyboard_interface::*;
pub use storyboard_models::*;
pub use storyboard_narrative::*;
pub use storyboard_session::*;

pub mod telemetry;
