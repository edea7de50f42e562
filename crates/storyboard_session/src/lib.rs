//! Scene session state and generation orchestration.
//!
//! A [`SceneSession`] holds everything about one storyboard in progress.
//! Every change to it is a [`SessionEvent`] applied through
//! [`SceneSession::apply`], so the whole workflow can be replayed and
//! observed.
//!
//! On top of the session sit three controllers:
//!
//! - [`ShotGenerator`] renders one shot and applies exactly one outcome
//! - [`BatchRun`] renders every unfinished shot strictly in order
//! - [`Director`] exposes the user actions and owns both backends
//!
//! # Example
//!
//! ```rust,ignore
//! use storyboard_session::{Director, SceneSession};
//! use storyboard_models::GeminiClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(&config.gemini)?;
//! let director = Director::new(client.clone(), client);
//! let mut session = SceneSession::new();
//!
//! director.load_demo(&mut session);
//! let report = director.generate_all(&mut session).await;
//! println!("{:?}", report);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod director;
mod event;
mod generator;
mod observer;
mod session;

pub use batch::{BatchReport, BatchRun};
pub use director::{Director, STORY_FAILURE_MESSAGE, load_demo};
pub use event::SessionEvent;
pub use generator::{ShotGenerator, ShotOutcome};
pub use observer::{Observers, SessionObserver, TracingObserver};
pub use session::{SceneSession, transition};
