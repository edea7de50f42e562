//! Generative backend integrations for the storyboard director.
//!
//! [`GeminiClient`] talks to the Gemini `generateContent` REST endpoint and
//! implements both backend traits: the text model writes the story and
//! shotlist, the image model renders shots.
//!
//! # Example
//!
//! ```no_run
//! use storyboard_config::StoryboardConfig;
//! use storyboard_core::{ImageRequestBuilder};
//! use storyboard_interface::ImageBackend;
//! use storyboard_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryboardConfig::load()?;
//! let client = GeminiClient::new(&config.gemini)?;
//! let request = ImageRequestBuilder::default()
//!     .prompt("A lighthouse on a cliff at sunset")
//!     .build()?;
//! let image = client.generate_image(&request).await?;
//! println!("{} bytes of {}", image.len(), image.mime_type());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod metrics;
mod retry;

pub use gemini::GeminiClient;
pub use metrics::GenerationMetrics;
pub use retry::{RetryPolicy, retry_transient};
