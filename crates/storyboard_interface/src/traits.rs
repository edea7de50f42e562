//! Trait definitions for the text and image backends.

use async_trait::async_trait;
use std::sync::Arc;
use storyboard_core::{ImagePayload, ImageRequest, ShotlistDocument, ShotlistRequest};
use storyboard_error::GenerationError;

/// Produces a story with embedded shot markers plus the matching shot list.
#[async_trait]
pub trait ShotlistBackend: Send + Sync {
    /// Generate the story and shotlist for a scene.
    async fn generate_shotlist(
        &self,
        request: &ShotlistRequest,
    ) -> Result<ShotlistDocument, GenerationError>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}

/// Renders one image for one shot.
///
/// Implementations must surface every failure as a [`GenerationError`];
/// an `Ok` always carries a non-empty image.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Render the image described by `request`.
    async fn generate_image(&self, request: &ImageRequest)
    -> Result<ImagePayload, GenerationError>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Maximum number of anchor images accepted per request.
    fn max_reference_images(&self) -> usize {
        storyboard_core::MAX_REFERENCE_IMAGES
    }
}

#[async_trait]
impl<T: ShotlistBackend + ?Sized> ShotlistBackend for Arc<T> {
    async fn generate_shotlist(
        &self,
        request: &ShotlistRequest,
    ) -> Result<ShotlistDocument, GenerationError> {
        (**self).generate_shotlist(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: ImageBackend + ?Sized> ImageBackend for Arc<T> {
    async fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> Result<ImagePayload, GenerationError> {
        (**self).generate_image(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn max_reference_images(&self) -> usize {
        (**self).max_reference_images()
    }
}
