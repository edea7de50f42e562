//! Binary image payloads exchanged with the image backend.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyboard_error::{GenerationError, GenerationErrorKind};

/// A rendered image returned by the image backend.
///
/// Construction rejects empty data, so a shot in `Success` always
/// carries real bytes.
///
/// # Examples
///
/// ```
/// use storyboard_core::ImagePayload;
///
/// let image = ImagePayload::new("image/png", vec![0x89, 0x50, 0x4E, 0x47]).unwrap();
/// assert_eq!(image.mime_type(), "image/png");
/// assert!(ImagePayload::new("image/png", Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct ImagePayload {
    /// MIME type reported by the backend
    mime_type: String,
    /// Raw image bytes
    data: Vec<u8>,
}

impl ImagePayload {
    /// Wrap raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns `EmptyResponse` when `data` is empty.
    #[track_caller]
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Result<Self, GenerationError> {
        if data.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
        }
        Ok(Self {
            mime_type: mime_type.into(),
            data,
        })
    }

    /// Decode a base64 payload as delivered in inline API responses.
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` when the text is not valid base64 and
    /// `EmptyResponse` when it decodes to nothing.
    #[track_caller]
    pub fn from_base64(
        mime_type: impl Into<String>,
        encoded: &str,
    ) -> Result<Self, GenerationError> {
        let data = STANDARD.decode(encoded.trim()).map_err(|e| {
            GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
                "invalid base64 image data: {}",
                e
            )))
        })?;
        Self::new(mime_type, data)
    }

    /// Encode the image as base64, e.g. for a data URL.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Size of the image in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An uploaded anchor image that biases character likeness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ReferenceImage {
    /// Caller-assigned identifier (usually the file name)
    id: String,
    /// MIME type, e.g. "image/jpeg"
    mime_type: String,
    /// Raw image bytes
    #[serde(skip)]
    data: Vec<u8>,
}

impl ReferenceImage {
    /// Create a reference image from raw bytes.
    pub fn new(id: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Base64 form of the bytes for inline transmission.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_payload_decodes() {
        let image = ImagePayload::from_base64("image/png", "iVBORw0KGgo=").unwrap();
        assert_eq!(image.data()[..4], [0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(image.to_base64(), "iVBORw0KGgo=");
    }

    #[test]
    fn invalid_base64_is_malformed() {
        let err = ImagePayload::from_base64("image/png", "not base64!!").unwrap_err();
        assert!(matches!(err.kind, GenerationErrorKind::MalformedResponse(_)));
    }

    #[test]
    fn empty_base64_is_empty_response() {
        let err = ImagePayload::from_base64("image/png", "").unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::EmptyResponse);
    }
}
