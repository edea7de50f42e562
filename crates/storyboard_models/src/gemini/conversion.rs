//! Conversion between storyboard types and Gemini DTOs.

use super::dto::{
    ApiErrorEnvelope, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    Part,
};
use storyboard_core::{ImagePayload, ImageRequest, ShotlistRequest};
use storyboard_error::{GenerationError, GenerationErrorKind};
use storyboard_narrative::{shotlist_prompt, shotlist_response_schema};

/// Finish reasons that mean the output was withheld by safety filters.
const BLOCKED_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "IMAGE_SAFETY",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
];

/// Build the shotlist call: the instruction plus a JSON response schema.
pub fn shotlist_body(request: &ShotlistRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part::text(shotlist_prompt(request))],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(shotlist_response_schema()),
            response_modalities: None,
        }),
    }
}

/// Build the image call: anchors first, then the composed prompt.
pub fn image_body(request: &ImageRequest) -> GenerateContentRequest {
    let mut parts: Vec<Part> = request
        .reference_images
        .iter()
        .map(|anchor| Part::inline(anchor.mime_type().clone(), anchor.to_base64()))
        .collect();
    parts.push(Part::text(request.composed_prompt()));

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: None,
            response_schema: None,
            response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
        }),
    }
}

/// Concatenated text of the first candidate.
///
/// # Errors
///
/// `PolicyRefusal` when blocked, `EmptyResponse` when there is no text.
#[track_caller]
pub fn text_from_response(response: &GenerateContentResponse) -> Result<String, GenerationError> {
    check_blocked(response)?;
    let text = candidate_text(response);
    if text.trim().is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
    }
    Ok(text)
}

/// First inline image of the first candidate.
///
/// # Errors
///
/// `PolicyRefusal` when blocked, `TextInsteadOfImage` when only text came
/// back, `EmptyResponse` when nothing did, `MalformedResponse` when the
/// image data cannot be decoded.
#[track_caller]
pub fn image_from_response(
    response: &GenerateContentResponse,
) -> Result<ImagePayload, GenerationError> {
    check_blocked(response)?;

    let inline = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .into_iter()
        .flat_map(|content| content.parts.iter())
        .find_map(|part| part.inline_data.as_ref());

    if let Some(inline) = inline {
        return ImagePayload::from_base64(inline.mime_type.clone(), &inline.data);
    }

    let text = candidate_text(response);
    let text = text.trim();
    if !text.is_empty() {
        return Err(GenerationError::new(
            GenerationErrorKind::TextInsteadOfImage(text.to_string()),
        ));
    }
    Err(GenerationError::new(GenerationErrorKind::EmptyResponse))
}

/// Map a non-success HTTP status and body to an error.
#[track_caller]
pub fn error_from_status(status_code: u16, body: &str) -> GenerationError {
    let (message, status) = match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.trim().to_string(), None),
    };

    let exhausted = status.as_deref() == Some("RESOURCE_EXHAUSTED")
        || message.contains("RESOURCE_EXHAUSTED")
        || message.to_lowercase().contains("quota");

    if status_code == 429 || exhausted {
        GenerationError::new(GenerationErrorKind::QuotaExceeded)
    } else {
        GenerationError::new(GenerationErrorKind::HttpStatus {
            status_code,
            message,
        })
    }
}

/// Map a transport failure to an error.
#[track_caller]
pub fn error_from_transport(error: &reqwest::Error) -> GenerationError {
    let reason = if error.is_timeout() {
        format!("request timed out: {}", error)
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    };
    GenerationError::new(GenerationErrorKind::BackendUnavailable(reason))
}

#[track_caller]
fn check_blocked(response: &GenerateContentResponse) -> Result<(), GenerationError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_ref())
    {
        return Err(GenerationError::new(GenerationErrorKind::PolicyRefusal(
            reason.clone(),
        )));
    }

    if let Some(reason) = response
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
        .filter(|r| BLOCKED_FINISH_REASONS.contains(r))
    {
        return Err(GenerationError::new(GenerationErrorKind::PolicyRefusal(
            reason.to_string(),
        )));
    }

    Ok(())
}

fn candidate_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard_core::{ImageRequestBuilder, ReferenceImage};

    fn response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn image_part_is_decoded() {
        let r = response(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Here you go"},
                {"inlineData":{"mimeType":"image/png","data":"iVBORw0KGgo="}}
            ]},"finishReason":"STOP"}]}"#,
        );
        let image = image_from_response(&r).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.len(), 8);
    }

    #[test]
    fn safety_finish_is_policy_refusal() {
        let r = response(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        let err = image_from_response(&r).unwrap_err();
        assert_eq!(
            err.kind,
            GenerationErrorKind::PolicyRefusal("SAFETY".to_string())
        );
    }

    #[test]
    fn blocked_prompt_is_policy_refusal() {
        let r = response(r#"{"promptFeedback":{"blockReason":"OTHER"}}"#);
        assert!(matches!(
            text_from_response(&r).unwrap_err().kind,
            GenerationErrorKind::PolicyRefusal(_)
        ));
    }

    #[test]
    fn text_only_reply_is_reported() {
        let r = response(
            r#"{"candidates":[{"content":{"parts":[{"text":" I cannot draw that. "}]}}]}"#,
        );
        let err = image_from_response(&r).unwrap_err();
        assert_eq!(
            err.kind,
            GenerationErrorKind::TextInsteadOfImage("I cannot draw that.".to_string())
        );
        assert_eq!(
            err.user_message(),
            "The model responded with text instead of an image: \"I cannot draw that.\""
        );
    }

    #[test]
    fn nothing_is_empty_response() {
        let r = response(r#"{"candidates":[]}"#);
        assert_eq!(
            image_from_response(&r).unwrap_err().kind,
            GenerationErrorKind::EmptyResponse
        );
        assert_eq!(
            text_from_response(&r).unwrap_err().kind,
            GenerationErrorKind::EmptyResponse
        );
    }

    #[test]
    fn quota_statuses_map_to_quota_exceeded() {
        assert_eq!(
            error_from_status(429, "").kind,
            GenerationErrorKind::QuotaExceeded
        );
        let body = r#"{"error":{"code":403,"message":"denied","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            error_from_status(403, body).kind,
            GenerationErrorKind::QuotaExceeded
        );
    }

    #[test]
    fn other_statuses_keep_api_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            error_from_status(400, body).kind,
            GenerationErrorKind::HttpStatus {
                status_code: 400,
                message: "API key not valid".to_string()
            }
        );
    }

    #[test]
    fn image_body_sends_anchors_before_prompt() {
        let request = ImageRequestBuilder::default()
            .prompt("A quiet harbor")
            .reference_images(vec![ReferenceImage::new("a.png", "image/png", vec![1, 2, 3])])
            .build()
            .unwrap();
        let body = serde_json::to_value(image_body(&request)).unwrap();
        let parts = body["contents"][0]["parts"].as_array().unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AQID");
        assert!(parts[1]["text"].as_str().unwrap().starts_with("A quiet harbor."));
        assert_eq!(
            body["generationConfig"]["responseModalities"],
            serde_json::json!(["IMAGE", "TEXT"])
        );
    }

    #[test]
    fn shotlist_body_requests_json() {
        let request = ShotlistRequest {
            seed: "seed".to_string(),
            mood: Default::default(),
            aspect_ratio: Default::default(),
            continuity_notes: String::new(),
        };
        let body = serde_json::to_value(shotlist_body(&request)).unwrap();
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(body["generationConfig"]["responseSchema"].is_object());
        assert!(body["generationConfig"].get("responseModalities").is_none());
    }
}
