//! Utilities for extracting structured data from model responses.
//!
//! Even with a JSON response type requested, models sometimes wrap output
//! in markdown fences or surround it with commentary. These helpers recover
//! the JSON body before it is deserialized.

use storyboard_core::ShotlistDocument;
use storyboard_error::{GenerationError, GenerationErrorKind};

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces: { ... }
/// 3. Balanced brackets: [ ... ]
///
/// # Errors
///
/// Returns `MalformedResponse` if no JSON is found.
///
/// # Examples
///
/// ```
/// use storyboard_narrative::extract_json;
///
/// let response = "Here is the shotlist:\n\
///     \n\
///     ```json\n\
///     {\"story\": \"...\", \"shots\": []}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
#[track_caller]
pub fn extract_json(response: &str) -> Result<String, GenerationError> {
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let found = match (bracket_pos, brace_pos) {
        (Some(b), Some(c)) if b < c => extract_balanced(response, '[', ']')
            .or_else(|| extract_balanced(response, '{', '}')),
        (Some(_), None) => extract_balanced(response, '[', ']'),
        _ => extract_balanced(response, '{', '}')
            .or_else(|| extract_balanced(response, '[', ']')),
    };

    if let Some(json) = found {
        return Ok(json);
    }

    tracing::error!(response_length = response.len(), "No JSON found in model response");

    Err(GenerationError::new(GenerationErrorKind::MalformedResponse(
        format!("no JSON found in response (length: {})", response.len()),
    )))
}

/// Parse JSON into `T`.
///
/// # Errors
///
/// Returns `MalformedResponse` carrying the parser message and a short
/// preview of the input.
///
/// # Examples
///
/// ```
/// use storyboard_narrative::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Frame {
///     id: String,
/// }
///
/// let frame: Frame = parse_json(r#"{"id": "shot_1"}"#).unwrap();
/// assert_eq!(frame.id, "shot_1");
/// ```
#[track_caller]
pub fn parse_json<T>(json_str: &str) -> Result<T, GenerationError>
where
    T: serde::de::DeserializeOwned,
{
    match serde_json::from_str(json_str) {
        Ok(value) => Ok(value),
        Err(e) => {
            let preview = json_str.chars().take(100).collect::<String>();

            tracing::error!(error = %e, json_preview = %preview, "JSON parsing failed");

            Err(GenerationError::new(GenerationErrorKind::MalformedResponse(
                format!("failed to parse JSON: {} (JSON: {}...)", e, preview),
            )))
        }
    }
}

/// Extract and parse a story with shotlist.
///
/// # Errors
///
/// Returns `MalformedResponse` when no JSON is present or it does not match
/// the shotlist shape, and `EmptyResponse` when the text is blank.
#[track_caller]
pub fn parse_shotlist(response: &str) -> Result<ShotlistDocument, GenerationError> {
    if response.trim().is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
    }
    let json = extract_json(response)?;
    let document: ShotlistDocument = parse_json(&json)?;
    if document.shots.is_empty() {
        tracing::warn!("Shotlist response contained no shots");
    }
    Ok(document)
}

/// Extract content from markdown code blocks.
///
/// Accepts ```language\n...\n``` as well as unlabelled fences. A missing
/// closing fence means the response was truncated; everything after the
/// opening fence is returned.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        let content = match response[content_start..].find("```") {
            Some(end) => &response[content_start..content_start + end],
            None => &response[content_start..],
        };
        return Some(content.trim().to_string());
    }

    let start = response.find("```")?;
    let content_start = start + 3;
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    let content = match response[skip_to..].find("```") {
        Some(end) => &response[skip_to..skip_to + end],
        None => &response[skip_to..],
    };
    Some(content.trim().to_string())
}

/// Extract content between balanced delimiters, skipping string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
