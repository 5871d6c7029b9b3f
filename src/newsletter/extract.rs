//! Normalizes heterogeneous webhook payloads into one content string.
//!
//! The content-generation workflow has answered with several shapes over
//! time (bare object, one-element array, text nested under `response.body`
//! or `response`). Each candidate location is an [`ExtractionRule`]; rules
//! are tried in table order and the first non-empty string wins.

use serde_json::Value;

use super::markdown::{image_token, strip};
use crate::error::FormatError;

/// Alt text used for the image token appended to extracted content.
pub const GENERATED_IMAGE_ALT: &str = "Generated Image";

static NULL: Value = Value::Null;

/// A JSON path probed for a string value.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRule {
    pub path: &'static [&'static str],
}

impl ExtractionRule {
    const fn new(path: &'static [&'static str]) -> Self {
        Self { path }
    }

    /// The string at this rule's path, if present, a string, and non-blank.
    pub fn apply<'a>(&self, value: &'a Value) -> Option<&'a str> {
        let mut current = value;
        for key in self.path {
            current = current.get(*key)?;
        }
        current.as_str().filter(|text| !text.trim().is_empty())
    }
}

/// Text locations, highest priority first.
pub const TEXT_RULES: [ExtractionRule; 5] = [
    ExtractionRule::new(&["response", "body", "post"]),
    ExtractionRule::new(&["post"]),
    ExtractionRule::new(&["verification"]),
    ExtractionRule::new(&["response", "verification"]),
    ExtractionRule::new(&["body"]),
];

/// Image locations, highest priority first.
pub const IMAGE_RULES: [ExtractionRule; 3] = [
    ExtractionRule::new(&["image"]),
    ExtractionRule::new(&["response", "body", "image"]),
    ExtractionRule::new(&["response", "image"]),
];

/// The record rules are evaluated against: the first element of an array,
/// or the value itself.
pub fn primary_record(raw: &Value) -> &Value {
    match raw {
        Value::Array(items) => items.first().unwrap_or(&NULL),
        other => other,
    }
}

fn first_match<'a>(rules: &[ExtractionRule], record: &'a Value) -> Option<&'a str> {
    rules.iter().find_map(|rule| rule.apply(record))
}

/// Image reference carried by the payload. Only strings count; the
/// placeholder string `"false"` and JSON booleans both mean "no image".
pub fn extract_image(raw: &Value) -> Option<&str> {
    first_match(&IMAGE_RULES, primary_record(raw)).filter(|image| image.trim() != "false")
}

/// Text carried by the payload, with any image tokens already removed.
pub fn extract_text(raw: &Value) -> String {
    first_match(&TEXT_RULES, primary_record(raw))
        .map(|text| strip(text).trim().to_string())
        .unwrap_or_default()
}

/// Combine extracted text and image into one content string.
///
/// The image, when present, is appended as a single token after a blank
/// line. Fails when neither yields anything.
pub fn extract(raw: &Value) -> Result<String, FormatError> {
    let mut content = extract_text(raw);

    if let Some(image) = extract_image(raw) {
        if !content.is_empty() {
            content.push_str("\n\n");
        }
        content.push_str(&image_token(GENERATED_IMAGE_ALT, image.trim()));
    }

    if content.is_empty() {
        return Err(FormatError::EmptyContent);
    }
    Ok(content)
}
