//! Wire schema of the four newsletter webhooks.
//!
//! Field names follow the remote workflow (`ton`, `n_lignes`, `list_ton`).
//! Request bodies are typed; the fetch response is read field by field from
//! a generic JSON value because its shape is not trusted.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::FormatError;
use crate::newsletter::markdown::strip;
use crate::newsletter::types::{
    DEFAULT_MAX_LINES, NO_TONE, NewsletterVariables, ToneOption, max_lines_in_range,
};

#[derive(Debug, Serialize)]
pub struct SaveRequest<'a> {
    pub ton: i64,
    pub n_lignes: u32,
    pub image: bool,
    pub keywords: &'a str,
    pub verification: &'a str,
}

impl<'a> From<&'a NewsletterVariables> for SaveRequest<'a> {
    fn from(vars: &'a NewsletterVariables) -> Self {
        Self {
            ton: vars.selected_tone_id,
            n_lignes: vars.max_lines,
            image: vars.include_image,
            keywords: &vars.keywords,
            verification: &vars.verification,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TestRequest<'a> {
    pub keywords: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CommentRequest<'a> {
    pub comment: &'a str,
    /// Current content with image tokens removed, so inline payloads meant
    /// for local display are not sent back.
    pub verification: String,
    pub ton: i64,
    pub n_lignes: u32,
    pub image: bool,
    pub keywords: &'a str,
}

impl<'a> CommentRequest<'a> {
    pub fn new(comment: &'a str, vars: &'a NewsletterVariables) -> Self {
        Self {
            comment,
            verification: strip(&vars.verification).trim().to_string(),
            ton: vars.selected_tone_id,
            n_lignes: vars.max_lines,
            image: vars.include_image,
            keywords: &vars.keywords,
        }
    }
}

/// Decoded fetch response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedVariables {
    pub variables: NewsletterVariables,
    pub tone_options: Vec<ToneOption>,
}

impl FetchedVariables {
    /// Decode the first record of a fetch response. Missing, null, or
    /// mistyped fields fall back to the placeholder defaults.
    pub fn from_payload(raw: &Value) -> Result<Self, FormatError> {
        let record = raw
            .as_array()
            .and_then(|items| items.first())
            .filter(|record| record.is_object())
            .ok_or(FormatError::EmptyPayload { endpoint: "fetch" })?;

        let max_lines = match record.get("n_lignes").and_then(Value::as_i64) {
            Some(value) if max_lines_in_range(value) => {
                u32::try_from(value).unwrap_or(DEFAULT_MAX_LINES)
            }
            Some(value) => {
                warn!(n_lignes = value, "fetched max lines out of range, using default");
                DEFAULT_MAX_LINES
            }
            None => DEFAULT_MAX_LINES,
        };

        let variables = NewsletterVariables {
            selected_tone_id: record.get("ton").and_then(Value::as_i64).unwrap_or(NO_TONE),
            max_lines,
            include_image: record.get("image").and_then(Value::as_bool).unwrap_or(true),
            keywords: string_field(record, "keywords"),
            verification: string_field(record, "verification"),
        };

        let tone_options = record
            .get("list_ton")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value::<ToneOption>(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            variables,
            tone_options,
        })
    }
}

fn string_field(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
