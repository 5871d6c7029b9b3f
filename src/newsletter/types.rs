use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Sentinel tone id meaning "no tone chosen".
pub const NO_TONE: i64 = -1;

pub const DEFAULT_MAX_LINES: u32 = 10;

/// Accepted range for `NewsletterVariables::max_lines`.
pub const MAX_LINES_RANGE: RangeInclusive<u32> = 1..=50;

/// One remote-defined writing style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneOption {
    pub id: i64,
    #[serde(default)]
    pub description: String,
}

/// Configurable newsletter state mirrored from the fetch webhook.
///
/// The remote side is the source of truth: a fetch replaces the whole value,
/// local edits mutate individual fields, and test/comment replace only
/// `verification`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterVariables {
    /// Id into the loaded tone set, or [`NO_TONE`].
    pub selected_tone_id: i64,
    pub max_lines: u32,
    pub include_image: bool,
    pub keywords: String,
    /// Latest generated content; may embed one markdown image token.
    pub verification: String,
}

impl Default for NewsletterVariables {
    fn default() -> Self {
        Self {
            selected_tone_id: NO_TONE,
            max_lines: DEFAULT_MAX_LINES,
            include_image: true,
            keywords: String::new(),
            verification: String::new(),
        }
    }
}

impl NewsletterVariables {
    /// Resolve the selected tone against `tones`. Stale or unknown ids resolve
    /// to `None`, the same as [`NO_TONE`].
    pub fn selected_tone<'a>(&self, tones: &'a [ToneOption]) -> Option<&'a ToneOption> {
        if self.selected_tone_id == NO_TONE {
            return None;
        }
        tones.iter().find(|tone| tone.id == self.selected_tone_id)
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords.trim().is_empty()
    }
}

/// Whether `value` may be stored as `max_lines`.
pub fn max_lines_in_range(value: i64) -> bool {
    u32::try_from(value).is_ok_and(|v| MAX_LINES_RANGE.contains(&v))
}
