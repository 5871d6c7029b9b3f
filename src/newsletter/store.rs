use super::types::{NewsletterVariables, ToneOption};

/// In-memory holder for the newsletter state of one screen session.
///
/// Field setters replace one value each; [`VariablesStore::replace`] swaps
/// everything after a fetch. Range checks belong to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariablesStore {
    variables: NewsletterVariables,
    tone_options: Vec<ToneOption>,
}

impl VariablesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variables(&self) -> &NewsletterVariables {
        &self.variables
    }

    pub fn tone_options(&self) -> &[ToneOption] {
        &self.tone_options
    }

    pub fn selected_tone(&self) -> Option<&ToneOption> {
        self.variables.selected_tone(&self.tone_options)
    }

    pub fn replace(&mut self, variables: NewsletterVariables, tone_options: Vec<ToneOption>) {
        self.variables = variables;
        self.tone_options = tone_options;
    }

    pub fn set_selected_tone_id(&mut self, id: i64) {
        self.variables.selected_tone_id = id;
    }

    pub fn set_max_lines(&mut self, max_lines: u32) {
        self.variables.max_lines = max_lines;
    }

    pub fn set_include_image(&mut self, include_image: bool) {
        self.variables.include_image = include_image;
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.variables.keywords = keywords.into();
    }

    pub fn set_verification(&mut self, verification: impl Into<String>) {
        self.variables.verification = verification.into();
    }
}
