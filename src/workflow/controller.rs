use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use super::outcome::Outcome;
use crate::error::ValidationError;
use crate::newsletter::store::VariablesStore;
use crate::newsletter::types::{MAX_LINES_RANGE, NewsletterVariables, ToneOption, max_lines_in_range};
use crate::webhook::client::NewsletterBackend;

/// Independently gated async regions of the newsletter screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Region {
    Loading,
    Saving,
    Testing,
    Sending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyRegions {
    pub loading: bool,
    pub saving: bool,
    pub testing: bool,
    pub sending: bool,
}

impl BusyRegions {
    pub fn is_busy(&self, region: Region) -> bool {
        match region {
            Region::Loading => self.loading,
            Region::Saving => self.saving,
            Region::Testing => self.testing,
            Region::Sending => self.sending,
        }
    }

    pub fn any(&self) -> bool {
        self.loading || self.saving || self.testing || self.sending
    }

    fn flag_mut(&mut self, region: Region) -> &mut bool {
        match region {
            Region::Loading => &mut self.loading,
            Region::Saving => &mut self.saving,
            Region::Testing => &mut self.testing,
            Region::Sending => &mut self.sending,
        }
    }
}

/// Everything the newsletter screen displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    pub store: VariablesStore,
    /// Pending comment text, kept across failed sends.
    pub comment: String,
    pub outcome: Outcome,
    pub busy: BusyRegions,
    pub retry_count: u32,
}

impl WorkflowState {
    pub fn variables(&self) -> &NewsletterVariables {
        self.store.variables()
    }

    pub fn tone_options(&self) -> &[ToneOption] {
        self.store.tone_options()
    }
}

/// Clears its region's busy flag on drop, including when the owning future
/// is dropped mid-request.
struct BusyGuard<'a> {
    state: &'a Mutex<WorkflowState>,
    region: Region,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state.busy.flag_mut(self.region) = false;
        debug!(region = %self.region, "workflow.idle");
    }
}

/// Orchestrates load, save, test and comment against a [`NewsletterBackend`].
///
/// Operations take `&self` and may interleave across regions. The state lock
/// is never held across an `.await`; each operation writes back only the
/// fields it owns once its response resolves. Remote failures never
/// propagate: they land in [`WorkflowState::outcome`] and leave every other
/// field as it was. Local rejections also return `Err` so callers can tell
/// that nothing was sent.
pub struct NewsletterController<B> {
    backend: B,
    state: Mutex<WorkflowState>,
}

impl<B: NewsletterBackend> NewsletterController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Mutex::new(WorkflowState::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn state(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> WorkflowState {
        self.state().clone()
    }

    pub fn variables(&self) -> NewsletterVariables {
        self.state().store.variables().clone()
    }

    pub fn outcome(&self) -> Outcome {
        self.state().outcome.clone()
    }

    pub fn comment(&self) -> String {
        self.state().comment.clone()
    }

    pub fn retry_count(&self) -> u32 {
        self.state().retry_count
    }

    pub fn is_busy(&self, region: Region) -> bool {
        self.state().busy.is_busy(region)
    }

    // ── Field editors ────────────────────────────────────────────────────

    /// Any id is accepted; one missing from the tone list renders as unselected.
    pub fn select_tone(&self, tone_id: i64) {
        self.state().store.set_selected_tone_id(tone_id);
    }

    /// Out-of-range values are rejected and the previous value is kept.
    pub fn set_max_lines(&self, value: i64) -> Result<(), ValidationError> {
        if !max_lines_in_range(value) {
            return Err(ValidationError::MaxLinesOutOfRange(value));
        }
        let value = u32::try_from(value).map_err(|_| ValidationError::MaxLinesOutOfRange(value))?;
        self.state().store.set_max_lines(value);
        Ok(())
    }

    /// Stepper semantics: stops at the upper bound.
    pub fn increment_max_lines(&self) -> u32 {
        let mut state = self.state();
        let next = (state.store.variables().max_lines + 1).min(*MAX_LINES_RANGE.end());
        state.store.set_max_lines(next);
        next
    }

    /// Stepper semantics: stops at the lower bound.
    pub fn decrement_max_lines(&self) -> u32 {
        let mut state = self.state();
        let next = state
            .store
            .variables()
            .max_lines
            .saturating_sub(1)
            .max(*MAX_LINES_RANGE.start());
        state.store.set_max_lines(next);
        next
    }

    pub fn set_include_image(&self, include_image: bool) {
        self.state().store.set_include_image(include_image);
    }

    pub fn set_keywords(&self, keywords: impl Into<String>) {
        self.state().store.set_keywords(keywords);
    }

    pub fn set_comment(&self, comment: impl Into<String>) {
        self.state().comment = comment.into();
    }

    // ── Remote operations ────────────────────────────────────────────────

    fn begin(&self, region: Region) -> Result<BusyGuard<'_>, ValidationError> {
        let mut state = self.state();
        let flag = state.busy.flag_mut(region);
        if *flag {
            debug!(region = %region, "workflow.busy");
            return Err(ValidationError::Busy(region));
        }
        *flag = true;
        state.outcome = Outcome::Idle;
        debug!(region = %region, "workflow.start");
        Ok(BusyGuard {
            state: &self.state,
            region,
        })
    }

    fn settle(&self, outcome: Outcome) -> Outcome {
        self.state().outcome = outcome.clone();
        outcome
    }

    fn reject(&self, error: ValidationError, message: String) -> ValidationError {
        debug!(error = %error, "workflow.rejected");
        self.state().outcome = Outcome::rejected(message);
        error
    }

    /// Fetch variables and tone options, replacing both on success.
    pub async fn load(&self) -> Result<Outcome, ValidationError> {
        let busy = self.begin(Region::Loading)?;
        Ok(self.fetch(busy).await)
    }

    /// Manual retry: load again. The counter only moves when a load starts.
    pub async fn retry(&self) -> Result<Outcome, ValidationError> {
        let busy = self.begin(Region::Loading)?;
        self.state().retry_count += 1;
        Ok(self.fetch(busy).await)
    }

    async fn fetch(&self, _busy: BusyGuard<'_>) -> Outcome {
        match self.backend.fetch_variables().await {
            Ok(fetched) => {
                let mut state = self.state();
                state
                    .store
                    .replace(fetched.variables, fetched.tone_options);
                state.outcome = Outcome::Idle;
                Outcome::Idle
            }
            Err(err) => {
                warn!(error = %err, "newsletter.load_failed");
                self.settle(Outcome::remote_failure(t!("outcome.load_failed")))
            }
        }
    }

    /// Send the current variables as-is. Nothing is written back.
    pub async fn save(&self) -> Result<Outcome, ValidationError> {
        let _busy = self.begin(Region::Saving)?;
        let variables = self.variables();

        let outcome = match self.backend.save_variables(&variables).await {
            Ok(()) => Outcome::success(t!("outcome.saved")),
            Err(err) => {
                warn!(error = %err, "newsletter.save_failed");
                Outcome::remote_failure(t!("outcome.save_failed"))
            }
        };
        Ok(self.settle(outcome))
    }

    /// Generate content from the current keywords into `verification`.
    pub async fn test(&self) -> Result<Outcome, ValidationError> {
        let keywords = {
            let state = self.state();
            if !state.store.variables().has_keywords() {
                drop(state);
                return Err(self.reject(
                    ValidationError::EmptyKeywords,
                    t!("outcome.keywords_required").into_owned(),
                ));
            }
            state.store.variables().keywords.clone()
        };
        let _busy = self.begin(Region::Testing)?;

        let outcome = match self.backend.test_keywords(&keywords).await {
            Ok(content) => {
                self.state().store.set_verification(content);
                Outcome::success(t!("outcome.tested"))
            }
            Err(err) => {
                warn!(error = %err, "newsletter.test_failed");
                Outcome::remote_failure(t!("outcome.test_failed"))
            }
        };
        Ok(self.settle(outcome))
    }

    /// Refine `verification` with the pending comment. The comment is
    /// cleared on success and kept on failure.
    pub async fn send_comment(&self) -> Result<Outcome, ValidationError> {
        let (comment, variables) = {
            let state = self.state();
            if state.comment.trim().is_empty() {
                drop(state);
                return Err(self.reject(
                    ValidationError::EmptyComment,
                    t!("outcome.comment_required").into_owned(),
                ));
            }
            (state.comment.clone(), state.store.variables().clone())
        };
        let _busy = self.begin(Region::Sending)?;

        let outcome = match self.backend.send_comment(&comment, &variables).await {
            Ok(content) => {
                let mut state = self.state();
                state.store.set_verification(content);
                state.comment.clear();
                Outcome::success(t!("outcome.comment_sent"))
            }
            Err(err) => {
                warn!(error = %err, "newsletter.comment_failed");
                Outcome::remote_failure(t!("outcome.comment_failed"))
            }
        };
        Ok(self.settle(outcome))
    }
}
