/// Last user-visible result of a workflow action.
///
/// Successes and failures share one slot, but the variant is explicit so
/// callers branch on it instead of inspecting message text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Idle,
    Success(String),
    Failure { message: String, retryable: bool },
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    /// A remote failure; the UI offers a retry.
    pub fn remote_failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            retryable: true,
        }
    }

    /// A local rejection; nothing was sent, so there is nothing to retry.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            retryable: false,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn offers_retry(&self) -> bool {
        matches!(
            self,
            Self::Failure {
                retryable: true,
                ..
            }
        )
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Success(message) | Self::Failure { message, .. } => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_has_no_message() {
        assert_eq!(Outcome::default(), Outcome::Idle);
        assert!(Outcome::Idle.message().is_none());
        assert!(!Outcome::Idle.offers_retry());
    }

    #[test]
    fn success_never_offers_retry() {
        let outcome = Outcome::success("saved");
        assert!(outcome.is_success());
        assert!(!outcome.offers_retry());
        assert_eq!(outcome.message(), Some("saved"));
    }

    #[test]
    fn remote_failure_offers_retry_but_rejection_does_not() {
        assert!(Outcome::remote_failure("down").offers_retry());
        let rejected = Outcome::rejected("empty");
        assert!(rejected.is_failure());
        assert!(!rejected.offers_retry());
    }
}
