use thiserror::Error;

use crate::workflow::Region;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `newsroom`.
///
/// Library callers match on these to decide what to show the user; the
/// binary wraps them in `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum NewsroomError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Webhook exchange ────────────────────────────────────────────────
    #[error("webhook: {0}")]
    Webhook(#[from] WebhookError),

    // ── Local input validation ──────────────────────────────────────────
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Webhook errors ─────────────────────────────────────────────────────────

/// Failure of a single remote exchange.
///
/// `Transport` means the server could not be reached or answered with a
/// non-success status. `Format` means it answered, but with nothing usable.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl WebhookError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{endpoint} webhook returned HTTP {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("{endpoint} webhook timed out")]
    Timeout { endpoint: &'static str },

    #[error("{endpoint} webhook unreachable: {message}")]
    Network {
        endpoint: &'static str,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("{endpoint} webhook returned invalid JSON: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },

    #[error("{endpoint} webhook returned no records")]
    EmptyPayload { endpoint: &'static str },

    #[error("response carried no usable content")]
    EmptyContent,
}

// ─── Validation errors ──────────────────────────────────────────────────────

/// Input rejected locally; none of these ever reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("keywords are empty")]
    EmptyKeywords,

    #[error("comment is empty")]
    EmptyComment,

    #[error("max lines {0} is outside 1..=50")]
    MaxLinesOutOfRange(i64),

    #[error("{0} is already in progress")]
    Busy(Region),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, NewsroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = NewsroomError::Config(ConfigError::Validation("bad url".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn status_error_carries_code() {
        let err = WebhookError::from(TransportError::Status {
            endpoint: "save",
            status: 500,
            body: "boom".into(),
        });
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn format_error_is_not_transport() {
        let err = WebhookError::from(FormatError::EmptyContent);
        assert!(err.is_format());
        assert!(!err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn busy_validation_names_region() {
        let err = NewsroomError::Validation(ValidationError::Busy(Region::Testing));
        assert!(err.to_string().contains("testing"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let err: NewsroomError = anyhow_err.into();
        assert!(err.to_string().contains("something went wrong"));
    }
}
