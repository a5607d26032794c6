use thiserror::Error;

pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to unfold logic.";

/// Why a submission failed. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnfoldError {
    /// The engine (or the proxy) answered with a non-2xx status.
    #[error("Error: {status} {status_text}")]
    Http { status: u16, status_text: String },
    /// The request never completed or the body was not valid JSON.
    #[error("{}", transport_message(.0))]
    Transport(Option<String>),
}

fn transport_message(reason: &Option<String>) -> &str {
    match reason.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => FALLBACK_ERROR_MESSAGE,
    }
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_has_status_and_text() {
        let err = UnfoldError::Http {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "Error: 500 Internal Server Error");
    }

    #[test]
    fn transport_error_without_reason_uses_fallback() {
        assert_eq!(
            UnfoldError::Transport(None).to_string(),
            "Failed to unfold logic."
        );
        assert_eq!(
            UnfoldError::Transport(Some(String::new())).to_string(),
            "Failed to unfold logic."
        );
    }

    #[test]
    fn transport_error_keeps_reason() {
        let err = UnfoldError::Transport(Some("connection refused".into()));
        assert_eq!(err.to_string(), "connection refused");
    }
}
