//! Error taxonomy for the notification pipeline.

use thiserror::Error;

/// Failures that can abort construction of a notification before delivery.
///
/// None of these escape [`crate::notification::dispatch_analysis`]: every
/// variant is logged and swallowed at the dispatch boundary, so the host's
/// analysis pipeline never fails because a notification could not be sent.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A required builder input was missing. A caller bug: loud in
    /// construction and tests, never reached in normal dispatch.
    #[error("{0} is required; it must not be empty")]
    InvalidArgument(&'static str),

    /// The webhook URL could not be parsed. Delivery for this event is
    /// aborted; the next analysis event starts fresh.
    #[error("invalid webhook URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP transport could not be constructed.
    #[error("failed to build HTTP transport")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_names_the_input() {
        let error = NotifyError::InvalidArgument("project_url");
        assert_eq!(
            error.to_string(),
            "project_url is required; it must not be empty"
        );
    }

    #[test]
    fn test_invalid_url_carries_the_offending_value() {
        let error = NotifyError::InvalidUrl {
            url: "not a url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(error.to_string().contains("not a url"));
    }
}
