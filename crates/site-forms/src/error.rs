//! Submission error types.
//!
//! The submit operation is opaque to the form; it only reports that delivery
//! failed. The variants below let an adapter say why, for the diagnostic log,
//! while users always see the same retry message.

use thiserror::Error;

/// Failure reported by a submit operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// The receiving endpoint refused the message.
    #[error("Submission rejected: {reason}")]
    Rejected {
        /// Description of why it was refused.
        reason: String,
    },

    /// The endpoint could not be reached.
    #[error("Submission endpoint unreachable: {reason}")]
    Unreachable {
        /// Description of the transport failure.
        reason: String,
    },

    /// No answer arrived in time.
    #[error("Submission timed out after {after_ms}ms")]
    TimedOut {
        /// How long the adapter waited.
        after_ms: u64,
    },
}

impl SubmitError {
    /// Create a rejection from any error source.
    pub fn rejected(err: impl std::fmt::Display) -> Self {
        Self::Rejected {
            reason: err.to_string(),
        }
    }

    /// Create a transport failure from any error source.
    pub fn unreachable(err: impl std::fmt::Display) -> Self {
        Self::Unreachable {
            reason: err.to_string(),
        }
    }

    /// The message shown to the user. Identical for every cause.
    pub fn user_message(&self) -> &'static str {
        "Something went wrong while sending your message. Please try again."
    }

    /// A hint for the diagnostic log.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Rejected { .. } => Some("Check the form endpoint's validation and spam rules."),
            Self::Unreachable { .. } => Some("Check the network connection and the endpoint URL."),
            Self::TimedOut { .. } => None,
        }
    }
}
