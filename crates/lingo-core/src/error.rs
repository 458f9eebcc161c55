use std::fmt;

/// User-facing failure taxonomy. Everything here is recoverable
/// except `Unavailable`, which is fatal to session bootstrap.
// Display/Error are implemented by hand because thiserror treats any
// field named `source` as an error source, and this `source` is a
// language name, not a cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Unavailable,

    /// Transient per-request failure; clears the pending output only.
    Network(String),

    /// Validation failure on an explicit user action; no state change.
    IncompatibleSwap { from: String, to: String },

    /// The effective source lists no targets at all. Translation is
    /// aborted and the previous output left untouched.
    NoValidTarget { source: String },

    /// The backend reported an explicit error payload.
    Translation(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str(
                "Failed to initialize application. Please check the connection to the server.",
            ),
            Self::Network(msg) => f.write_str(msg),
            Self::IncompatibleSwap { from, to } => {
                write!(f, "Cannot swap: {from} does not support translating to {to}")
            }
            Self::NoValidTarget { source } => {
                write!(f, "No valid target language for {source}")
            }
            Self::Translation(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for SessionError {}

impl SessionError {
    pub fn translation_failure(message: Option<String>) -> Self {
        Self::Translation(
            message.unwrap_or_else(|| "An unknown translation error occurred.".to_string()),
        )
    }
}
