//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of characters of a response body kept in an HTTP error.
pub const MAX_ERROR_BODY_CHARS: usize = 200;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Backend/Load Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Malformed response: {message}")]
    MalformedBody { message: String },

    #[error("Record {index} has no '{field}' field")]
    MissingRecordId { index: usize, field: String },

    #[error("Invalid endpoint URL: {message}")]
    InvalidUrl { message: String },

    // ─────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build an HTTP status error, keeping at most [`MAX_ERROR_BODY_CHARS`]
    /// characters of the (trimmed) response body.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let trimmed = message.trim();
        let message = if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
            let mut cut: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
            cut.push('…');
            cut
        } else {
            trimmed.to_string()
        };
        Self::Http { status, message }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBody {
            message: message.into(),
        }
    }

    pub fn missing_record_id(index: usize, field: impl Into<String>) -> Self {
        Self::MissingRecordId {
            index,
            field: field.into(),
        }
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }

    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    /// Whether this error ended a backend load attempt.
    ///
    /// These are the failures the explorer converts into an error banner
    /// with a retry affordance.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. }
                | Error::Http { .. }
                | Error::MalformedBody { .. }
                | Error::MissingRecordId { .. }
                | Error::Json(_)
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
