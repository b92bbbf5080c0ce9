//! # Client Error Types
//!
//! Error types for API calls, configuration and session storage.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     HTTP Status         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http (reqwest) │  │  Unauthorized (401)     │ │
//! │  │  InvalidUrl     │  │  InvalidResponse│  │  Forbidden (403)        │ │
//! │  │  ConfigLoad/Save│  │  Serialization  │  │  NotFound (404)         │ │
//! │  └─────────────────┘  └─────────────────┘  │  Validation (400, 422)  │ │
//! │                                            │  Server (other)         │ │
//! │  ┌─────────────────┐  ┌─────────────────┐  └─────────────────────────┘ │
//! │  │    Session      │  │     Domain      │                              │
//! │  │                 │  │                 │                              │
//! │  │  SessionStorage │  │  Core           │                              │
//! │  │  Io             │  │  Submission-    │                              │
//! │  │                 │  │  InProgress     │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What the customer sees
//! Only three things ever reach a toast: a domain/validation message, the
//! "please log in" redirect, or [`GENERIC_FAILURE_MESSAGE`]. That mapping
//! lives in [`ClientError::user_message`] and nowhere else.

use playzone_core::CoreError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// The one message shown for every server or network failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Client error type covering every way a call can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// HTTP request failed before a status was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // =========================================================================
    // HTTP Status Errors
    // =========================================================================
    /// 401: the session is missing or expired.
    #[error("Authentication required")]
    Unauthorized,

    /// 403
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 400 / 422 from the server.
    #[error("Rejected by server: {0}")]
    Validation(String),

    /// Any other non-success status.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    // =========================================================================
    // Session Errors
    // =========================================================================
    /// Session file unreadable or unwritable.
    #[error("Session storage error: {0}")]
    SessionStorage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Request assembly or form validation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A submission is already in flight.
    #[error("A submission is already in progress")]
    SubmissionInProgress,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl From<playzone_core::ValidationError> for ClientError {
    fn from(err: playzone_core::ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if the caller should drop the session and send the
    /// customer to the login screen.
    pub fn is_login_required(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// Returns true if the error came from local input checks rather than
    /// the network.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ClientError::Core(_))
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Validation(_) => Some(400),
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The message shown to the customer.
    ///
    /// Local input errors keep their own text. Everything that went wrong on
    /// the wire or on disk collapses to [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Core(err) => err.to_string(),
            ClientError::Unauthorized => "Please log in to continue.".to_string(),
            ClientError::SubmissionInProgress => {
                "Your request is already being sent. Please wait.".to_string()
            }
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
