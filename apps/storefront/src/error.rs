//! # Notice Type
//!
//! What the frontend receives when a command fails.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in PlayZone                               │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, Notice>                                                     │
//! │         │                                                              │
//! │         ▼                                                              │
//! │  CoreError / ValidationError ────────► VALIDATION_ERROR (own message)  │
//! │  CoreError::InvalidStep / NotVisited ─► INVALID_STEP                   │
//! │  ClientError::Unauthorized ──────────► LOGIN_REQUIRED                  │
//! │  ClientError::SubmissionInProgress ──► BUSY                            │
//! │  any other ClientError ──────────────► REQUEST_FAILED (generic text)   │
//! │                                                                         │
//! │  Frontend:                                                             │
//! │    switch (notice.code) {                                              │
//! │      case 'LOGIN_REQUIRED': navigate('/login'); break;                 │
//! │      default: toast(notice.message);                                   │
//! │    }                                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use playzone_client::ClientError;
use playzone_core::{CoreError, ValidationError};
use serde::Serialize;

/// Toast payload returned from commands.
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Please choose a unit before booking"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Machine-readable code for programmatic handling
    pub code: NoticeCode,

    /// Human-readable message for display
    pub message: String,
}

/// Notice codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeCode {
    /// Form input rejected before anything was sent
    ValidationError,

    /// Session missing or expired; go to the login screen
    LoginRequired,

    /// The API call failed for any other reason
    RequestFailed,

    /// A submission is already running
    Busy,

    /// Wizard step out of range or not yet reached
    InvalidStep,
}

pub type NoticeResult<T> = Result<T, Notice>;

impl Notice {
    pub fn new(code: NoticeCode, message: impl Into<String>) -> Self {
        Notice {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Notice::new(NoticeCode::ValidationError, message)
    }

    pub fn is_login_required(&self) -> bool {
        self.code == NoticeCode::LoginRequired
    }
}

impl From<CoreError> for Notice {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidStep { .. } | CoreError::StepNotVisited { .. } => {
                Notice::new(NoticeCode::InvalidStep, err.to_string())
            }
            other => Notice::validation(other.to_string()),
        }
    }
}

impl From<ValidationError> for Notice {
    fn from(err: ValidationError) -> Self {
        Notice::from(CoreError::Validation(err))
    }
}

impl From<ClientError> for Notice {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Core(core) => Notice::from(core),
            ClientError::Unauthorized => Notice::new(NoticeCode::LoginRequired, err.user_message()),
            ClientError::SubmissionInProgress => Notice::new(NoticeCode::Busy, err.user_message()),
            other => {
                tracing::error!(error = %other, status = ?other.status(), "Request failed");
                Notice::new(NoticeCode::RequestFailed, other.user_message())
            }
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for Notice {}

#[cfg(test)]
mod tests {
    use super::*;
    use playzone_client::GENERIC_FAILURE_MESSAGE;

    #[test]
    fn test_client_errors_collapse() {
        let notice = Notice::from(ClientError::Unauthorized);
        assert!(notice.is_login_required());

        let notice = Notice::from(ClientError::Server {
            status: 500,
            message: "stack trace here".into(),
        });
        assert_eq!(notice.code, NoticeCode::RequestFailed);
        assert_eq!(notice.message, GENERIC_FAILURE_MESSAGE);

        let notice = Notice::from(ClientError::SubmissionInProgress);
        assert_eq!(notice.code, NoticeCode::Busy);
    }

    #[test]
    fn test_core_errors_keep_message() {
        let notice = Notice::from(CoreError::IncompleteSelection {
            field: "unit".into(),
        });
        assert_eq!(notice.code, NoticeCode::ValidationError);
        assert_eq!(notice.message, "Please choose a unit before booking");

        let notice = Notice::from(ClientError::Core(CoreError::InvalidStep { index: 7 }));
        assert_eq!(notice.code, NoticeCode::InvalidStep);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Notice::validation("Cart is empty")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "Cart is empty");
    }
}
