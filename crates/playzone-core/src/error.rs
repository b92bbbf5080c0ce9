//! # Error Types
//!
//! Domain-specific error types for playzone-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  playzone-core errors (this file)                                      │
//! │  ├── CoreError        - Booking flow / cart rule violations            │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  playzone-client errors (separate crate)                               │
//! │  └── ClientError      - HTTP, config, session storage failures         │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── Notice           - What the frontend toast shows (serialized)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → Notice → Toast      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, step index, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent booking-flow rule violations. The stores
/// themselves never fail; these come out of navigation and submission.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A booking selection field needed for submission is still empty.
    ///
    /// ## When This Occurs
    /// ```text
    /// Food step → "Book now"
    ///      │
    ///      ▼
    /// BookingRequest::assemble()
    ///      │
    ///      ▼
    /// selection.unit_id == None
    ///      │
    ///      ▼
    /// IncompleteSelection { field: "unit" }
    ///      │
    ///      ▼
    /// Toast: "Please choose a unit before booking"
    /// ```
    #[error("Please choose a {field} before booking")]
    IncompleteSelection { field: String },

    /// A step index outside `[1, 4]` was requested.
    #[error("Invalid booking step {index}: must be between 1 and 4")]
    InvalidStep { index: u8 },

    /// Jumping forward to a step that has not been visited yet.
    #[error("Step {step} has not been reached yet")]
    StepNotVisited { step: u8 },

    /// Checkout requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The promo code is past its validity date.
    #[error("Promo code {code} has expired")]
    PromoExpired { code: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the login, registration and checkout form checks before any
/// request leaves the client.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email, bad phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Date lies before today.
    #[error("{field} cannot be in the past")]
    InPast { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::IncompleteSelection {
            field: "unit".to_string(),
        };
        assert_eq!(err.to_string(), "Please choose a unit before booking");

        let err = CoreError::InvalidStep { index: 7 };
        assert_eq!(
            err.to_string(),
            "Invalid booking step 7: must be between 1 and 4"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        };
        assert_eq!(err.to_string(), "password must be at least 8 characters");

        let err = ValidationError::InPast {
            field: "date".to_string(),
        };
        assert_eq!(err.to_string(), "date cannot be in the past");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
