//! # Validation Module
//!
//! Form checks for login, registration and checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (React)                                             │
//! │  ├── Required markers, input masks                                     │
//! │  └── Immediate feedback                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront commands (Rust)                                   │
//! │  └── THIS MODULE: checks before a request is sent                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: External API                                                 │
//! │  └── Authoritative checks (availability, uniqueness, payment)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use playzone_core::validation::{validate_email, validate_duration_hours};
//!
//! assert!(validate_email("budi@example.com").is_ok());
//! assert!(validate_duration_hours(0).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::CustomerData;
use crate::{MAX_BOOKING_HOURS, MIN_BOOKING_HOURS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Account Fields
// =============================================================================

/// Validates a person's display name (1-100 characters after trimming).
pub fn validate_person_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace, at most 254 characters
///
/// ## Example
/// ```rust
/// use playzone_core::validation::validate_email;
///
/// assert!(validate_email("rina@playzone.id").is_ok());
/// assert!(validate_email("rina@playzone").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain.tld"));
    }

    match domain.rfind('.') {
        Some(dot) if dot > 0 && dot < domain.len() - 1 => Ok(()),
        _ => Err(invalid("must look like name@domain.tld")),
    }
}

/// Validates a phone number.
///
/// ## Rules
/// - Optional leading `+`
/// - Spaces and dashes are ignored
/// - 9 to 15 digits remain
///
/// ## Example
/// ```rust
/// use playzone_core::validation::validate_phone;
///
/// assert!(validate_phone("0812-3456-7890").is_ok());
/// assert!(validate_phone("+62 812 3456 7890").is_ok());
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let body = phone.strip_prefix('+').unwrap_or(phone);
    let mut digits = 0usize;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' => {}
            _ => {
                return Err(ValidationError::InvalidFormat {
                    field: "phone".to_string(),
                    reason: "must contain only digits, spaces and dashes".to_string(),
                })
            }
        }
    }

    if !(9..=15).contains(&digits) {
        return Err(ValidationError::OutOfRange {
            field: "phone digits".to_string(),
            min: 9,
            max: 15,
        });
    }

    Ok(())
}

/// Validates a login username (3-50 characters: letters, digits, `.`, `_`, `-`).
///
/// Users may also log in with their email address, which is accepted as is.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.contains('@') {
        return validate_email(username);
    }

    if username.chars().count() < 3 {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: 3,
        });
    }

    if username.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, dots, underscores and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a password for registration (8-128 characters, at least one
/// letter and one digit).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    let len = password.chars().count();
    if len < 8 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        });
    }
    if len > 128 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 128,
        });
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err(ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: "must contain at least one letter and one number".to_string(),
        });
    }

    Ok(())
}

/// Validates the contact block of a booking.
pub fn validate_customer(customer: &CustomerData) -> ValidationResult<()> {
    validate_person_name(&customer.name)?;
    validate_email(&customer.email)?;
    validate_phone(&customer.phone)?;
    Ok(())
}

// =============================================================================
// Booking Fields
// =============================================================================

/// Validates a rental duration in hours.
///
/// ## Rules
/// - Between MIN_BOOKING_HOURS (1) and MAX_BOOKING_HOURS (12)
pub fn validate_duration_hours(hours: u32) -> ValidationResult<()> {
    if !(MIN_BOOKING_HOURS..=MAX_BOOKING_HOURS).contains(&hours) {
        return Err(ValidationError::OutOfRange {
            field: "duration".to_string(),
            min: MIN_BOOKING_HOURS as i64,
            max: MAX_BOOKING_HOURS as i64,
        });
    }

    Ok(())
}

/// Validates that a booking date is today or later.
pub fn validate_booking_date(date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if date < today {
        return Err(ValidationError::InPast {
            field: "date".to_string(),
        });
    }

    Ok(())
}

/// Validates and normalizes a promo code.
///
/// ## Returns
/// `None` for a blank code, otherwise the trimmed, upper-cased code.
///
/// ## Example
/// ```rust
/// use playzone_core::validation::validate_promo_code;
///
/// assert_eq!(validate_promo_code(" weekend-10 ").unwrap().as_deref(), Some("WEEKEND-10"));
/// assert_eq!(validate_promo_code("   ").unwrap(), None);
/// assert!(validate_promo_code("50% OFF").is_err());
/// ```
pub fn validate_promo_code(code: &str) -> ValidationResult<Option<String>> {
    let code = code.trim();

    if code.is_empty() {
        return Ok(None);
    }

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "promo code".to_string(),
            max: 32,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "promo code".to_string(),
            reason: "must contain only letters, numbers and hyphens".to_string(),
        });
    }

    Ok(Some(code.to_ascii_uppercase()))
}

/// Validates an optional event name (birthday party, tournament...).
///
/// ## Returns
/// `None` for a blank name, otherwise the trimmed name.
pub fn validate_event_name(name: &str) -> ValidationResult<Option<String>> {
    let name = name.trim();

    if name.is_empty() {
        return Ok(None);
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "event name".to_string(),
            max: 100,
        });
    }

    Ok(Some(name.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("budi@example.com").is_ok());
        assert!(validate_email("  budi.s@mail.co.id ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("budi").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("budi@example").is_err());
        assert!(validate_email("budi@.com").is_err());
        assert!(validate_email("budi@example.").is_err());
        assert!(validate_email("bu di@example.com").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("081234567890").is_ok());
        assert!(validate_phone("+62 812-3456-7890").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("0812").is_err());
        assert!(validate_phone("0812 3456 abcd").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("budi_s").is_ok());
        assert!(validate_username("budi@example.com").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("budi santoso").is_err());
        assert!(validate_username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("rahasia123").is_ok());

        assert!(matches!(
            validate_password("short1"),
            Err(ValidationError::TooShort { min: 8, .. })
        ));
        assert!(validate_password("onlyletters").is_err());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_customer() {
        let mut customer = CustomerData {
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            phone: "081234567890".to_string(),
        };
        assert!(validate_customer(&customer).is_ok());

        customer.phone = String::new();
        assert!(matches!(
            validate_customer(&customer),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_duration_hours() {
        assert!(validate_duration_hours(1).is_ok());
        assert!(validate_duration_hours(12).is_ok());
        assert!(validate_duration_hours(0).is_err());
        assert!(validate_duration_hours(13).is_err());
    }

    #[test]
    fn test_validate_booking_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert!(validate_booking_date(today, today).is_ok());
        assert!(validate_booking_date(today.succ_opt().unwrap(), today).is_ok());
        assert!(validate_booking_date(today.pred_opt().unwrap(), today).is_err());
    }

    #[test]
    fn test_validate_event_name() {
        assert_eq!(validate_event_name("  ").unwrap(), None);
        assert_eq!(
            validate_event_name(" Ulang tahun Dika ").unwrap().as_deref(),
            Some("Ulang tahun Dika")
        );
        assert!(validate_event_name(&"x".repeat(101)).is_err());
    }
}
