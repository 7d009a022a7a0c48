//! Input contracts for the auth operations.
//!
//! These mirror the shapes the login and signup forms enforce; the session
//! manager applies them before spending a network round trip, so a caller
//! that skips form validation still cannot submit an impossible payload.
//! Messages are display-ready.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::{SignupRequest, UserRole};

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    Email,
    #[error("Password must be at least 6 characters")]
    Password,
    #[error("Name must be at least 2 characters")]
    Name,
    #[error("Phone number must be at least 10 digits")]
    Phone,
    #[error("Please select a valid role")]
    Role,
}

/// # Errors
///
/// Returns [`ValidationError::Email`] when `email` is not a plausible
/// address.
pub fn check_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::Email)
    }
}

/// # Errors
///
/// Returns the first violated login field contract.
pub fn check_login(email: &str, password: &str) -> Result<(), ValidationError> {
    check_email(email)?;
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::Password);
    }
    Ok(())
}

/// # Errors
///
/// Returns the first violated signup field contract. An `admin` role is a
/// [`ValidationError::Role`]: admin accounts cannot be self-registered.
pub fn check_signup(request: &SignupRequest) -> Result<(), ValidationError> {
    if request.name.trim().chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::Name);
    }
    check_login(&request.email, &request.password)?;
    if request.role == UserRole::Admin {
        return Err(ValidationError::Role);
    }
    let digits = request
        .phone_number
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    if digits < MIN_PHONE_DIGITS {
        return Err(ValidationError::Phone);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(role: UserRole) -> SignupRequest {
        SignupRequest {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            password: "secret1".to_string(),
            role,
            phone_number: "1234567890".to_string(),
        }
    }

    #[test]
    fn email_contract() {
        assert!(check_email("jane@x.com").is_ok());
        assert!(check_email("  jane@x.com ").is_ok());
        assert_eq!(check_email("jane"), Err(ValidationError::Email));
        assert_eq!(check_email("jane@x"), Err(ValidationError::Email));
        assert_eq!(check_email("jane @x.com"), Err(ValidationError::Email));
        assert_eq!(check_email(""), Err(ValidationError::Email));
    }

    #[test]
    fn login_contract() {
        assert!(check_login("jane@x.com", "secret1").is_ok());
        assert_eq!(
            check_login("jane@x.com", "short"),
            Err(ValidationError::Password)
        );
        assert_eq!(check_login("nope", "secret1"), Err(ValidationError::Email));
    }

    #[test]
    fn signup_contract_accepts_user_and_hospital() {
        assert!(check_signup(&signup(UserRole::User)).is_ok());
        assert!(check_signup(&signup(UserRole::Hospital)).is_ok());
    }

    #[test]
    fn signup_contract_rejects_admin_role() {
        assert_eq!(
            check_signup(&signup(UserRole::Admin)),
            Err(ValidationError::Role)
        );
    }

    #[test]
    fn signup_contract_checks_name_and_phone() {
        let mut request = signup(UserRole::User);
        request.name = "J".to_string();
        assert_eq!(check_signup(&request), Err(ValidationError::Name));

        let mut request = signup(UserRole::User);
        request.phone_number = "123-456".to_string();
        assert_eq!(check_signup(&request), Err(ValidationError::Phone));

        // separators do not count, digits do
        let mut request = signup(UserRole::User);
        request.phone_number = "(123) 456-7890".to_string();
        assert!(check_signup(&request).is_ok());
    }
}
