//! Common validation utilities
//!
//! The same rules back the request DTOs in the API layer and the domain
//! services, so a value accepted at the edge is accepted everywhere.

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a one-time code
pub const CODE_LENGTH: usize = 6;

/// Minimum accepted password length
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum accepted password length (bcrypt ignores bytes beyond 72)
pub const PASSWORD_MAX_LENGTH: usize = 72;

/// Lowercase letters, digits and underscores, 3 to 20 characters
pub static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]{3,20}$").expect("username pattern is valid"));

/// Exactly six ASCII digits
pub static CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("code pattern is valid"));

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Trim and lowercase an email address so it can be used as the unique identity
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check an email address (after normalisation)
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Check a username against the allowed character/length pattern
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Check that a one-time code is exactly six ASCII digits
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Check password length bounds
pub fn is_valid_password(password: &str) -> bool {
    (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&password.len())
}

/// Mask an email address for logging, e.g. `jo***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => String::from("***"),
    }
}
