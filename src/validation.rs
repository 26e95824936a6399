//! Syntactic validation for login identifiers
//!
//! The sign-in form accepts either an email address or a username in the
//! same field; these checks decide which one was submitted, before any
//! store access happens.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pragmatic email shape check: one `@`, a non-empty local part, and a
/// dotted domain. Deliverability is not a syntactic property.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile")
});

/// Usernames: alphanumeric plus underscore, 3-32 characters, anchored
static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,32}$").expect("username regex must compile"));

#[must_use]
pub fn is_valid_email(login: &str) -> bool {
    EMAIL_REGEX.is_match(login)
}

#[must_use]
pub fn is_valid_username(login: &str) -> bool {
    USERNAME_REGEX.is_match(login)
}

/// Which syntactic class a submitted login identifier falls into.
/// Email wins when a string would satisfy both (usernames cannot contain
/// `@`, so this cannot actually happen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginKind {
    Email,
    Username,
}

/// Classify a login identifier, or `None` if it is neither shape
#[must_use]
pub fn classify_login(login: &str) -> Option<LoginKind> {
    if is_valid_email(login) {
        Some(LoginKind::Email)
    } else if is_valid_username(login) {
        Some(LoginKind::Username)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_classification() {
        assert_eq!(classify_login("amy@example.com"), Some(LoginKind::Email));
        assert_eq!(
            classify_login("amy.b+links@mail.example.co"),
            Some(LoginKind::Email)
        );
    }

    #[test]
    fn test_username_classification() {
        assert_eq!(classify_login("amy_b"), Some(LoginKind::Username));
        assert_eq!(classify_login("a1_"), Some(LoginKind::Username));
    }

    #[test]
    fn test_rejected_identifiers() {
        // Neither a valid email nor a valid username
        assert_eq!(classify_login("not-an-email-or-username!!"), None);
        assert_eq!(classify_login(""), None);
        assert_eq!(classify_login("ab"), None); // too short for a username
        assert_eq!(classify_login("has spaces"), None);
        assert_eq!(classify_login("@example.com"), None); // empty local part
        assert_eq!(classify_login("amy@nodot"), None);
    }

    #[test]
    fn test_username_length_bounds() {
        assert!(is_valid_username(&"a".repeat(32)));
        assert!(!is_valid_username(&"a".repeat(33)));
        assert!(!is_valid_username("aa"));
    }
}
