use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex pattern for validating email addresses
    /// Format: local@domain.tld with no whitespace
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern");
}

/// Returns true if the given string looks like a valid email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
