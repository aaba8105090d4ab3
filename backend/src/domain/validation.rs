//! Input validation applied before anything reaches storage.
//!
//! Every check returns a [`DomainError::Validation`] naming the offending
//! field so the client can attach the message to the right input.

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::{DomainError, DomainResult};

/// Exclusive upper bound for any monetary figure
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;
pub const MIN_PASSWORD_LENGTH: usize = 12;
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid username regex"));

/// Strip characters that could smuggle markup into rendered text
pub fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn validate_email(email: &str) -> DomainResult<()> {
    if email.trim().is_empty() {
        return Err(DomainError::validation("email", "Email is required"));
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(DomainError::validation("email", "Please enter a valid email address"));
    }
    Ok(())
}

/// Strength rules for new passwords. Sign-in never re-checks these.
pub fn validate_new_password(password: &str) -> DomainResult<()> {
    let fail = |message: &str| Err(DomainError::validation("password", message));

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return fail("Password must be at least 12 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return fail("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return fail("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return fail("Password must contain at least one number");
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return fail("Password must contain at least one special character");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> DomainResult<()> {
    let length = name.chars().count();
    if !(2..=50).contains(&length) {
        return Err(DomainError::validation("name", "Name must be between 2 and 50 characters"));
    }
    if !name.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(DomainError::validation("name", "Name can only contain letters and spaces"));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> DomainResult<()> {
    let length = username.chars().count();
    if !(3..=30).contains(&length) {
        return Err(DomainError::validation(
            "username",
            "Username must be between 3 and 30 characters",
        ));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(DomainError::validation(
            "username",
            "Username can only contain letters, numbers and underscores",
        ));
    }
    if username.starts_with('_') || username.ends_with('_') || username.contains("__") {
        return Err(DomainError::validation(
            "username",
            "Username cannot start or end with an underscore or contain consecutive underscores",
        ));
    }
    Ok(())
}

pub fn validate_category(category: &str) -> DomainResult<()> {
    if category.is_empty() {
        return Err(DomainError::validation("category", "Category is required"));
    }
    if category.chars().count() > 50 {
        return Err(DomainError::validation("category", "Category cannot exceed 50 characters"));
    }
    Ok(())
}

/// Non-negative, finite and below [`MAX_AMOUNT`]
pub fn validate_money(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::validation(field, format!("{} must be a number", field)));
    }
    if value < 0.0 {
        return Err(DomainError::validation(field, format!("{} cannot be negative", field)));
    }
    if value >= MAX_AMOUNT {
        return Err(DomainError::validation(
            field,
            format!("{} must be less than 1,000,000,000", field),
        ));
    }
    Ok(())
}

/// Like [`validate_money`] but zero is rejected too
pub fn validate_amount(value: f64) -> DomainResult<()> {
    validate_money("amount", value)?;
    if value <= 0.0 {
        return Err(DomainError::validation("amount", "amount must be greater than zero"));
    }
    Ok(())
}

pub fn validate_year(year: i32) -> DomainResult<()> {
    if !(1900..=2100).contains(&year) {
        return Err(DomainError::validation("year", "Year must be between 1900 and 2100"));
    }
    Ok(())
}

pub fn validate_month_number(month_number: u32) -> DomainResult<()> {
    if !(1..=12).contains(&month_number) {
        return Err(DomainError::validation("month_number", "Month number must be between 1 and 12"));
    }
    Ok(())
}
