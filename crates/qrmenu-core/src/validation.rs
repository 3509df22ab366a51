//! Input validation helpers.
//!
//! Every create/update payload is checked with these before the store
//! is touched, so a rejected request never produces a write.

use rust_decimal::Decimal;

use crate::error::{QrMenuError, QrMenuResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: establishment, menu, category, item.
pub const MAX_NAME_LEN: usize = 200;

/// Street addresses.
pub const MAX_ADDRESS_LEN: usize = 500;

/// Free-form descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// City, country, postal code, phone.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321).
pub const MAX_EMAIL_LEN: usize = 254;

/// Websites and image URLs.
pub const MAX_URL_LEN: usize = 2048;

/// Owner name bounds, inclusive.
pub const OWNER_NAME_LEN: (usize, usize) = (2, 100);

/// Owner mobile bounds, inclusive.
pub const OWNER_MOBILE_LEN: (usize, usize) = (10, 20);

/// Minimum number of digits for a value to count as a phone number.
const MIN_PHONE_DIGITS: usize = 7;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> QrMenuResult<()> {
    if value.trim().is_empty() {
        return Err(QrMenuError::validation(format!("{field} must not be empty")));
    }
    validate_max_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> QrMenuResult<()> {
    match value {
        Some(v) => validate_max_len(v, field, max_len),
        None => Ok(()),
    }
}

/// Validate a character count against an inclusive range.
pub fn validate_len_range(value: &str, field: &str, (min, max): (usize, usize)) -> QrMenuResult<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(QrMenuError::validation(format!(
            "{field} must be between {min} and {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Phone-number shape: an optional leading `+`, then digits with the
/// separators space, `-`, `.`, `(` and `)`.
pub fn validate_phone(value: &str, field: &str) -> QrMenuResult<()> {
    let body = value.trim().strip_prefix('+').unwrap_or(value.trim());
    let allowed = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'));
    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !allowed || digits < MIN_PHONE_DIGITS {
        return Err(QrMenuError::validation(format!(
            "{field} is not a valid phone number"
        )));
    }
    Ok(())
}

/// Minimal `local@domain.tld` check.
pub fn validate_email(value: &str, field: &str) -> QrMenuResult<()> {
    validate_max_len(value, field, MAX_EMAIL_LEN)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(QrMenuError::validation(format!(
            "{field} is not a valid email address"
        )));
    }
    Ok(())
}

/// Absolute `http`/`https` URL.
///
/// Websites end up in a `Location` header, so whitespace and control
/// characters are refused here.
pub fn validate_url(value: &str, field: &str) -> QrMenuResult<()> {
    validate_max_len(value, field, MAX_URL_LEN)?;
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    let printable = !value
        .chars()
        .any(|c| c.is_whitespace() || c.is_control());
    match rest {
        Some(host) if !host.is_empty() && printable => Ok(()),
        _ => Err(QrMenuError::validation(format!(
            "{field} must be an absolute http(s) URL"
        ))),
    }
}

pub fn validate_price(price: Decimal, field: &str) -> QrMenuResult<()> {
    if price <= Decimal::ZERO {
        return Err(QrMenuError::validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

/// Three-letter ISO 4217 style code (`USD`, `EUR`).
pub fn validate_currency(value: &str, field: &str) -> QrMenuResult<()> {
    if value.len() != 3 || !value.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(QrMenuError::validation(format!(
            "{field} must be a three-letter currency code"
        )));
    }
    Ok(())
}

fn validate_max_len(value: &str, field: &str, max_len: usize) -> QrMenuResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(QrMenuError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank() {
        assert!(validate_required_text("   ", "name", 10).is_err());
        assert!(validate_required_text("Blue Door", "name", 10).is_ok());
        assert!(validate_required_text("Blue Door Café", "name", 10).is_err());
    }

    #[test]
    fn phone_shape() {
        assert!(validate_phone("+1 (555) 123-4567", "mobile").is_ok());
        assert!(validate_phone("0612.34.56.78", "mobile").is_ok());
        assert!(validate_phone("call me maybe", "mobile").is_err());
        assert!(validate_phone("12-34", "mobile").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("owner@bluedoor.cafe", "email").is_ok());
        assert!(validate_email("owner@localhost", "email").is_err());
        assert!(validate_email("@bluedoor.cafe", "email").is_err());
        assert!(validate_email("owner@@bluedoor.cafe", "email").is_err());
    }

    #[test]
    fn len_range_counts_chars() {
        assert!(validate_len_range("Zoë", "name", OWNER_NAME_LEN).is_ok());
        assert!(validate_len_range("Z", "name", OWNER_NAME_LEN).is_err());
    }

    #[test]
    fn url_requires_scheme() {
        assert!(validate_url("https://bluedoor.cafe", "website").is_ok());
        assert!(validate_url("bluedoor.cafe", "website").is_err());
        assert!(validate_url("https://", "website").is_err());
    }

    #[test]
    fn url_with_control_character_is_rejected() {
        assert!(validate_url("https://bad.example/\u{1}x", "website").is_err());
        assert!(validate_url("https://bad.example/\u{7f}", "website").is_err());
        assert!(validate_url("https://bad.example/a\tb", "website").is_err());
        assert!(validate_url("https://café.example/menü", "website").is_ok());
    }

    #[test]
    fn price_and_currency() {
        assert!(validate_price(Decimal::new(450, 2), "price").is_ok());
        assert!(validate_price(Decimal::ZERO, "price").is_err());
        assert!(validate_currency("EUR", "currency").is_ok());
        assert!(validate_currency("eur", "currency").is_err());
    }
}
