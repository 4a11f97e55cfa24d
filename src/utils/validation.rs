use crate::utils::error::{ApiError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, reason: impl Into<String>) -> ApiError {
    ApiError::Validation {
        field: field_name.to_string(),
        reason: reason.into(),
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // local@domain.tld，不允許空白與多個 @
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.trim().is_empty() {
        return Err(invalid(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(invalid(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(field_name, format!("Invalid URL format: {}", e))),
    }
}

/// An API root: http(s) URL without query string or fragment, since endpoint
/// paths are appended to it.
pub fn validate_base_url(field_name: &str, url_str: &str) -> Result<Url> {
    let url = validate_url(field_name, url_str)?;
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            "base URL must not contain a query string or fragment",
        ));
    }
    Ok(url)
}

pub fn validate_email(field_name: &str, email: &str) -> Result<()> {
    if email_pattern().is_match(email) {
        Ok(())
    } else {
        Err(invalid(field_name, "must be a valid email address"))
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_min_length(field_name: &str, value: &str, min_chars: usize) -> Result<()> {
    if value.chars().count() < min_chars {
        return Err(invalid(
            field_name,
            format!("must be at least {} characters long", min_chars),
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: i64, min_value: i64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}
