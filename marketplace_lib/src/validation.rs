//! Input validation for user-supplied query values.

use crate::error::MarketplaceError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_FILTER_LENGTH: usize = 64;
pub const MAX_SLUG_LENGTH: usize = 64;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, MarketplaceError> {
    if input.len() > max_len {
        return Err(MarketplaceError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(MarketplaceError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search term: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, MarketplaceError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a listing type or category filter value.
pub fn validate_filter(input: &str) -> Result<String, MarketplaceError> {
    sanitize_text(input, MAX_FILTER_LENGTH).map(|s| s.to_lowercase())
}

/// Validate a city slug: lowercase ASCII letters, digits and hyphens.
pub fn validate_city_slug(input: &str) -> Result<String, MarketplaceError> {
    let slug = input.trim().to_lowercase();
    let valid = !slug.is_empty()
        && slug.len() <= MAX_SLUG_LENGTH
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(slug)
    } else {
        Err(MarketplaceError::InvalidInput(format!(
            "invalid city slug '{}'. Expected lowercase letters, digits and hyphens (e.g., tbilisi, new-york)",
            input
        )))
    }
}

/// Validate a server-assigned resource id.
pub fn validate_id(input: &str) -> Result<String, MarketplaceError> {
    let trimmed = input.trim();
    if !trimmed.is_empty()
        && trimmed.len() <= MAX_SLUG_LENGTH
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(trimmed.to_string())
    } else {
        Err(MarketplaceError::InvalidInput(format!(
            "invalid id '{}'. Expected letters, digits, '-' or '_'",
            input
        )))
    }
}

pub fn validate_limit(limit: u32) -> Result<u32, MarketplaceError> {
    if !(1..=100).contains(&limit) {
        return Err(MarketplaceError::InvalidInput(
            "limit must be between 1 and 100".to_string(),
        ));
    }
    Ok(limit)
}

pub fn validate_pages(pages: u32) -> Result<u32, MarketplaceError> {
    if !(1..=50).contains(&pages) {
        return Err(MarketplaceError::InvalidInput(
            "pages must be between 1 and 50".to_string(),
        ));
    }
    Ok(pages)
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
