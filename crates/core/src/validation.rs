//! Field validation for user-supplied lead, template, and account data.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a lead's client name.
pub const MAX_CLIENT_NAME_LENGTH: usize = 200;

/// Maximum length for a template name.
pub const MAX_TEMPLATE_NAME_LENGTH: usize = 200;

/// Maximum length for a message body or template content.
pub const MAX_MESSAGE_LENGTH: usize = 20_000;

/// Minimum length for a user's display name.
pub const MIN_USER_NAME_LENGTH: usize = 2;

/// Maximum number of leads in one bulk request.
pub const MAX_BULK_LEADS: usize = 500;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Require a non-blank string no longer than `max` characters.
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Loose email shape check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Validate an optional email field. Blank values are allowed (treated as absent).
pub fn validate_optional_email(email: Option<&str>) -> Result<(), CoreError> {
    match email.map(str::trim) {
        Some(e) if !e.is_empty() && !is_valid_email(e) => {
            Err(CoreError::Validation(format!("Invalid email address '{e}'")))
        }
        _ => Ok(()),
    }
}

/// Validate an optional website URL. Blank values are allowed.
pub fn validate_optional_website(website: Option<&str>) -> Result<(), CoreError> {
    match website.map(str::trim) {
        Some(w) if !w.is_empty() && !(w.starts_with("http://") || w.starts_with("https://")) => {
            Err(CoreError::Validation(format!(
                "Invalid website '{w}'. Must start with http:// or https://"
            )))
        }
        _ => Ok(()),
    }
}

/// Validate the lead id list of a bulk request.
pub fn validate_bulk_ids<T>(ids: &[T]) -> Result<(), CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation(
            "leadIds must contain at least one id".to_string(),
        ));
    }
    if ids.len() > MAX_BULK_LEADS {
        return Err(CoreError::Validation(format!(
            "leadIds exceeds maximum of {MAX_BULK_LEADS} (got {})",
            ids.len()
        )));
    }
    Ok(())
}

/// Normalize an optional text field: trim, and map blank to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
