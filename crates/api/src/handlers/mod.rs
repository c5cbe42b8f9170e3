pub mod ai;
pub mod auth;
pub mod lead;
pub mod message;
pub mod template;

use leadflow_core::channels::Channel;
use leadflow_core::error::CoreError;

/// Require a field that the request type leaves optional so that a missing
/// value produces a validation error in the standard envelope.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// Parse a channel string from a request body.
pub(crate) fn parse_channel(value: Option<&str>) -> Result<Channel, CoreError> {
    let value = required(value, "channel")?;
    Channel::from_str_value(value).map_err(CoreError::Validation)
}
