//! Leadflow domain core.
//!
//! Pure domain logic with no I/O: shared id/timestamp types, the domain
//! error enum, the enumerations stored as text columns, placeholder
//! rendering for message templates, outreach prompt construction, and
//! input validation helpers.

pub mod channels;
pub mod error;
pub mod leads;
pub mod outreach;
pub mod placeholder;
pub mod roles;
pub mod types;
pub mod validation;
