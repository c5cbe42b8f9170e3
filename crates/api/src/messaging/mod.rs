//! Outbound messaging: single sends, bulk batches, and AI drafts.
//!
//! - [`dispatcher`]: one message to one lead, with status bookkeeping.
//! - [`bulk`]: sequential batches with per-lead results.
//! - [`drafts`]: AI-generated copy with a canned fallback.

pub mod bulk;
pub mod dispatcher;
pub mod drafts;

pub use dispatcher::MessageDispatcher;
pub use drafts::DraftWriter;
