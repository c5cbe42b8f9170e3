//! Outbound transports used to reach leads and to draft copy for them.
//!
//! Each transport sits behind an async trait so the API can run with the
//! real implementation, a test double, or nothing at all when unconfigured.

pub mod ai;
pub mod email;

pub use ai::{AiConfig, AiError, GenerationRequest, OpenAiClient, TextGenerator};
pub use email::{EmailConfig, EmailError, EmailTransport, SmtpMailer};
