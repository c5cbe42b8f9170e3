pub mod ai_message;
pub mod lead;
pub mod message;
pub mod session;
pub mod template;
pub mod user;
