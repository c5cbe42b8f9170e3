//! Repository layer: one zero-sized struct per table, all methods take `&PgPool`.

pub mod ai_message_repo;
pub mod lead_repo;
pub mod message_repo;
pub mod session_repo;
pub mod template_repo;
pub mod user_repo;

pub use ai_message_repo::AiMessageRepo;
pub use lead_repo::LeadRepo;
pub use message_repo::MessageRepo;
pub use session_repo::SessionRepo;
pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
