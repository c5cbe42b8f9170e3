//! Role names stored in `users.role`.

/// Role given to every self-registered account.
pub const ROLE_USER: &str = "user";
