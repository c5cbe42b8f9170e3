//! Shared fixtures for repository integration tests.

use leadflow_db::models::lead::{CreateLead, Lead};
use leadflow_db::models::user::{CreateUser, User};
use leadflow_db::repositories::{LeadRepo, UserRepo};
use sqlx::PgPool;

pub async fn create_user(pool: &PgPool, email: &str) -> User {
    let input = CreateUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        role: "user".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

pub fn new_lead(name: &str, email: Option<&str>) -> CreateLead {
    CreateLead {
        client_name: name.to_string(),
        email: email.map(str::to_string),
        service_type: "SEO".to_string(),
        ..Default::default()
    }
}

pub async fn create_lead(pool: &PgPool, user_id: i64, name: &str, email: Option<&str>) -> Lead {
    LeadRepo::create(pool, user_id, &new_lead(name, email))
        .await
        .unwrap()
}
