//! Repository for the `templates` table.

use leadflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::{CreateTemplate, Template, UpdateTemplate};

const COLUMNS: &str = "\
    id, name, channel, content, placeholders, user_id, lead_id, created_at, updated_at";

/// Provides CRUD for user templates and read access to global ones.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a template owned by `user_id` with the given placeholder list.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTemplate,
        placeholders: &[String],
    ) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates (name, channel, content, placeholders, user_id, lead_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&input.name)
            .bind(&input.channel)
            .bind(&input.content)
            .bind(placeholders)
            .bind(user_id)
            .bind(input.lead_id)
            .fetch_one(pool)
            .await
    }

    /// Find a template the user may read: their own, or a global one.
    pub async fn find_visible(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates
             WHERE id = $1 AND (user_id = $2 OR user_id IS NULL)"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// The user's own templates plus every global template, newest first.
    pub async fn list_visible(pool: &PgPool, user_id: DbId) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates
             WHERE user_id = $1 OR user_id IS NULL
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The user's templates scoped to one lead, newest first.
    pub async fn list_for_lead(
        pool: &PgPool,
        user_id: DbId,
        lead_id: DbId,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates
             WHERE user_id = $1 AND lead_id = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(user_id)
            .bind(lead_id)
            .fetch_all(pool)
            .await
    }

    /// Update one of the user's templates. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the template does not exist or is not owned by the
    /// user (global templates included).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE templates SET
                name = COALESCE($3, name),
                channel = COALESCE($4, channel),
                content = COALESCE($5, content),
                placeholders = COALESCE($6, placeholders)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.channel)
            .bind(&input.content)
            .bind(&input.placeholders)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's templates. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
