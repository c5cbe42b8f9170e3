//! Repository for the `leads` table.
//!
//! Every lookup is scoped to the owning user; a lead belonging to someone
//! else is indistinguishable from one that does not exist.

use leadflow_core::leads::DEFAULT_SERVICE_STATUS;
use leadflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::{CreateLead, Lead, LeadQuery, UpdateLead};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

const COLUMNS: &str = "\
    id, user_id, client_name, email, phone, whatsapp, website, address, \
    service_type, source, service_status, notes, email_sent, whatsapp_sent, \
    approach_count, created_at, updated_at";

// ---------------------------------------------------------------------------
// LeadRepo
// ---------------------------------------------------------------------------

/// Provides CRUD, filtered listing, and bulk status updates for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateLead,
    ) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads
                (user_id, client_name, email, phone, whatsapp, website, address,
                 service_type, source, service_status, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let status = input
            .service_status
            .as_deref()
            .unwrap_or(DEFAULT_SERVICE_STATUS.as_str());
        sqlx::query_as::<_, Lead>(&query)
            .bind(user_id)
            .bind(&input.client_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.whatsapp)
            .bind(&input.website)
            .bind(&input.address)
            .bind(&input.service_type)
            .bind(&input.source)
            .bind(status)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by ID, only if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Load all of `ids` that belong to `user_id`, in no particular order.
    ///
    /// Ids the user does not own are silently absent from the result.
    pub async fn find_many_for_user(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE user_id = $1 AND id = ANY($2)");
        sqlx::query_as::<_, Lead>(&query)
            .bind(user_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List one page of the user's leads matching `params`, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &LeadQuery,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_lead_filter(user_id, params);

        let query = format!(
            "SELECT {COLUMNS} FROM leads {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, Lead>(&query);
        for val in &bind_values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Bool(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q.bind(params.limit())
            .bind(params.offset())
            .fetch_all(pool)
            .await
    }

    /// Count the user's leads matching `params` (for pagination metadata).
    pub async fn count_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &LeadQuery,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_lead_filter(user_id, params);

        let query = format!("SELECT COUNT(*)::BIGINT FROM leads {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for val in &bind_values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Bool(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q.fetch_one(pool).await
    }

    /// Update a lead. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the lead does not exist or belongs to another user.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET
                client_name = COALESCE($3, client_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                whatsapp = COALESCE($6, whatsapp),
                website = COALESCE($7, website),
                address = COALESCE($8, address),
                service_type = COALESCE($9, service_type),
                source = COALESCE($10, source),
                service_status = COALESCE($11, service_status),
                notes = COALESCE($12, notes)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.client_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.whatsapp)
            .bind(&input.website)
            .bind(&input.address)
            .bind(&input.service_type)
            .bind(&input.source)
            .bind(&input.service_status)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a lead. Messages, AI messages, and lead-scoped templates
    /// go with it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set `service_status` on every listed lead the user owns.
    ///
    /// Returns the number of leads updated.
    pub async fn bulk_update_status(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
        service_status: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE leads SET service_status = $3 WHERE user_id = $1 AND id = ANY($2)",
        )
        .bind(user_id)
        .bind(ids)
        .bind(service_status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

// ---------------------------------------------------------------------------
// Filter building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built lead queries.
enum BindValue {
    BigInt(i64),
    Bool(bool),
    Text(String),
}

/// Build a WHERE clause and bind values from `LeadQuery` filter parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause always
/// starts with the owner condition.
fn build_lead_filter(user_id: DbId, params: &LeadQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = vec!["user_id = $1".to_string()];
    let mut bind_idx = 2u32;
    let mut bind_values: Vec<BindValue> = vec![BindValue::BigInt(user_id)];

    if let Some(ref service_type) = params.service_type {
        conditions.push(format!("service_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(service_type.clone()));
    }

    if let Some(ref service_status) = params.service_status {
        conditions.push(format!("service_status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(service_status.clone()));
    }

    if let Some(email_sent) = params.email_sent {
        conditions.push(format!("email_sent = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Bool(email_sent));
    }

    if let Some(whatsapp_sent) = params.whatsapp_sent {
        conditions.push(format!("whatsapp_sent = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Bool(whatsapp_sent));
    }

    if let Some(search) = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        conditions.push(format!(
            "(client_name ILIKE ${bind_idx} OR email ILIKE ${bind_idx} OR phone ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{}%", escape_like(search))));
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));
    (where_clause, bind_values, bind_idx)
}

/// Escape `LIKE` metacharacters so user search text matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
