//! Integration tests for lead storage: ownership scoping, filtering,
//! pagination, and bulk status updates.

mod common;

use assert_matches::assert_matches;
use leadflow_db::models::lead::{LeadQuery, UpdateLead};
use leadflow_db::repositories::LeadRepo;
use sqlx::PgPool;

use common::{create_lead, create_user};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let user = create_user(&pool, "owner@example.com").await;
    let lead = create_lead(&pool, user.id, "Ana", Some("ana@example.com")).await;

    assert_eq!(lead.service_status, "INTERESTED");
    assert_eq!(lead.approach_count, 0);
    assert!(!lead.email_sent);
    assert!(!lead.whatsapp_sent);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_users_leads_are_invisible(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com").await;
    let other = create_user(&pool, "other@example.com").await;
    let lead = create_lead(&pool, owner.id, "Ana", None).await;

    assert_matches!(LeadRepo::find_for_user(&pool, lead.id, other.id).await, Ok(None));
    assert!(!LeadRepo::delete(&pool, lead.id, other.id).await.unwrap());
    let update = UpdateLead {
        client_name: Some("Hijacked".into()),
        ..Default::default()
    };
    assert_matches!(LeadRepo::update(&pool, lead.id, other.id, &update).await, Ok(None));

    let found = LeadRepo::find_many_for_user(&pool, other.id, &[lead.id]).await.unwrap();
    assert!(found.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_is_partial(pool: PgPool) {
    let user = create_user(&pool, "owner@example.com").await;
    let lead = create_lead(&pool, user.id, "Ana", Some("ana@example.com")).await;

    let update = UpdateLead {
        phone: Some("+351 900 000 000".into()),
        ..Default::default()
    };
    let updated = LeadRepo::update(&pool, lead.id, user.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.client_name, "Ana");
    assert_eq!(updated.email.as_deref(), Some("ana@example.com"));
    assert_eq!(updated.phone.as_deref(), Some("+351 900 000 000"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_and_pagination(pool: PgPool) {
    let user = create_user(&pool, "owner@example.com").await;
    for name in ["Ana Lima", "Bruno", "Carla", "ANABELA"] {
        create_lead(&pool, user.id, name, None).await;
    }

    let params = LeadQuery {
        search: Some("ana".into()),
        ..Default::default()
    };
    let total = LeadRepo::count_for_user(&pool, user.id, &params).await.unwrap();
    assert_eq!(total, 2);

    let params = LeadQuery {
        page: Some(2),
        limit: Some(3),
        ..Default::default()
    };
    let page = LeadRepo::list_for_user(&pool, user.id, &params).await.unwrap();
    assert_eq!(page.len(), 1);
    // Newest first, so the oldest lead lands on the last page.
    assert_eq!(page[0].client_name, "Ana Lima");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_percent_literally(pool: PgPool) {
    let user = create_user(&pool, "owner@example.com").await;
    create_lead(&pool, user.id, "Ana", None).await;

    let params = LeadQuery {
        search: Some("%".into()),
        ..Default::default()
    };
    assert_eq!(LeadRepo::count_for_user(&pool, user.id, &params).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_status_touches_only_owned_leads(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com").await;
    let other = create_user(&pool, "other@example.com").await;
    let a = create_lead(&pool, owner.id, "A", None).await;
    let b = create_lead(&pool, owner.id, "B", None).await;
    let foreign = create_lead(&pool, other.id, "C", None).await;

    let updated = LeadRepo::bulk_update_status(&pool, owner.id, &[a.id, b.id, foreign.id], "CONVERTED")
        .await
        .unwrap();
    assert_eq!(updated, 2);

    let foreign = LeadRepo::find_for_user(&pool, foreign.id, other.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(foreign.service_status, "INTERESTED");
}
