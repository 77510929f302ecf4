//! Database operations for the moderation audit trail.

use crate::models::ModerationAction;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct CreateActionInput {
    pub report_id: Option<Uuid>,
    pub admin_id: Uuid,
    pub action_type: String,
    pub target_user_id: Option<Uuid>,
    pub target_entity_id: Option<String>,
    pub reason: String,
}

/// Append one audit record. Records are never updated or deleted.
pub async fn insert_action(
    conn: &mut PgConnection,
    input: CreateActionInput,
) -> Result<ModerationAction, sqlx::Error> {
    let action = sqlx::query_as::<_, ModerationAction>(
        r#"
        INSERT INTO moderation_actions (
            report_id, admin_id, action_type, target_user_id, target_entity_id, reason
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, report_id, admin_id, action_type, target_user_id,
                  target_entity_id, reason, created_at
        "#,
    )
    .bind(input.report_id)
    .bind(input.admin_id)
    .bind(&input.action_type)
    .bind(input.target_user_id)
    .bind(&input.target_entity_id)
    .bind(&input.reason)
    .fetch_one(conn)
    .await?;

    tracing::info!(
        action_id = %action.id,
        admin_id = %input.admin_id,
        action_type = %input.action_type,
        "Moderation action recorded"
    );

    Ok(action)
}

pub async fn list_actions(
    pool: &PgPool,
    target_user_id: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ModerationAction>, sqlx::Error> {
    if let Some(user_id) = target_user_id {
        sqlx::query_as::<_, ModerationAction>(
            r#"
            SELECT id, report_id, admin_id, action_type, target_user_id,
                   target_entity_id, reason, created_at
            FROM moderation_actions
            WHERE target_user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, ModerationAction>(
            r#"
            SELECT id, report_id, admin_id, action_type, target_user_id,
                   target_entity_id, reason, created_at
            FROM moderation_actions
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
