//! Database operations for community and direct messages.

use crate::models::{CommunityMessage, DirectMessage};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub async fn create_community_message(
    pool: &PgPool,
    community_id: Uuid,
    sender_id: Uuid,
    content: &str,
) -> Result<CommunityMessage, sqlx::Error> {
    sqlx::query_as::<_, CommunityMessage>(
        r#"
        INSERT INTO community_messages (community_id, sender_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, community_id, sender_id, content, created_at
        "#,
    )
    .bind(community_id)
    .bind(sender_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

pub async fn create_direct_message(
    pool: &PgPool,
    sender_id: Uuid,
    recipient_id: Uuid,
    content: &str,
) -> Result<DirectMessage, sqlx::Error> {
    sqlx::query_as::<_, DirectMessage>(
        r#"
        INSERT INTO direct_messages (sender_id, recipient_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, sender_id, recipient_id, content, created_at
        "#,
    )
    .bind(sender_id)
    .bind(recipient_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

pub async fn community_message_sender(
    pool: &PgPool,
    id: i64,
) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT sender_id FROM community_messages WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn direct_message_sender(pool: &PgPool, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT sender_id FROM direct_messages WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn delete_community_message(
    conn: &mut PgConnection,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM community_messages WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_direct_message(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM direct_messages WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
