//! Database operations for friend requests and friendships.

use crate::models::{FriendRequest, Friendship};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub async fn create_request(
    pool: &PgPool,
    sender_id: Uuid,
    recipient_id: Uuid,
) -> Result<FriendRequest, sqlx::Error> {
    sqlx::query_as::<_, FriendRequest>(
        r#"
        INSERT INTO friend_requests (sender_id, recipient_id, status)
        VALUES ($1, $2, 'pending')
        RETURNING id, sender_id, recipient_id, status, created_at, responded_at
        "#,
    )
    .bind(sender_id)
    .bind(recipient_id)
    .fetch_one(pool)
    .await
}

pub async fn find_request(pool: &PgPool, id: Uuid) -> Result<Option<FriendRequest>, sqlx::Error> {
    sqlx::query_as::<_, FriendRequest>(
        r#"
        SELECT id, sender_id, recipient_id, status, created_at, responded_at
        FROM friend_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn pending_request_exists(
    pool: &PgPool,
    sender_id: Uuid,
    recipient_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM friend_requests
            WHERE sender_id = $1 AND recipient_id = $2 AND status = 'pending'
        )
        "#,
    )
    .bind(sender_id)
    .bind(recipient_id)
    .fetch_one(pool)
    .await
}

pub async fn are_friends(
    pool: &PgPool,
    user_id: Uuid,
    other_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM friendships WHERE user_id = $1 AND friend_id = $2)",
    )
    .bind(user_id)
    .bind(other_id)
    .fetch_one(pool)
    .await
}

pub async fn list_incoming_requests(
    pool: &PgPool,
    recipient_id: Uuid,
) -> Result<Vec<FriendRequest>, sqlx::Error> {
    sqlx::query_as::<_, FriendRequest>(
        r#"
        SELECT id, sender_id, recipient_id, status, created_at, responded_at
        FROM friend_requests
        WHERE recipient_id = $1 AND status = 'pending'
        ORDER BY created_at DESC
        "#,
    )
    .bind(recipient_id)
    .fetch_all(pool)
    .await
}

pub async fn list_friends(pool: &PgPool, user_id: Uuid) -> Result<Vec<Friendship>, sqlx::Error> {
    sqlx::query_as::<_, Friendship>(
        r#"
        SELECT user_id, friend_id, created_at
        FROM friendships
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Terminal-state update guarded on pending status.
pub async fn mark_request_responded(
    conn: &mut PgConnection,
    id: Uuid,
    status: crate::models::FriendRequestStatus,
) -> Result<Option<FriendRequest>, sqlx::Error> {
    sqlx::query_as::<_, FriendRequest>(
        r#"
        UPDATE friend_requests
        SET status = $2, responded_at = NOW()
        WHERE id = $1 AND status = 'pending'
        RETURNING id, sender_id, recipient_id, status, created_at, responded_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(conn)
    .await
}

/// Insert the symmetric friendship pair for an accepted request.
pub async fn insert_friendship_pair(
    conn: &mut PgConnection,
    user_id: Uuid,
    friend_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO friendships (user_id, friend_id)
        VALUES ($1, $2), ($2, $1)
        ON CONFLICT (user_id, friend_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(friend_id)
    .execute(conn)
    .await?;
    Ok(())
}
