/// User repository - profile reads plus the moderation-state mutations.
use crate::models::UserProfile;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, username, display_name, bio, is_admin, is_banned,
               banned_at, ban_reason, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Fresh admin-flag read. Callers must not cache the result across requests.
pub async fn is_admin(pool: &PgPool, id: Uuid) -> Result<Option<bool>, sqlx::Error> {
    sqlx::query_scalar("SELECT is_admin FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    display_name: Option<&str>,
    bio: Option<&str>,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        UPDATE users
        SET display_name = COALESCE($2, display_name),
            bio = COALESCE($3, bio),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, username, display_name, bio, is_admin, is_banned,
                  banned_at, ban_reason, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(display_name)
    .bind(bio)
    .fetch_optional(pool)
    .await
}

/// Load the (is_banned, is_admin) pair inside a transaction.
pub async fn ban_state(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<(bool, bool)>, sqlx::Error> {
    sqlx::query_as::<_, (bool, bool)>("SELECT is_banned, is_admin FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn set_banned(
    conn: &mut PgConnection,
    id: Uuid,
    reason: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET is_banned = TRUE, banned_at = NOW(), ban_reason = $2, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(reason)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn clear_banned(conn: &mut PgConnection, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET is_banned = FALSE, banned_at = NULL, ban_reason = NULL, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(conn)
    .await?;
    Ok(())
}
