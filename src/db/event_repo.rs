//! Database operations for events.

use crate::models::Event;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub async fn create(
    pool: &PgPool,
    organizer_id: Uuid,
    title: &str,
    description: Option<&str>,
    location: Option<&str>,
    starts_at: DateTime<Utc>,
) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (organizer_id, title, description, location, starts_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, organizer_id, title, description, location, starts_at, created_at
        "#,
    )
    .bind(organizer_id)
    .bind(title)
    .bind(description)
    .bind(location)
    .bind(starts_at)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        r#"
        SELECT id, organizer_id, title, description, location, starts_at, created_at
        FROM events
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn organizer_of(pool: &PgPool, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT organizer_id FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
