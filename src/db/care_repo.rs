//! Database operations for care relationships and caregiver requests.

use crate::models::{CareRelationship, CaregiverRequest, CaregiverRequestStatus};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Fetch the relationship row for a (caregiver, recipient) pair, active or
/// not. The authorizer inspects `is_active` itself so a revoked row still
/// surfaces as "no active relationship" rather than silently matching.
pub async fn find_for_pair(
    pool: &PgPool,
    caregiver_id: Uuid,
    recipient_id: Uuid,
) -> Result<Option<CareRelationship>, sqlx::Error> {
    sqlx::query_as::<_, CareRelationship>(
        r#"
        SELECT id, caregiver_id, recipient_id, can_manage_events, can_manage_profile,
               can_manage_friendships, is_active, created_at, revoked_at
        FROM care_relationships
        WHERE caregiver_id = $1 AND recipient_id = $2
        "#,
    )
    .bind(caregiver_id)
    .bind(recipient_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_relationship(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CareRelationship>, sqlx::Error> {
    sqlx::query_as::<_, CareRelationship>(
        r#"
        SELECT id, caregiver_id, recipient_id, can_manage_events, can_manage_profile,
               can_manage_friendships, is_active, created_at, revoked_at
        FROM care_relationships
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_as_caregiver(
    pool: &PgPool,
    caregiver_id: Uuid,
) -> Result<Vec<CareRelationship>, sqlx::Error> {
    sqlx::query_as::<_, CareRelationship>(
        r#"
        SELECT id, caregiver_id, recipient_id, can_manage_events, can_manage_profile,
               can_manage_friendships, is_active, created_at, revoked_at
        FROM care_relationships
        WHERE caregiver_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(caregiver_id)
    .fetch_all(pool)
    .await
}

pub async fn list_as_recipient(
    pool: &PgPool,
    recipient_id: Uuid,
) -> Result<Vec<CareRelationship>, sqlx::Error> {
    sqlx::query_as::<_, CareRelationship>(
        r#"
        SELECT id, caregiver_id, recipient_id, can_manage_events, can_manage_profile,
               can_manage_friendships, is_active, created_at, revoked_at
        FROM care_relationships
        WHERE recipient_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(recipient_id)
    .fetch_all(pool)
    .await
}

/// Create or reactivate the relationship for a pair. The unique pair
/// constraint makes this the only write path that can introduce a row, so
/// an old revoked relationship is revived in place with the new flags.
pub async fn upsert_relationship(
    conn: &mut PgConnection,
    caregiver_id: Uuid,
    recipient_id: Uuid,
    can_manage_events: bool,
    can_manage_profile: bool,
    can_manage_friendships: bool,
) -> Result<CareRelationship, sqlx::Error> {
    sqlx::query_as::<_, CareRelationship>(
        r#"
        INSERT INTO care_relationships (
            caregiver_id, recipient_id, can_manage_events, can_manage_profile,
            can_manage_friendships, is_active
        )
        VALUES ($1, $2, $3, $4, $5, TRUE)
        ON CONFLICT (caregiver_id, recipient_id) DO UPDATE
        SET can_manage_events = EXCLUDED.can_manage_events,
            can_manage_profile = EXCLUDED.can_manage_profile,
            can_manage_friendships = EXCLUDED.can_manage_friendships,
            is_active = TRUE,
            revoked_at = NULL
        RETURNING id, caregiver_id, recipient_id, can_manage_events, can_manage_profile,
                  can_manage_friendships, is_active, created_at, revoked_at
        "#,
    )
    .bind(caregiver_id)
    .bind(recipient_id)
    .bind(can_manage_events)
    .bind(can_manage_profile)
    .bind(can_manage_friendships)
    .fetch_one(conn)
    .await
}

/// Update capability flags. Guarded on `is_active` so a revoked relationship
/// cannot be edited back to life through this path.
pub async fn update_flags(
    pool: &PgPool,
    id: Uuid,
    can_manage_events: bool,
    can_manage_profile: bool,
    can_manage_friendships: bool,
) -> Result<Option<CareRelationship>, sqlx::Error> {
    sqlx::query_as::<_, CareRelationship>(
        r#"
        UPDATE care_relationships
        SET can_manage_events = $2,
            can_manage_profile = $3,
            can_manage_friendships = $4
        WHERE id = $1 AND is_active = TRUE
        RETURNING id, caregiver_id, recipient_id, can_manage_events, can_manage_profile,
                  can_manage_friendships, is_active, created_at, revoked_at
        "#,
    )
    .bind(id)
    .bind(can_manage_events)
    .bind(can_manage_profile)
    .bind(can_manage_friendships)
    .fetch_optional(pool)
    .await
}

pub async fn revoke_relationship(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CareRelationship>, sqlx::Error> {
    sqlx::query_as::<_, CareRelationship>(
        r#"
        UPDATE care_relationships
        SET is_active = FALSE, revoked_at = NOW()
        WHERE id = $1 AND is_active = TRUE
        RETURNING id, caregiver_id, recipient_id, can_manage_events, can_manage_profile,
                  can_manage_friendships, is_active, created_at, revoked_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_relationship(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM care_relationships WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn create_request(
    pool: &PgPool,
    caregiver_id: Uuid,
    recipient_id: Uuid,
    can_manage_events: bool,
    can_manage_profile: bool,
    can_manage_friendships: bool,
    message: Option<&str>,
) -> Result<CaregiverRequest, sqlx::Error> {
    sqlx::query_as::<_, CaregiverRequest>(
        r#"
        INSERT INTO caregiver_requests (
            caregiver_id, recipient_id, status, can_manage_events, can_manage_profile,
            can_manage_friendships, message
        )
        VALUES ($1, $2, 'pending', $3, $4, $5, $6)
        RETURNING id, caregiver_id, recipient_id, status, can_manage_events,
                  can_manage_profile, can_manage_friendships, message,
                  created_at, responded_at
        "#,
    )
    .bind(caregiver_id)
    .bind(recipient_id)
    .bind(can_manage_events)
    .bind(can_manage_profile)
    .bind(can_manage_friendships)
    .bind(message)
    .fetch_one(pool)
    .await
}

pub async fn find_request(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CaregiverRequest>, sqlx::Error> {
    sqlx::query_as::<_, CaregiverRequest>(
        r#"
        SELECT id, caregiver_id, recipient_id, status, can_manage_events,
               can_manage_profile, can_manage_friendships, message,
               created_at, responded_at
        FROM caregiver_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn pending_request_exists(
    pool: &PgPool,
    caregiver_id: Uuid,
    recipient_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM caregiver_requests
            WHERE caregiver_id = $1 AND recipient_id = $2 AND status = 'pending'
        )
        "#,
    )
    .bind(caregiver_id)
    .bind(recipient_id)
    .fetch_one(pool)
    .await
}

pub async fn list_incoming_requests(
    pool: &PgPool,
    recipient_id: Uuid,
) -> Result<Vec<CaregiverRequest>, sqlx::Error> {
    sqlx::query_as::<_, CaregiverRequest>(
        r#"
        SELECT id, caregiver_id, recipient_id, status, can_manage_events,
               can_manage_profile, can_manage_friendships, message,
               created_at, responded_at
        FROM caregiver_requests
        WHERE recipient_id = $1 AND status = 'pending'
        ORDER BY created_at DESC
        "#,
    )
    .bind(recipient_id)
    .fetch_all(pool)
    .await
}

pub async fn list_outgoing_requests(
    pool: &PgPool,
    caregiver_id: Uuid,
) -> Result<Vec<CaregiverRequest>, sqlx::Error> {
    sqlx::query_as::<_, CaregiverRequest>(
        r#"
        SELECT id, caregiver_id, recipient_id, status, can_manage_events,
               can_manage_profile, can_manage_friendships, message,
               created_at, responded_at
        FROM caregiver_requests
        WHERE caregiver_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(caregiver_id)
    .fetch_all(pool)
    .await
}

/// Mark a pending request as responded. Returns None when the request was
/// not pending anymore (lost race or repeated call).
pub async fn mark_request_responded(
    conn: &mut PgConnection,
    id: Uuid,
    status: CaregiverRequestStatus,
) -> Result<Option<CaregiverRequest>, sqlx::Error> {
    sqlx::query_as::<_, CaregiverRequest>(
        r#"
        UPDATE caregiver_requests
        SET status = $2, responded_at = NOW()
        WHERE id = $1 AND status = 'pending'
        RETURNING id, caregiver_id, recipient_id, status, can_manage_events,
                  can_manage_profile, can_manage_friendships, message,
                  created_at, responded_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(conn)
    .await
}

/// Cancel (hard delete) a pending request.
pub async fn delete_pending_request(
    pool: &PgPool,
    id: Uuid,
    caregiver_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM caregiver_requests WHERE id = $1 AND caregiver_id = $2 AND status = 'pending'",
    )
    .bind(id)
    .bind(caregiver_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
