//! Database operations for user reports.

use crate::models::{Report, ReportEntityType, ReportReason, ReportStatus};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct CreateReportInput {
    pub reporter_id: Uuid,
    pub entity_type: ReportEntityType,
    pub entity_id: String,
    pub reported_user_id: Uuid,
    pub reason: ReportReason,
    pub details: Option<String>,
}

pub async fn create(pool: &PgPool, input: CreateReportInput) -> Result<Report, sqlx::Error> {
    let report = sqlx::query_as::<_, Report>(
        r#"
        INSERT INTO reports (
            reporter_id, entity_type, entity_id, reported_user_id, reason, details, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, 'pending')
        RETURNING id, reporter_id, entity_type, entity_id, reported_user_id, reason,
                  details, status, reviewed_by, reviewed_at, review_notes, created_at
        "#,
    )
    .bind(input.reporter_id)
    .bind(input.entity_type)
    .bind(&input.entity_id)
    .bind(input.reported_user_id)
    .bind(input.reason)
    .bind(&input.details)
    .fetch_one(pool)
    .await?;

    tracing::info!(
        report_id = %report.id,
        reporter = %input.reporter_id,
        entity_type = %input.entity_type.as_str(),
        "Report created"
    );

    Ok(report)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(
        r#"
        SELECT id, reporter_id, entity_type, entity_id, reported_user_id, reason,
               details, status, reviewed_by, reviewed_at, review_notes, created_at
        FROM reports
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_by_reporter(
    pool: &PgPool,
    reporter_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(
        r#"
        SELECT id, reporter_id, entity_type, entity_id, reported_user_id, reason,
               details, status, reviewed_by, reviewed_at, review_notes, created_at
        FROM reports
        WHERE reporter_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(reporter_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Admin queue listing, oldest first, optionally filtered by status.
pub async fn list_for_review(
    pool: &PgPool,
    status: Option<ReportStatus>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Report>, sqlx::Error> {
    if let Some(status) = status {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, reporter_id, entity_type, entity_id, reported_user_id, reason,
                   details, status, reviewed_by, reviewed_at, review_notes, created_at
            FROM reports
            WHERE status = $1
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, reporter_id, entity_type, entity_id, reported_user_id, reason,
                   details, status, reviewed_by, reviewed_at, review_notes, created_at
            FROM reports
            ORDER BY created_at ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}

/// Apply the review outcome. The status guard in the WHERE clause is the
/// optimistic check against racing reviewers: a report that already reached
/// a terminal state matches zero rows and the caller sees None.
pub async fn apply_review(
    conn: &mut PgConnection,
    id: Uuid,
    new_status: ReportStatus,
    admin_id: Uuid,
    notes: Option<&str>,
) -> Result<Option<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(
        r#"
        UPDATE reports
        SET status = $2,
            reviewed_by = $3,
            reviewed_at = NOW(),
            review_notes = $4
        WHERE id = $1 AND status IN ('pending', 'under_review')
        RETURNING id, reporter_id, entity_type, entity_id, reported_user_id, reason,
                  details, status, reviewed_by, reviewed_at, review_notes, created_at
        "#,
    )
    .bind(id)
    .bind(new_status)
    .bind(admin_id)
    .bind(notes)
    .fetch_optional(conn)
    .await
}

/// Reporters may withdraw a report only while it is still pending.
pub async fn delete_pending(
    pool: &PgPool,
    id: Uuid,
    reporter_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM reports WHERE id = $1 AND reporter_id = $2 AND status = 'pending'")
            .bind(id)
            .bind(reporter_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}
