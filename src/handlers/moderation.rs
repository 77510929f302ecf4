//! Admin-only moderation endpoints. Every handler loads a fresh
//! `AdminContext` for the caller; the admin flag is never cached.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::middleware::UserId;
use crate::models::ReportStatus;
use crate::services::moderation_service::{ModerationService, ReviewInput};
use crate::services::{AdminContext, ReportService};

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewReportPayload {
    pub status: ReportStatus,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub action_type: Option<String>,
    #[validate(length(max = 500))]
    pub action_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BanPayload {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminReportsQuery {
    pub status: Option<ReportStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ActionsQuery {
    pub user_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/reports
pub async fn list_reports_for_review(
    pool: web::Data<PgPool>,
    user: UserId,
    query: web::Query<AdminReportsQuery>,
) -> Result<HttpResponse> {
    AdminContext::load(pool.get_ref(), user.0).await?;

    let limit = query.limit.unwrap_or(20);
    let offset = query.offset.unwrap_or(0);
    let reports = ReportService::list_for_review(pool.get_ref(), query.status, limit, offset).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "reports": reports,
        "limit": limit,
        "offset": offset
    })))
}

/// GET /api/v1/admin/reports/{id}
pub async fn get_report_for_review(
    pool: web::Data<PgPool>,
    user: UserId,
    report_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    AdminContext::load(pool.get_ref(), user.0).await?;

    let report = ReportService::get(pool.get_ref(), report_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// POST /api/v1/admin/reports/{id}/review
pub async fn review_report(
    pool: web::Data<PgPool>,
    user: UserId,
    report_id: web::Path<Uuid>,
    payload: web::Json<ReviewReportPayload>,
) -> Result<HttpResponse> {
    payload.validate()?;
    let ctx = AdminContext::load(pool.get_ref(), user.0).await?;
    let payload = payload.into_inner();

    let outcome = ModerationService::review_report(
        pool.get_ref(),
        &ctx,
        report_id.into_inner(),
        ReviewInput {
            new_status: payload.status,
            notes: payload.notes,
            action_type: payload.action_type,
            action_reason: payload.action_reason,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "report": outcome.report,
        "action": outcome.action
    })))
}

/// POST /api/v1/admin/users/{id}/ban
pub async fn ban_user(
    pool: web::Data<PgPool>,
    user: UserId,
    target_id: web::Path<Uuid>,
    payload: Option<web::Json<BanPayload>>,
) -> Result<HttpResponse> {
    let ctx = AdminContext::load(pool.get_ref(), user.0).await?;
    let reason = payload.and_then(|p| p.into_inner().reason);

    let action =
        ModerationService::ban_user(pool.get_ref(), &ctx, target_id.into_inner(), reason).await?;

    Ok(HttpResponse::Ok().json(action))
}

/// DELETE /api/v1/admin/users/{id}/ban
pub async fn unban_user(
    pool: web::Data<PgPool>,
    user: UserId,
    target_id: web::Path<Uuid>,
    payload: Option<web::Json<BanPayload>>,
) -> Result<HttpResponse> {
    let ctx = AdminContext::load(pool.get_ref(), user.0).await?;
    let reason = payload.and_then(|p| p.into_inner().reason);

    let action =
        ModerationService::unban_user(pool.get_ref(), &ctx, target_id.into_inner(), reason).await?;

    Ok(HttpResponse::Ok().json(action))
}

/// GET /api/v1/admin/actions
pub async fn list_moderation_actions(
    pool: web::Data<PgPool>,
    user: UserId,
    query: web::Query<ActionsQuery>,
) -> Result<HttpResponse> {
    AdminContext::load(pool.get_ref(), user.0).await?;

    let limit = query.limit.unwrap_or(20);
    let offset = query.offset.unwrap_or(0);
    let actions =
        ModerationService::list_actions(pool.get_ref(), query.user_id, limit, offset).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "actions": actions,
        "limit": limit,
        "offset": offset
    })))
}
