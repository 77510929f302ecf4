use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::middleware::UserId;
use crate::models::{ReportEntityType, ReportReason};
use crate::services::report_service::{CreateReport, ReportService};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportPayload {
    pub entity_type: ReportEntityType,
    pub entity_id: String,
    pub reason: ReportReason,
    #[validate(length(max = 2000))]
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/reports
pub async fn create_report(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<CreateReportPayload>,
) -> Result<HttpResponse> {
    payload.validate()?;
    let payload = payload.into_inner();

    let report = ReportService::create_report(
        pool.get_ref(),
        user.0,
        CreateReport {
            entity_type: payload.entity_type,
            entity_id: payload.entity_id,
            reason: payload.reason,
            details: payload.details,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(report))
}

/// GET /api/v1/reports
pub async fn list_own_reports(
    pool: web::Data<PgPool>,
    user: UserId,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let limit = query.limit.unwrap_or(20);
    let offset = query.offset.unwrap_or(0);

    let reports = ReportService::list_own(pool.get_ref(), user.0, limit, offset).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "reports": reports,
        "limit": limit,
        "offset": offset
    })))
}

/// DELETE /api/v1/reports/{id}
pub async fn delete_report(
    pool: web::Data<PgPool>,
    user: UserId,
    report_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    ReportService::delete_own(pool.get_ref(), user.0, report_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
