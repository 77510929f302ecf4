use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::event_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::CareCapability;
use crate::services::DelegationAuthorizer;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    /// Care recipient to organize for; requires the event-management
    /// capability.
    pub on_behalf_of: Option<Uuid>,
}

/// POST /api/v1/events
pub async fn create_event(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<CreateEventPayload>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let organizer = DelegationAuthorizer::resolve_actor(
        pool.get_ref(),
        user.0,
        payload.on_behalf_of,
        CareCapability::ManageEvents,
    )
    .await?;

    let event = event_repo::create(
        pool.get_ref(),
        organizer,
        &payload.title,
        payload.description.as_deref(),
        payload.location.as_deref(),
        payload.starts_at,
    )
    .await?;

    tracing::info!(event_id = %event.id, organizer = %organizer, "Event created");

    Ok(HttpResponse::Created().json(event))
}

/// GET /api/v1/events/{id}
pub async fn get_event(pool: web::Data<PgPool>, event_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let event_id = event_id.into_inner();
    let event = event_repo::find_by_id(pool.get_ref(), event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

    Ok(HttpResponse::Ok().json(event))
}
