use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::care_service::{AcceptOverrides, CareService, SendCareRequest};

#[derive(Debug, Deserialize, Validate)]
pub struct SendCareRequestPayload {
    pub recipient_id: Uuid,
    #[serde(default)]
    pub can_manage_events: bool,
    #[serde(default)]
    pub can_manage_profile: bool,
    #[serde(default)]
    pub can_manage_friendships: bool,
    #[validate(length(max = 500))]
    pub message: Option<String>,
}

/// Flag overrides supplied by the recipient on acceptance. Missing fields
/// fall back to what was requested.
#[derive(Debug, Default, Deserialize)]
pub struct AcceptCareRequestPayload {
    pub can_manage_events: Option<bool>,
    pub can_manage_profile: Option<bool>,
    pub can_manage_friendships: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePermissionsPayload {
    pub can_manage_events: bool,
    pub can_manage_profile: bool,
    pub can_manage_friendships: bool,
}

/// POST /api/v1/care/requests
pub async fn send_care_request(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<SendCareRequestPayload>,
) -> Result<HttpResponse> {
    payload.validate()?;
    let payload = payload.into_inner();

    let request = CareService::send_request(
        pool.get_ref(),
        user.0,
        SendCareRequest {
            recipient_id: payload.recipient_id,
            can_manage_events: payload.can_manage_events,
            can_manage_profile: payload.can_manage_profile,
            can_manage_friendships: payload.can_manage_friendships,
            message: payload.message,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(request))
}

/// GET /api/v1/care/requests/incoming
pub async fn list_incoming_care_requests(
    pool: web::Data<PgPool>,
    user: UserId,
) -> Result<HttpResponse> {
    let requests = CareService::list_incoming_requests(pool.get_ref(), user.0).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// GET /api/v1/care/requests/outgoing
pub async fn list_outgoing_care_requests(
    pool: web::Data<PgPool>,
    user: UserId,
) -> Result<HttpResponse> {
    let requests = CareService::list_outgoing_requests(pool.get_ref(), user.0).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// POST /api/v1/care/requests/{id}/accept
pub async fn accept_care_request(
    pool: web::Data<PgPool>,
    user: UserId,
    request_id: web::Path<Uuid>,
    payload: Option<web::Json<AcceptCareRequestPayload>>,
) -> Result<HttpResponse> {
    let overrides = payload.map(|p| p.into_inner()).unwrap_or_default();

    let relationship = CareService::accept_request(
        pool.get_ref(),
        user.0,
        request_id.into_inner(),
        AcceptOverrides {
            can_manage_events: overrides.can_manage_events,
            can_manage_profile: overrides.can_manage_profile,
            can_manage_friendships: overrides.can_manage_friendships,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(relationship))
}

/// POST /api/v1/care/requests/{id}/reject
pub async fn reject_care_request(
    pool: web::Data<PgPool>,
    user: UserId,
    request_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let request =
        CareService::reject_request(pool.get_ref(), user.0, request_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(request))
}

/// DELETE /api/v1/care/requests/{id}
pub async fn cancel_care_request(
    pool: web::Data<PgPool>,
    user: UserId,
    request_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    CareService::cancel_request(pool.get_ref(), user.0, request_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/care/relationships/as-caregiver
pub async fn list_relationships_as_caregiver(
    pool: web::Data<PgPool>,
    user: UserId,
) -> Result<HttpResponse> {
    let relationships = CareService::list_as_caregiver(pool.get_ref(), user.0).await?;
    Ok(HttpResponse::Ok().json(relationships))
}

/// GET /api/v1/care/relationships/as-recipient
pub async fn list_relationships_as_recipient(
    pool: web::Data<PgPool>,
    user: UserId,
) -> Result<HttpResponse> {
    let relationships = CareService::list_as_recipient(pool.get_ref(), user.0).await?;
    Ok(HttpResponse::Ok().json(relationships))
}

/// PATCH /api/v1/care/relationships/{id}/permissions
pub async fn update_relationship_permissions(
    pool: web::Data<PgPool>,
    user: UserId,
    relationship_id: web::Path<Uuid>,
    payload: web::Json<UpdatePermissionsPayload>,
) -> Result<HttpResponse> {
    let relationship = CareService::update_permissions(
        pool.get_ref(),
        user.0,
        relationship_id.into_inner(),
        payload.can_manage_events,
        payload.can_manage_profile,
        payload.can_manage_friendships,
    )
    .await?;

    Ok(HttpResponse::Ok().json(relationship))
}

/// POST /api/v1/care/relationships/{id}/revoke
pub async fn revoke_relationship(
    pool: web::Data<PgPool>,
    user: UserId,
    relationship_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let relationship =
        CareService::revoke(pool.get_ref(), user.0, relationship_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(relationship))
}

/// DELETE /api/v1/care/relationships/{id}
pub async fn delete_relationship(
    pool: web::Data<PgPool>,
    user: UserId,
    relationship_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    CareService::delete(pool.get_ref(), user.0, relationship_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
