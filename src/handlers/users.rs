use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{CareCapability, UserSummary};
use crate::services::DelegationAuthorizer;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, max = 128))]
    pub display_name: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    /// Care recipient to act for; requires the profile-management capability.
    pub on_behalf_of: Option<Uuid>,
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user_id = user_id.into_inner();
    let profile = user_repo::find_by_id(pool.get_ref(), user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    Ok(HttpResponse::Ok().json(UserSummary::from(profile)))
}

/// GET /api/v1/users/me
pub async fn get_current_user(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let profile = user_repo::find_by_id(pool.get_ref(), user.0)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.0)))?;

    Ok(HttpResponse::Ok().json(profile))
}

/// PATCH /api/v1/users/me
pub async fn update_profile(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<UpdateProfilePayload>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let actor = DelegationAuthorizer::resolve_actor(
        pool.get_ref(),
        user.0,
        payload.on_behalf_of,
        CareCapability::ManageProfile,
    )
    .await?;

    let updated = user_repo::update_profile(
        pool.get_ref(),
        actor,
        payload.display_name.as_deref(),
        payload.bio.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {} not found", actor)))?;

    Ok(HttpResponse::Ok().json(updated))
}
