use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::db::{message_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;

#[derive(Debug, Deserialize, Validate)]
pub struct PostCommunityMessagePayload {
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendDirectMessagePayload {
    pub recipient_id: Uuid,
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// POST /api/v1/communities/{community_id}/messages
pub async fn post_community_message(
    pool: web::Data<PgPool>,
    user: UserId,
    community_id: web::Path<Uuid>,
    payload: web::Json<PostCommunityMessagePayload>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let message = message_repo::create_community_message(
        pool.get_ref(),
        community_id.into_inner(),
        user.0,
        &payload.content,
    )
    .await?;

    Ok(HttpResponse::Created().json(message))
}

/// POST /api/v1/messages
pub async fn send_direct_message(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<SendDirectMessagePayload>,
) -> Result<HttpResponse> {
    payload.validate()?;

    if payload.recipient_id == user.0 {
        return Err(AppError::Validation(
            "cannot message yourself".to_string(),
        ));
    }

    if !user_repo::exists(pool.get_ref(), payload.recipient_id).await? {
        return Err(AppError::NotFound(format!(
            "User {} not found",
            payload.recipient_id
        )));
    }

    let message = message_repo::create_direct_message(
        pool.get_ref(),
        user.0,
        payload.recipient_id,
        &payload.content,
    )
    .await?;

    Ok(HttpResponse::Created().json(message))
}
