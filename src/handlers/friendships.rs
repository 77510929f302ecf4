use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::FriendshipService;

#[derive(Debug, Deserialize)]
pub struct SendFriendRequestPayload {
    pub recipient_id: Uuid,
    /// Care recipient to act for; requires the friendship-management
    /// capability.
    pub on_behalf_of: Option<Uuid>,
}

/// POST /api/v1/friends/requests
pub async fn send_friend_request(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<SendFriendRequestPayload>,
) -> Result<HttpResponse> {
    let request = FriendshipService::send_request(
        pool.get_ref(),
        user.0,
        payload.recipient_id,
        payload.on_behalf_of,
    )
    .await?;

    Ok(HttpResponse::Created().json(request))
}

/// GET /api/v1/friends/requests/incoming
pub async fn list_incoming_friend_requests(
    pool: web::Data<PgPool>,
    user: UserId,
) -> Result<HttpResponse> {
    let requests = FriendshipService::list_incoming(pool.get_ref(), user.0).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// POST /api/v1/friends/requests/{id}/accept
pub async fn accept_friend_request(
    pool: web::Data<PgPool>,
    user: UserId,
    request_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let request =
        FriendshipService::accept_request(pool.get_ref(), user.0, request_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(request))
}

/// POST /api/v1/friends/requests/{id}/decline
pub async fn decline_friend_request(
    pool: web::Data<PgPool>,
    user: UserId,
    request_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let request =
        FriendshipService::decline_request(pool.get_ref(), user.0, request_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(request))
}

/// GET /api/v1/friends
pub async fn list_friends(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let friends = FriendshipService::list_friends(pool.get_ref(), user.0).await?;
    Ok(HttpResponse::Ok().json(friends))
}
