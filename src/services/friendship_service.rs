//! Friend request flow. Sending supports caregiver delegation: a caregiver
//! holding the friendship-management capability may send on behalf of a
//! care recipient, and the request is recorded as the recipient's own.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{friendship_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{CareCapability, FriendRequest, FriendRequestStatus, Friendship};
use crate::services::delegation::DelegationAuthorizer;

pub struct FriendshipService;

impl FriendshipService {
    pub async fn send_request(
        pool: &PgPool,
        requesting_user: Uuid,
        recipient_id: Uuid,
        on_behalf_of: Option<Uuid>,
    ) -> Result<FriendRequest> {
        let actor = DelegationAuthorizer::resolve_actor(
            pool,
            requesting_user,
            on_behalf_of,
            CareCapability::ManageFriendships,
        )
        .await?;

        if recipient_id == actor {
            return Err(AppError::Validation(
                "cannot send a friend request to yourself".to_string(),
            ));
        }

        if !user_repo::exists(pool, recipient_id).await? {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                recipient_id
            )));
        }

        if friendship_repo::are_friends(pool, actor, recipient_id).await? {
            return Err(AppError::Conflict("already friends".to_string()));
        }

        if friendship_repo::pending_request_exists(pool, actor, recipient_id).await? {
            return Err(AppError::Conflict(
                "a pending friend request already exists".to_string(),
            ));
        }

        let request = friendship_repo::create_request(pool, actor, recipient_id).await?;

        tracing::info!(
            request_id = %request.id,
            sender = %actor,
            recipient = %recipient_id,
            delegated = on_behalf_of.is_some(),
            "Friend request sent"
        );

        Ok(request)
    }

    pub async fn accept_request(
        pool: &PgPool,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<FriendRequest> {
        let request = Self::load_request_for_response(pool, user_id, request_id).await?;

        let mut tx = pool.begin().await?;
        let accepted = friendship_repo::mark_request_responded(
            &mut *tx,
            request_id,
            FriendRequestStatus::Accepted,
        )
        .await?
        .ok_or_else(|| {
            AppError::InvalidState("friend request already responded to".to_string())
        })?;

        friendship_repo::insert_friendship_pair(&mut *tx, request.sender_id, request.recipient_id)
            .await?;
        tx.commit().await?;

        tracing::info!(request_id = %request_id, "Friend request accepted");

        Ok(accepted)
    }

    pub async fn decline_request(
        pool: &PgPool,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<FriendRequest> {
        Self::load_request_for_response(pool, user_id, request_id).await?;

        let mut conn = pool.acquire().await?;
        let declined = friendship_repo::mark_request_responded(
            &mut *conn,
            request_id,
            FriendRequestStatus::Declined,
        )
        .await?
        .ok_or_else(|| {
            AppError::InvalidState("friend request already responded to".to_string())
        })?;

        tracing::info!(request_id = %request_id, "Friend request declined");

        Ok(declined)
    }

    pub async fn list_incoming(pool: &PgPool, user_id: Uuid) -> Result<Vec<FriendRequest>> {
        Ok(friendship_repo::list_incoming_requests(pool, user_id).await?)
    }

    pub async fn list_friends(pool: &PgPool, user_id: Uuid) -> Result<Vec<Friendship>> {
        Ok(friendship_repo::list_friends(pool, user_id).await?)
    }

    async fn load_request_for_response(
        pool: &PgPool,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<FriendRequest> {
        let request = friendship_repo::find_request(pool, request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Friend request {} not found", request_id)))?;

        if request.recipient_id != user_id {
            return Err(AppError::Authorization(
                "only the recipient may respond to a friend request".to_string(),
            ));
        }

        if request.status != FriendRequestStatus::Pending {
            return Err(AppError::InvalidState(
                "friend request already responded to".to_string(),
            ));
        }

        Ok(request)
    }
}
