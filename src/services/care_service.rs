//! Caregiver request lifecycle and care relationship management.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{care_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{CareRelationship, CaregiverRequest, CaregiverRequestStatus};

#[derive(Debug, Clone)]
pub struct SendCareRequest {
    pub recipient_id: Uuid,
    pub can_manage_events: bool,
    pub can_manage_profile: bool,
    pub can_manage_friendships: bool,
    pub message: Option<String>,
}

/// Flag overrides the recipient may supply when accepting; absent flags fall
/// back to what the caregiver originally requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptOverrides {
    pub can_manage_events: Option<bool>,
    pub can_manage_profile: Option<bool>,
    pub can_manage_friendships: Option<bool>,
}

impl AcceptOverrides {
    /// Resolve the granted flags against the request. Each override applies
    /// independently; an absent field keeps the requested value.
    pub fn resolve(&self, request: &CaregiverRequest) -> (bool, bool, bool) {
        (
            self.can_manage_events.unwrap_or(request.can_manage_events),
            self.can_manage_profile.unwrap_or(request.can_manage_profile),
            self.can_manage_friendships
                .unwrap_or(request.can_manage_friendships),
        )
    }
}

pub struct CareService;

impl CareService {
    pub async fn send_request(
        pool: &PgPool,
        caregiver_id: Uuid,
        request: SendCareRequest,
    ) -> Result<CaregiverRequest> {
        if request.recipient_id == caregiver_id {
            return Err(AppError::Validation(
                "cannot request caregiver access to your own account".to_string(),
            ));
        }

        if !user_repo::exists(pool, request.recipient_id).await? {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                request.recipient_id
            )));
        }

        if let Some(existing) =
            care_repo::find_for_pair(pool, caregiver_id, request.recipient_id).await?
        {
            if existing.is_active {
                return Err(AppError::Conflict(
                    "an active care relationship already exists".to_string(),
                ));
            }
        }

        if care_repo::pending_request_exists(pool, caregiver_id, request.recipient_id).await? {
            return Err(AppError::Conflict(
                "a pending caregiver request already exists".to_string(),
            ));
        }

        let created = care_repo::create_request(
            pool,
            caregiver_id,
            request.recipient_id,
            request.can_manage_events,
            request.can_manage_profile,
            request.can_manage_friendships,
            request.message.as_deref(),
        )
        .await?;

        tracing::info!(
            request_id = %created.id,
            caregiver = %caregiver_id,
            recipient = %request.recipient_id,
            "Caregiver request sent"
        );

        Ok(created)
    }

    /// Accept a pending request and establish (or reactivate) the
    /// relationship in the same transaction.
    pub async fn accept_request(
        pool: &PgPool,
        recipient_id: Uuid,
        request_id: Uuid,
        overrides: AcceptOverrides,
    ) -> Result<CareRelationship> {
        Self::load_request_for_response(pool, recipient_id, request_id).await?;

        let mut tx = pool.begin().await?;

        let accepted =
            care_repo::mark_request_responded(&mut *tx, request_id, CaregiverRequestStatus::Accepted)
                .await?
                .ok_or_else(|| {
                    AppError::InvalidState("caregiver request already responded to".to_string())
                })?;

        let (can_manage_events, can_manage_profile, can_manage_friendships) =
            overrides.resolve(&accepted);
        let relationship = care_repo::upsert_relationship(
            &mut *tx,
            accepted.caregiver_id,
            accepted.recipient_id,
            can_manage_events,
            can_manage_profile,
            can_manage_friendships,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            request_id = %request_id,
            relationship_id = %relationship.id,
            caregiver = %relationship.caregiver_id,
            recipient = %relationship.recipient_id,
            "Caregiver request accepted"
        );

        Ok(relationship)
    }

    pub async fn reject_request(
        pool: &PgPool,
        recipient_id: Uuid,
        request_id: Uuid,
    ) -> Result<CaregiverRequest> {
        Self::load_request_for_response(pool, recipient_id, request_id).await?;

        let mut conn = pool.acquire().await?;
        let rejected =
            care_repo::mark_request_responded(&mut *conn, request_id, CaregiverRequestStatus::Rejected)
                .await?
                .ok_or_else(|| {
                    AppError::InvalidState("caregiver request already responded to".to_string())
                })?;

        tracing::info!(request_id = %request_id, "Caregiver request rejected");

        Ok(rejected)
    }

    /// Only the sender may cancel, and only while the request is pending.
    pub async fn cancel_request(pool: &PgPool, caregiver_id: Uuid, request_id: Uuid) -> Result<()> {
        let request = care_repo::find_request(pool, request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Caregiver request {} not found", request_id)))?;

        if request.caregiver_id != caregiver_id {
            return Err(AppError::Authorization(
                "only the sender may cancel a caregiver request".to_string(),
            ));
        }

        if request.status != CaregiverRequestStatus::Pending {
            return Err(AppError::InvalidState(
                "only pending caregiver requests can be cancelled".to_string(),
            ));
        }

        if !care_repo::delete_pending_request(pool, request_id, caregiver_id).await? {
            return Err(AppError::InvalidState(
                "caregiver request already responded to".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn list_incoming_requests(
        pool: &PgPool,
        recipient_id: Uuid,
    ) -> Result<Vec<CaregiverRequest>> {
        Ok(care_repo::list_incoming_requests(pool, recipient_id).await?)
    }

    pub async fn list_outgoing_requests(
        pool: &PgPool,
        caregiver_id: Uuid,
    ) -> Result<Vec<CaregiverRequest>> {
        Ok(care_repo::list_outgoing_requests(pool, caregiver_id).await?)
    }

    pub async fn list_as_caregiver(
        pool: &PgPool,
        caregiver_id: Uuid,
    ) -> Result<Vec<CareRelationship>> {
        Ok(care_repo::list_as_caregiver(pool, caregiver_id).await?)
    }

    pub async fn list_as_recipient(
        pool: &PgPool,
        recipient_id: Uuid,
    ) -> Result<Vec<CareRelationship>> {
        Ok(care_repo::list_as_recipient(pool, recipient_id).await?)
    }

    /// Capability flags are mutable only by the recipient, and only while
    /// the relationship is active.
    pub async fn update_permissions(
        pool: &PgPool,
        user_id: Uuid,
        relationship_id: Uuid,
        can_manage_events: bool,
        can_manage_profile: bool,
        can_manage_friendships: bool,
    ) -> Result<CareRelationship> {
        let relationship = Self::load_relationship(pool, relationship_id).await?;

        if relationship.recipient_id != user_id {
            return Err(AppError::Authorization(
                "only the care recipient may change capability flags".to_string(),
            ));
        }

        if !relationship.is_active {
            return Err(AppError::InvalidState(
                "care relationship is not active".to_string(),
            ));
        }

        let updated = care_repo::update_flags(
            pool,
            relationship_id,
            can_manage_events,
            can_manage_profile,
            can_manage_friendships,
        )
        .await?
        .ok_or_else(|| AppError::InvalidState("care relationship is not active".to_string()))?;

        tracing::info!(
            relationship_id = %relationship_id,
            "Care relationship permissions updated"
        );

        Ok(updated)
    }

    /// Either party may revoke. The row survives with `is_active` false so
    /// history is kept and delegation checks start failing immediately.
    pub async fn revoke(
        pool: &PgPool,
        user_id: Uuid,
        relationship_id: Uuid,
    ) -> Result<CareRelationship> {
        let relationship = Self::load_relationship(pool, relationship_id).await?;

        if !relationship.involves(user_id) {
            return Err(AppError::Authorization(
                "not a party to this care relationship".to_string(),
            ));
        }

        if !relationship.is_active {
            return Err(AppError::InvalidState(
                "care relationship already revoked".to_string(),
            ));
        }

        let revoked = care_repo::revoke_relationship(pool, relationship_id)
            .await?
            .ok_or_else(|| {
                AppError::InvalidState("care relationship already revoked".to_string())
            })?;

        tracing::info!(
            relationship_id = %relationship_id,
            revoked_by = %user_id,
            "Care relationship revoked"
        );

        Ok(revoked)
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, relationship_id: Uuid) -> Result<()> {
        let relationship = Self::load_relationship(pool, relationship_id).await?;

        if !relationship.involves(user_id) {
            return Err(AppError::Authorization(
                "not a party to this care relationship".to_string(),
            ));
        }

        care_repo::delete_relationship(pool, relationship_id).await?;

        tracing::info!(
            relationship_id = %relationship_id,
            deleted_by = %user_id,
            "Care relationship deleted"
        );

        Ok(())
    }

    async fn load_relationship(pool: &PgPool, relationship_id: Uuid) -> Result<CareRelationship> {
        care_repo::find_relationship(pool, relationship_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Care relationship {} not found", relationship_id))
            })
    }

    async fn load_request_for_response(
        pool: &PgPool,
        recipient_id: Uuid,
        request_id: Uuid,
    ) -> Result<CaregiverRequest> {
        let request = care_repo::find_request(pool, request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Caregiver request {} not found", request_id)))?;

        if request.recipient_id != recipient_id {
            return Err(AppError::Authorization(
                "only the recipient may respond to a caregiver request".to_string(),
            ));
        }

        if request.status != CaregiverRequestStatus::Pending {
            return Err(AppError::InvalidState(
                "caregiver request already responded to".to_string(),
            ));
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pending_request(events: bool, profile: bool, friendships: bool) -> CaregiverRequest {
        CaregiverRequest {
            id: Uuid::new_v4(),
            caregiver_id: Uuid::new_v4(),
            recipient_id: Uuid::new_v4(),
            status: CaregiverRequestStatus::Pending,
            can_manage_events: events,
            can_manage_profile: profile,
            can_manage_friendships: friendships,
            message: None,
            created_at: Utc::now(),
            responded_at: None,
        }
    }

    #[test]
    fn test_no_overrides_keep_the_requested_flags() {
        let request = pending_request(true, false, true);
        assert_eq!(
            AcceptOverrides::default().resolve(&request),
            (true, false, true)
        );
    }

    #[test]
    fn test_overrides_apply_per_flag() {
        let request = pending_request(true, false, true);

        let narrowed = AcceptOverrides {
            can_manage_events: Some(false),
            ..Default::default()
        };
        assert_eq!(narrowed.resolve(&request), (false, false, true));

        let mixed = AcceptOverrides {
            can_manage_profile: Some(true),
            can_manage_friendships: Some(false),
            ..Default::default()
        };
        assert_eq!(mixed.resolve(&request), (true, true, false));
    }
}
