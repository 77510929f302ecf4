//! Resolves the effective actor when a caregiver acts on behalf of a care
//! recipient.
//!
//! Acting for self is the common case and never touches the database; only
//! an explicit `on_behalf_of` target costs a relationship lookup.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::care_repo;
use crate::error::{AppError, Result};
use crate::models::{CareCapability, CareRelationship};

/// Why a delegated action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationDenied {
    NoActiveRelationship,
    InsufficientPermissions,
}

impl DelegationDenied {
    pub fn message(&self) -> &'static str {
        match self {
            DelegationDenied::NoActiveRelationship => "no active caregiver relationship",
            DelegationDenied::InsufficientPermissions => "insufficient permissions",
        }
    }
}

impl From<DelegationDenied> for AppError {
    fn from(denied: DelegationDenied) -> Self {
        AppError::Authorization(denied.message().to_string())
    }
}

/// Decide the delegation outcome for an explicit target.
///
/// A missing row and a revoked row are indistinguishable to the caller:
/// both deny with "no active caregiver relationship".
pub fn evaluate(
    target: Uuid,
    capability: CareCapability,
    relationship: Option<&CareRelationship>,
) -> std::result::Result<Uuid, DelegationDenied> {
    let relationship = match relationship {
        Some(rel) if rel.is_active => rel,
        _ => return Err(DelegationDenied::NoActiveRelationship),
    };

    if relationship.grants(capability) {
        Ok(target)
    } else {
        Err(DelegationDenied::InsufficientPermissions)
    }
}

pub struct DelegationAuthorizer;

impl DelegationAuthorizer {
    /// Determine the effective actor for an operation.
    ///
    /// With no `on_behalf_of` target the requester acts for themselves and
    /// no relationship query is made. With a target, the requester must hold
    /// an active care relationship granting `capability` over that target;
    /// the effective actor is then the target.
    pub async fn resolve_actor(
        pool: &PgPool,
        requesting_user: Uuid,
        on_behalf_of: Option<Uuid>,
        capability: CareCapability,
    ) -> Result<Uuid> {
        let target = match on_behalf_of {
            None => return Ok(requesting_user),
            Some(target) if target == requesting_user => return Ok(requesting_user),
            Some(target) => target,
        };

        let relationship = care_repo::find_for_pair(pool, requesting_user, target).await?;

        match evaluate(target, capability, relationship.as_ref()) {
            Ok(actor) => {
                tracing::debug!(
                    caregiver = %requesting_user,
                    recipient = %target,
                    capability = %capability.as_str(),
                    "Delegated action authorized"
                );
                Ok(actor)
            }
            Err(denied) => {
                tracing::debug!(
                    caregiver = %requesting_user,
                    recipient = %target,
                    capability = %capability.as_str(),
                    reason = %denied.message(),
                    "Delegated action refused"
                );
                Err(denied.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn relationship(
        caregiver: Uuid,
        recipient: Uuid,
        events: bool,
        profile: bool,
        friendships: bool,
        active: bool,
    ) -> CareRelationship {
        CareRelationship {
            id: Uuid::new_v4(),
            caregiver_id: caregiver,
            recipient_id: recipient,
            can_manage_events: events,
            can_manage_profile: profile,
            can_manage_friendships: friendships,
            is_active: active,
            created_at: Utc::now(),
            revoked_at: None,
        }
    }

    #[test]
    fn test_missing_relationship_is_denied() {
        let target = Uuid::new_v4();
        assert_eq!(
            evaluate(target, CareCapability::ManageFriendships, None),
            Err(DelegationDenied::NoActiveRelationship)
        );
    }

    #[test]
    fn test_revoked_relationship_is_denied_even_with_flags_set() {
        let caregiver = Uuid::new_v4();
        let target = Uuid::new_v4();
        let rel = relationship(caregiver, target, true, true, true, false);
        assert_eq!(
            evaluate(target, CareCapability::ManageFriendships, Some(&rel)),
            Err(DelegationDenied::NoActiveRelationship)
        );
    }

    #[test]
    fn test_capability_flags_are_independent() {
        // Friendship management granted, event management withheld.
        let caregiver = Uuid::new_v4();
        let target = Uuid::new_v4();
        let rel = relationship(caregiver, target, false, false, true, true);

        assert_eq!(
            evaluate(target, CareCapability::ManageFriendships, Some(&rel)),
            Ok(target)
        );
        assert_eq!(
            evaluate(target, CareCapability::ManageEvents, Some(&rel)),
            Err(DelegationDenied::InsufficientPermissions)
        );
        assert_eq!(
            evaluate(target, CareCapability::ManageProfile, Some(&rel)),
            Err(DelegationDenied::InsufficientPermissions)
        );
    }

    #[test]
    fn test_denial_messages() {
        assert_eq!(
            DelegationDenied::NoActiveRelationship.message(),
            "no active caregiver relationship"
        );
        assert_eq!(
            DelegationDenied::InsufficientPermissions.message(),
            "insufficient permissions"
        );
    }
}
