use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A category of delegated action a caregiver can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareCapability {
    ManageEvents,
    ManageProfile,
    ManageFriendships,
}

impl CareCapability {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareCapability::ManageEvents => "manage_events",
            CareCapability::ManageProfile => "manage_profile",
            CareCapability::ManageFriendships => "manage_friendships",
        }
    }
}

/// An established grant from a caregiver to act for a recipient.
///
/// One row exists per (caregiver, recipient) pair. Revocation flips
/// `is_active` instead of deleting the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareRelationship {
    pub id: Uuid,
    pub caregiver_id: Uuid,
    pub recipient_id: Uuid,
    pub can_manage_events: bool,
    pub can_manage_profile: bool,
    pub can_manage_friendships: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl CareRelationship {
    /// Whether this relationship currently grants the capability.
    /// An inactive relationship grants nothing regardless of its flags.
    pub fn grants(&self, capability: CareCapability) -> bool {
        if !self.is_active {
            return false;
        }
        match capability {
            CareCapability::ManageEvents => self.can_manage_events,
            CareCapability::ManageProfile => self.can_manage_profile,
            CareCapability::ManageFriendships => self.can_manage_friendships,
        }
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.caregiver_id == user_id || self.recipient_id == user_id
    }
}

/// Caregiver request status with state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "caregiver_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CaregiverRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl CaregiverRequestStatus {
    /// Validate state transition (pending -> accepted/rejected only)
    pub fn can_transition_to(&self, new_status: CaregiverRequestStatus) -> bool {
        matches!(
            (self, new_status),
            (CaregiverRequestStatus::Pending, CaregiverRequestStatus::Accepted)
                | (CaregiverRequestStatus::Pending, CaregiverRequestStatus::Rejected)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaregiverRequestStatus::Pending => "pending",
            CaregiverRequestStatus::Accepted => "accepted",
            CaregiverRequestStatus::Rejected => "rejected",
        }
    }
}

/// A proposal to establish a care relationship.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaregiverRequest {
    pub id: Uuid,
    pub caregiver_id: Uuid,
    pub recipient_id: Uuid,
    pub status: CaregiverRequestStatus,
    pub can_manage_events: bool,
    pub can_manage_profile: bool,
    pub can_manage_friendships: bool,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relationship(active: bool) -> CareRelationship {
        CareRelationship {
            id: Uuid::new_v4(),
            caregiver_id: Uuid::new_v4(),
            recipient_id: Uuid::new_v4(),
            can_manage_events: false,
            can_manage_profile: true,
            can_manage_friendships: true,
            is_active: active,
            created_at: Utc::now(),
            revoked_at: None,
        }
    }

    #[test]
    fn test_grants_checks_the_matching_flag() {
        let rel = relationship(true);
        assert!(rel.grants(CareCapability::ManageFriendships));
        assert!(rel.grants(CareCapability::ManageProfile));
        assert!(!rel.grants(CareCapability::ManageEvents));
    }

    #[test]
    fn test_inactive_relationship_grants_nothing() {
        let rel = relationship(false);
        assert!(!rel.grants(CareCapability::ManageFriendships));
        assert!(!rel.grants(CareCapability::ManageProfile));
        assert!(!rel.grants(CareCapability::ManageEvents));
    }

    #[test]
    fn test_request_status_transitions() {
        assert!(CaregiverRequestStatus::Pending
            .can_transition_to(CaregiverRequestStatus::Accepted));
        assert!(CaregiverRequestStatus::Pending
            .can_transition_to(CaregiverRequestStatus::Rejected));
        assert!(!CaregiverRequestStatus::Accepted
            .can_transition_to(CaregiverRequestStatus::Rejected));
        assert!(!CaregiverRequestStatus::Rejected
            .can_transition_to(CaregiverRequestStatus::Accepted));
    }
}
