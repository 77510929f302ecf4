use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "friend_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl FriendRequestStatus {
    pub fn can_transition_to(&self, new_status: FriendRequestStatus) -> bool {
        matches!(
            (self, new_status),
            (FriendRequestStatus::Pending, FriendRequestStatus::Accepted)
                | (FriendRequestStatus::Pending, FriendRequestStatus::Declined)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FriendRequestStatus::Pending => "pending",
            FriendRequestStatus::Accepted => "accepted",
            FriendRequestStatus::Declined => "declined",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FriendRequest {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Friendship {
    pub user_id: Uuid,
    pub friend_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friend_request_transitions_are_terminal() {
        assert!(FriendRequestStatus::Pending.can_transition_to(FriendRequestStatus::Accepted));
        assert!(FriendRequestStatus::Pending.can_transition_to(FriendRequestStatus::Declined));
        assert!(!FriendRequestStatus::Accepted.can_transition_to(FriendRequestStatus::Declined));
        assert!(!FriendRequestStatus::Declined.can_transition_to(FriendRequestStatus::Accepted));
    }
}
