use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Report status enum with state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    UnderReview,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    /// Pending and under-review reports are the only ones an admin may act on.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, ReportStatus::Pending | ReportStatus::UnderReview)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Resolved | ReportStatus::Dismissed)
    }

    /// Validate state transition. A reviewable report may move to under
    /// review or to a terminal state; terminal states accept nothing.
    pub fn can_transition_to(&self, new_status: ReportStatus) -> bool {
        self.is_reviewable()
            && matches!(
                new_status,
                ReportStatus::UnderReview | ReportStatus::Resolved | ReportStatus::Dismissed
            )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::UnderReview => "under_review",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Dismissed => "dismissed",
        }
    }
}

/// What kind of entity a report targets. Determines how the stored entity id
/// is parsed (UUID for users, events and direct messages, integer for
/// community messages) and whose profile the report is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_entity_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportEntityType {
    User,
    Event,
    CommunityMessage,
    DirectMessage,
}

impl ReportEntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportEntityType::User => "user",
            ReportEntityType::Event => "event",
            ReportEntityType::CommunityMessage => "community_message",
            ReportEntityType::DirectMessage => "direct_message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_reason", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Harassment,
    Spam,
    InappropriateContent,
    Impersonation,
    Other,
}

impl ReportReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Harassment => "harassment",
            ReportReason::Spam => "spam",
            ReportReason::InappropriateContent => "inappropriate_content",
            ReportReason::Impersonation => "impersonation",
            ReportReason::Other => "other",
        }
    }
}

/// A flagged entity plus triage metadata.
///
/// `reported_user_id` is derived once at creation from the entity type
/// (user -> itself, event -> organizer, message -> sender) and never
/// recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub entity_type: ReportEntityType,
    pub entity_id: String,
    pub reported_user_id: Uuid,
    pub reason: ReportReason,
    pub details: Option<String>,
    pub status: ReportStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_status_transitions() {
        assert!(ReportStatus::Pending.can_transition_to(ReportStatus::UnderReview));
        assert!(ReportStatus::Pending.can_transition_to(ReportStatus::Resolved));
        assert!(ReportStatus::Pending.can_transition_to(ReportStatus::Dismissed));
        assert!(ReportStatus::UnderReview.can_transition_to(ReportStatus::Resolved));
        assert!(ReportStatus::UnderReview.can_transition_to(ReportStatus::Dismissed));

        assert!(!ReportStatus::Resolved.can_transition_to(ReportStatus::Dismissed));
        assert!(!ReportStatus::Resolved.can_transition_to(ReportStatus::UnderReview));
        assert!(!ReportStatus::Dismissed.can_transition_to(ReportStatus::Resolved));
        assert!(!ReportStatus::UnderReview.can_transition_to(ReportStatus::Pending));
    }

    #[test]
    fn test_terminal_states_are_not_reviewable() {
        assert!(ReportStatus::Pending.is_reviewable());
        assert!(ReportStatus::UnderReview.is_reviewable());
        assert!(!ReportStatus::Resolved.is_reviewable());
        assert!(!ReportStatus::Dismissed.is_reviewable());
        assert!(ReportStatus::Resolved.is_terminal());
        assert!(ReportStatus::Dismissed.is_terminal());
    }
}
