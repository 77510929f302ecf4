use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Enforcement actions the review dispatcher knows how to execute.
///
/// The audit trail stores the submitted action string verbatim, so records
/// can carry types this enum does not recognize; those dispatch to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationActionType {
    BanUser,
    UnbanUser,
    DeleteEvent,
    DeleteMessage,
    WarnUser,
    DismissReport,
}

impl ModerationActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationActionType::BanUser => "ban_user",
            ModerationActionType::UnbanUser => "unban_user",
            ModerationActionType::DeleteEvent => "delete_event",
            ModerationActionType::DeleteMessage => "delete_message",
            ModerationActionType::WarnUser => "warn_user",
            ModerationActionType::DismissReport => "dismiss_report",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ban_user" => Some(ModerationActionType::BanUser),
            "unban_user" => Some(ModerationActionType::UnbanUser),
            "delete_event" => Some(ModerationActionType::DeleteEvent),
            "delete_message" => Some(ModerationActionType::DeleteMessage),
            "warn_user" => Some(ModerationActionType::WarnUser),
            "dismiss_report" => Some(ModerationActionType::DismissReport),
            _ => None,
        }
    }
}

/// Append-only audit record of an admin decision.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ModerationAction {
    pub id: Uuid,
    pub report_id: Option<Uuid>,
    pub admin_id: Uuid,
    pub action_type: String,
    pub target_user_id: Option<Uuid>,
    pub target_entity_id: Option<String>,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_round_trip() {
        for action in [
            ModerationActionType::BanUser,
            ModerationActionType::UnbanUser,
            ModerationActionType::DeleteEvent,
            ModerationActionType::DeleteMessage,
            ModerationActionType::WarnUser,
            ModerationActionType::DismissReport,
        ] {
            assert_eq!(ModerationActionType::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_unknown_action_type_is_none() {
        assert_eq!(ModerationActionType::parse("shadowban_user"), None);
        assert_eq!(ModerationActionType::parse(""), None);
    }
}
