//! Report lifecycle rules and the review dispatch helpers that do not need
//! a database: status transitions, action type parsing, audit reason
//! priority and entity id formats.

use uuid::Uuid;

use kinship_service::models::{
    CaregiverRequestStatus, FriendRequestStatus, ModerationActionType, ReportEntityType,
    ReportReason, ReportStatus,
};
use kinship_service::services::moderation_service::resolve_action_reason;
use kinship_service::services::report_service::{parse_entity_ref, EntityRef};

#[test]
fn reports_move_only_from_reviewable_states_to_terminal_ones() {
    for source in [ReportStatus::Pending, ReportStatus::UnderReview] {
        assert!(source.can_transition_to(ReportStatus::Resolved));
        assert!(source.can_transition_to(ReportStatus::Dismissed));
        assert!(source.can_transition_to(ReportStatus::UnderReview));
        assert!(!source.can_transition_to(ReportStatus::Pending));
    }

    for terminal in [ReportStatus::Resolved, ReportStatus::Dismissed] {
        assert!(terminal.is_terminal());
        assert!(!terminal.is_reviewable());
        for target in [
            ReportStatus::Pending,
            ReportStatus::UnderReview,
            ReportStatus::Resolved,
            ReportStatus::Dismissed,
        ] {
            assert!(
                !terminal.can_transition_to(target),
                "{:?} must not transition to {:?}",
                terminal,
                target
            );
        }
    }
}

#[test]
fn request_statuses_are_terminal_after_response() {
    assert!(CaregiverRequestStatus::Pending.can_transition_to(CaregiverRequestStatus::Accepted));
    assert!(CaregiverRequestStatus::Pending.can_transition_to(CaregiverRequestStatus::Rejected));
    assert!(!CaregiverRequestStatus::Accepted.can_transition_to(CaregiverRequestStatus::Rejected));
    assert!(!CaregiverRequestStatus::Rejected.can_transition_to(CaregiverRequestStatus::Accepted));

    assert!(FriendRequestStatus::Pending.can_transition_to(FriendRequestStatus::Declined));
    assert!(!FriendRequestStatus::Declined.can_transition_to(FriendRequestStatus::Accepted));
}

#[test]
fn dispatcher_recognizes_the_known_action_types_only() {
    assert_eq!(
        ModerationActionType::parse("ban_user"),
        Some(ModerationActionType::BanUser)
    );
    assert_eq!(
        ModerationActionType::parse("delete_event"),
        Some(ModerationActionType::DeleteEvent)
    );
    assert_eq!(
        ModerationActionType::parse("dismiss_report"),
        Some(ModerationActionType::DismissReport)
    );

    // Unknown strings are preserved for the audit trail but dispatch to
    // nothing.
    assert_eq!(ModerationActionType::parse("shadowban_user"), None);
    assert_eq!(ModerationActionType::parse("BAN_USER"), None);
}

#[test]
fn audit_reason_prefers_action_reason_then_notes_then_report_reason() {
    assert_eq!(
        resolve_action_reason(
            Some("coordinated spam campaign"),
            Some("see ticket 8841"),
            ReportReason::Harassment
        ),
        "coordinated spam campaign"
    );
    assert_eq!(
        resolve_action_reason(None, Some("see ticket 8841"), ReportReason::Harassment),
        "see ticket 8841"
    );
    assert_eq!(
        resolve_action_reason(None, None, ReportReason::InappropriateContent),
        "inappropriate_content"
    );
}

#[test]
fn entity_ids_parse_per_entity_type() {
    let uuid = Uuid::new_v4();

    assert_eq!(
        parse_entity_ref(ReportEntityType::Event, &uuid.to_string()),
        Ok(EntityRef::Event(uuid))
    );
    assert_eq!(
        parse_entity_ref(ReportEntityType::CommunityMessage, "7"),
        Ok(EntityRef::CommunityMessage(7))
    );

    // A community message id is a small integer, never a UUID, and the
    // other entity types reject integers.
    assert!(parse_entity_ref(ReportEntityType::CommunityMessage, &uuid.to_string()).is_err());
    assert!(parse_entity_ref(ReportEntityType::DirectMessage, "7").is_err());
    assert!(parse_entity_ref(ReportEntityType::User, "7").is_err());
}
