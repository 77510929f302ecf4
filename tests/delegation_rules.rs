//! Delegation decision table, exercised without a database: the pure
//! `evaluate` step receives whatever relationship row the lookup produced.

use chrono::Utc;
use uuid::Uuid;

use kinship_service::models::{CareCapability, CareRelationship};
use kinship_service::services::delegation::{evaluate, DelegationDenied};

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
fn no_relationship_row_denies_with_no_active_relationship() {
    let target = Uuid::new_v4();
    for capability in [
        CareCapability::ManageEvents,
        CareCapability::ManageProfile,
        CareCapability::ManageFriendships,
    ] {
        assert_eq!(
            evaluate(target, capability, None),
            Err(DelegationDenied::NoActiveRelationship),
            "capability {:?} should be denied without a relationship",
            capability
        );
    }
}

#[test]
fn revoked_relationship_denies_even_with_every_flag_set() {
    let caregiver = Uuid::new_v4();
    let target = Uuid::new_v4();
    let mut rel = relationship(caregiver, target, true, true, true, true);

    assert_eq!(
        evaluate(target, CareCapability::ManageEvents, Some(&rel)),
        Ok(target)
    );

    // Revocation flips is_active; the row itself survives.
    rel.is_active = false;
    rel.revoked_at = Some(Utc::now());

    assert_eq!(
        evaluate(target, CareCapability::ManageEvents, Some(&rel)),
        Err(DelegationDenied::NoActiveRelationship)
    );
}

#[test]
fn caregiver_with_friendship_grant_but_not_events() {
    // Caregiver C has an active relationship with recipient R where
    // friendship management is granted and event management is not.
    let caregiver = Uuid::new_v4();
    let recipient = Uuid::new_v4();
    let rel = relationship(caregiver, recipient, false, false, true, true);

    // Sending a friend request on behalf of R succeeds with effective
    // actor R.
    assert_eq!(
        evaluate(recipient, CareCapability::ManageFriendships, Some(&rel)),
        Ok(recipient)
    );

    // Creating an event on behalf of R is refused for lack of the flag.
    assert_eq!(
        evaluate(recipient, CareCapability::ManageEvents, Some(&rel)),
        Err(DelegationDenied::InsufficientPermissions)
    );
}

#[test]
fn denial_reasons_distinguish_missing_grant_from_missing_relationship() {
    assert_eq!(
        DelegationDenied::NoActiveRelationship.message(),
        "no active caregiver relationship"
    );
    assert_eq!(
        DelegationDenied::InsufficientPermissions.message(),
        "insufficient permissions"
    );
}
