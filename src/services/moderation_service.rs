//! Report review workflow and direct enforcement actions.
//!
//! A review is one atomic unit: the status transition, any dispatched
//! enforcement action and the audit record commit together or not at all.
//! The status guard inside the UPDATE is an optimistic check, not a lock;
//! a racing second reviewer loses the guard and is rejected.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::db::{event_repo, message_repo, moderation_repo, report_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{
    ModerationAction, ModerationActionType, Report, ReportEntityType, ReportReason, ReportStatus,
};
use crate::services::admin::AdminContext;

/// Applied when a user is banned and no explicit reason is available.
const DEFAULT_BAN_REASON: &str = "Violation of community guidelines";
const DEFAULT_UNBAN_REASON: &str = "Ban lifted";

#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub new_status: ReportStatus,
    pub notes: Option<String>,
    pub action_type: Option<String>,
    pub action_reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub report: Report,
    pub action: Option<ModerationAction>,
}

/// Pick the audit reason for a review-linked action: an explicit action
/// reason wins, then the admin's notes, then the report's original reason.
pub fn resolve_action_reason(
    action_reason: Option<&str>,
    notes: Option<&str>,
    report_reason: ReportReason,
) -> String {
    action_reason
        .map(str::to_string)
        .or_else(|| notes.map(str::to_string))
        .unwrap_or_else(|| report_reason.as_str().to_string())
}

pub struct ModerationService;

impl ModerationService {
    /// Transition a report through its lifecycle, optionally dispatching one
    /// enforcement action and always recording an audit entry for it.
    pub async fn review_report(
        pool: &PgPool,
        ctx: &AdminContext,
        report_id: Uuid,
        input: ReviewInput,
    ) -> Result<ReviewOutcome> {
        let report = report_repo::find_by_id(pool, report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

        if !report.status.is_reviewable() {
            return Err(AppError::InvalidState(format!(
                "report {} is already {}",
                report_id,
                report.status.as_str()
            )));
        }

        if !report.status.can_transition_to(input.new_status) {
            return Err(AppError::InvalidState(format!(
                "report cannot move from {} to {}",
                report.status.as_str(),
                input.new_status.as_str()
            )));
        }

        let mut tx = pool.begin().await?;

        // Optimistic guard: a concurrent reviewer that already reached a
        // terminal state makes this match zero rows.
        let updated = report_repo::apply_review(
            &mut *tx,
            report_id,
            input.new_status,
            ctx.admin_id,
            input.notes.as_deref(),
        )
        .await?
        .ok_or_else(|| {
            AppError::InvalidState(format!("report {} is no longer reviewable", report_id))
        })?;

        let action = match &input.action_type {
            Some(action_type) => {
                let reason = resolve_action_reason(
                    input.action_reason.as_deref(),
                    input.notes.as_deref(),
                    report.reason,
                );

                Self::dispatch_action(&mut *tx, &report, action_type, &reason).await?;

                let action = moderation_repo::insert_action(
                    &mut *tx,
                    moderation_repo::CreateActionInput {
                        report_id: Some(report_id),
                        admin_id: ctx.admin_id,
                        action_type: action_type.clone(),
                        target_user_id: Some(report.reported_user_id),
                        target_entity_id: Some(report.entity_id.clone()),
                        reason,
                    },
                )
                .await?;

                Some(action)
            }
            None => None,
        };

        tx.commit().await?;

        tracing::info!(
            report_id = %report_id,
            admin_id = %ctx.admin_id,
            status = %updated.status.as_str(),
            action_type = action.as_ref().map(|a| a.action_type.as_str()).unwrap_or("none"),
            "Report reviewed"
        );

        Ok(ReviewOutcome {
            report: updated,
            action,
        })
    }

    /// Execute the side effect for a recognized action type. Unrecognized
    /// types dispatch to nothing; the audit record is still written with the
    /// submitted string.
    async fn dispatch_action(
        conn: &mut PgConnection,
        report: &Report,
        action_type: &str,
        reason: &str,
    ) -> Result<()> {
        let Some(action) = ModerationActionType::parse(action_type) else {
            tracing::warn!(
                report_id = %report.id,
                action_type = %action_type,
                "Unrecognized moderation action type, recording audit entry only"
            );
            return Ok(());
        };

        match action {
            ModerationActionType::BanUser => {
                Self::ban_in_tx(&mut *conn, report.reported_user_id, reason).await
            }
            ModerationActionType::UnbanUser => {
                Self::unban_in_tx(&mut *conn, report.reported_user_id).await
            }
            ModerationActionType::DeleteEvent => {
                let event_id = Uuid::parse_str(&report.entity_id).map_err(|_| {
                    AppError::BadRequest("report entity id is not a valid event id".to_string())
                })?;
                if !event_repo::delete(&mut *conn, event_id).await? {
                    return Err(AppError::NotFound(format!("Event {} not found", event_id)));
                }
                Ok(())
            }
            ModerationActionType::DeleteMessage => {
                Self::delete_reported_message(&mut *conn, report).await
            }
            // Audit-only actions: the record itself is the outcome.
            ModerationActionType::WarnUser | ModerationActionType::DismissReport => Ok(()),
        }
    }

    /// The message table and id format both follow the report's stored
    /// entity type: community messages use integer ids, direct messages
    /// use UUIDs.
    async fn delete_reported_message(conn: &mut PgConnection, report: &Report) -> Result<()> {
        match report.entity_type {
            ReportEntityType::CommunityMessage => {
                let message_id: i64 = report.entity_id.parse().map_err(|_| {
                    AppError::BadRequest(
                        "report entity id is not a valid community message id".to_string(),
                    )
                })?;
                if !message_repo::delete_community_message(conn, message_id).await? {
                    return Err(AppError::NotFound(format!(
                        "Community message {} not found",
                        message_id
                    )));
                }
                Ok(())
            }
            ReportEntityType::DirectMessage => {
                let message_id = Uuid::parse_str(&report.entity_id).map_err(|_| {
                    AppError::BadRequest(
                        "report entity id is not a valid direct message id".to_string(),
                    )
                })?;
                if !message_repo::delete_direct_message(conn, message_id).await? {
                    return Err(AppError::NotFound(format!(
                        "Direct message {} not found",
                        message_id
                    )));
                }
                Ok(())
            }
            ReportEntityType::User | ReportEntityType::Event => Err(AppError::InvalidState(
                "report does not target a message".to_string(),
            )),
        }
    }

    /// Ban with guards. The same routine backs the direct endpoint and the
    /// review dispatcher so both paths refuse double-bans and admin targets.
    async fn ban_in_tx(conn: &mut PgConnection, user_id: Uuid, reason: &str) -> Result<()> {
        let (is_banned, is_admin) = user_repo::ban_state(&mut *conn, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        if is_banned {
            return Err(AppError::InvalidState("user is already banned".to_string()));
        }
        if is_admin {
            return Err(AppError::BadRequest(
                "cannot ban an admin account".to_string(),
            ));
        }

        user_repo::set_banned(conn, user_id, reason).await?;
        tracing::warn!(user_id = %user_id, reason = %reason, "User banned");
        Ok(())
    }

    async fn unban_in_tx(conn: &mut PgConnection, user_id: Uuid) -> Result<()> {
        let (is_banned, _) = user_repo::ban_state(&mut *conn, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        if !is_banned {
            return Err(AppError::InvalidState("user is not banned".to_string()));
        }

        user_repo::clear_banned(conn, user_id).await?;
        tracing::info!(user_id = %user_id, "User unbanned");
        Ok(())
    }

    /// Direct ban outside report review: same profile mutation plus an audit
    /// record without a report linkage.
    pub async fn ban_user(
        pool: &PgPool,
        ctx: &AdminContext,
        user_id: Uuid,
        reason: Option<String>,
    ) -> Result<ModerationAction> {
        let reason = reason.unwrap_or_else(|| DEFAULT_BAN_REASON.to_string());

        let mut tx = pool.begin().await?;
        Self::ban_in_tx(&mut *tx, user_id, &reason).await?;
        let action = moderation_repo::insert_action(
            &mut *tx,
            moderation_repo::CreateActionInput {
                report_id: None,
                admin_id: ctx.admin_id,
                action_type: ModerationActionType::BanUser.as_str().to_string(),
                target_user_id: Some(user_id),
                target_entity_id: None,
                reason,
            },
        )
        .await?;
        tx.commit().await?;

        Ok(action)
    }

    pub async fn unban_user(
        pool: &PgPool,
        ctx: &AdminContext,
        user_id: Uuid,
        reason: Option<String>,
    ) -> Result<ModerationAction> {
        let reason = reason.unwrap_or_else(|| DEFAULT_UNBAN_REASON.to_string());

        let mut tx = pool.begin().await?;
        Self::unban_in_tx(&mut *tx, user_id).await?;
        let action = moderation_repo::insert_action(
            &mut *tx,
            moderation_repo::CreateActionInput {
                report_id: None,
                admin_id: ctx.admin_id,
                action_type: ModerationActionType::UnbanUser.as_str().to_string(),
                target_user_id: Some(user_id),
                target_entity_id: None,
                reason,
            },
        )
        .await?;
        tx.commit().await?;

        Ok(action)
    }

    pub async fn list_actions(
        pool: &PgPool,
        target_user_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ModerationAction>> {
        Ok(moderation_repo::list_actions(pool, target_user_id, limit.min(100), offset).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_reason_priority() {
        assert_eq!(
            resolve_action_reason(Some("targeted harassment"), Some("notes"), ReportReason::Spam),
            "targeted harassment"
        );
        assert_eq!(
            resolve_action_reason(None, Some("repeat offender"), ReportReason::Spam),
            "repeat offender"
        );
        assert_eq!(
            resolve_action_reason(None, None, ReportReason::Harassment),
            "harassment"
        );
    }

    #[test]
    fn test_default_reasons_are_not_empty() {
        assert!(!DEFAULT_BAN_REASON.is_empty());
        assert!(!DEFAULT_UNBAN_REASON.is_empty());
    }
}
