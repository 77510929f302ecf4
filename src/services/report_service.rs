//! Report intake and reporter-facing report management.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{event_repo, message_repo, report_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Report, ReportEntityType, ReportReason, ReportStatus};

/// A reported entity id parsed into its type-specific form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    User(Uuid),
    Event(Uuid),
    CommunityMessage(i64),
    DirectMessage(Uuid),
}

/// Parse an entity id according to the reported entity type. Community
/// messages use integer ids; everything else uses UUIDs.
pub fn parse_entity_ref(
    entity_type: ReportEntityType,
    entity_id: &str,
) -> std::result::Result<EntityRef, String> {
    match entity_type {
        ReportEntityType::User => Uuid::parse_str(entity_id)
            .map(EntityRef::User)
            .map_err(|_| "invalid user id".to_string()),
        ReportEntityType::Event => Uuid::parse_str(entity_id)
            .map(EntityRef::Event)
            .map_err(|_| "invalid event id".to_string()),
        ReportEntityType::CommunityMessage => entity_id
            .parse::<i64>()
            .map(EntityRef::CommunityMessage)
            .map_err(|_| "invalid community message id".to_string()),
        ReportEntityType::DirectMessage => Uuid::parse_str(entity_id)
            .map(EntityRef::DirectMessage)
            .map_err(|_| "invalid direct message id".to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct CreateReport {
    pub entity_type: ReportEntityType,
    pub entity_id: String,
    pub reason: ReportReason,
    pub details: Option<String>,
}

pub struct ReportService;

impl ReportService {
    /// File a report. The reported user is derived from the entity type
    /// here, exactly once: user reports point at the user, event reports at
    /// the organizer, message reports at the sender.
    pub async fn create_report(
        pool: &PgPool,
        reporter_id: Uuid,
        input: CreateReport,
    ) -> Result<Report> {
        let entity_ref = parse_entity_ref(input.entity_type, &input.entity_id)
            .map_err(AppError::BadRequest)?;

        let reported_user_id = match entity_ref {
            EntityRef::User(user_id) => {
                if !user_repo::exists(pool, user_id).await? {
                    return Err(AppError::NotFound(format!("User {} not found", user_id)));
                }
                user_id
            }
            EntityRef::Event(event_id) => event_repo::organizer_of(pool, event_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?,
            EntityRef::CommunityMessage(message_id) => {
                message_repo::community_message_sender(pool, message_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Community message {} not found", message_id))
                    })?
            }
            EntityRef::DirectMessage(message_id) => {
                message_repo::direct_message_sender(pool, message_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Direct message {} not found", message_id))
                    })?
            }
        };

        let report = report_repo::create(
            pool,
            report_repo::CreateReportInput {
                reporter_id,
                entity_type: input.entity_type,
                entity_id: input.entity_id,
                reported_user_id,
                reason: input.reason,
                details: input.details,
            },
        )
        .await?;

        Ok(report)
    }

    pub async fn list_own(
        pool: &PgPool,
        reporter_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>> {
        Ok(report_repo::list_by_reporter(pool, reporter_id, limit.min(100), offset).await?)
    }

    pub async fn list_for_review(
        pool: &PgPool,
        status: Option<ReportStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>> {
        Ok(report_repo::list_for_review(pool, status, limit.min(100), offset).await?)
    }

    pub async fn get(pool: &PgPool, report_id: Uuid) -> Result<Report> {
        report_repo::find_by_id(pool, report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))
    }

    /// Reporters may withdraw their own report while it is still pending.
    pub async fn delete_own(pool: &PgPool, reporter_id: Uuid, report_id: Uuid) -> Result<()> {
        let report = Self::get(pool, report_id).await?;

        if report.reporter_id != reporter_id {
            return Err(AppError::Authorization(
                "only the reporter may delete a report".to_string(),
            ));
        }

        if report.status != ReportStatus::Pending {
            return Err(AppError::InvalidState(
                "only pending reports can be deleted".to_string(),
            ));
        }

        if !report_repo::delete_pending(pool, report_id, reporter_id).await? {
            return Err(AppError::InvalidState(
                "report is no longer pending".to_string(),
            ));
        }

        tracing::info!(report_id = %report_id, "Report withdrawn by reporter");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_parse_follows_entity_type() {
        let uuid = Uuid::new_v4();
        assert_eq!(
            parse_entity_ref(ReportEntityType::User, &uuid.to_string()),
            Ok(EntityRef::User(uuid))
        );
        assert_eq!(
            parse_entity_ref(ReportEntityType::Event, &uuid.to_string()),
            Ok(EntityRef::Event(uuid))
        );
        assert_eq!(
            parse_entity_ref(ReportEntityType::DirectMessage, &uuid.to_string()),
            Ok(EntityRef::DirectMessage(uuid))
        );
        assert_eq!(
            parse_entity_ref(ReportEntityType::CommunityMessage, "42"),
            Ok(EntityRef::CommunityMessage(42))
        );
    }

    #[test]
    fn test_malformed_entity_ids_are_rejected() {
        assert!(parse_entity_ref(ReportEntityType::Event, "42").is_err());
        assert!(parse_entity_ref(ReportEntityType::CommunityMessage, "not-a-number").is_err());
        assert!(parse_entity_ref(
            ReportEntityType::CommunityMessage,
            &Uuid::new_v4().to_string()
        )
        .is_err());
        assert!(parse_entity_ref(ReportEntityType::User, "").is_err());
    }
}
