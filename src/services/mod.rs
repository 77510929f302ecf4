pub mod admin;
pub mod care_service;
pub mod delegation;
pub mod friendship_service;
pub mod moderation_service;
pub mod report_service;

pub use admin::AdminContext;
pub use care_service::CareService;
pub use delegation::DelegationAuthorizer;
pub use friendship_service::FriendshipService;
pub use moderation_service::ModerationService;
pub use report_service::ReportService;
