pub mod care;
pub mod event;
pub mod friendship;
pub mod message;
pub mod moderation;
pub mod report;
pub mod user;

pub use care::{CareCapability, CareRelationship, CaregiverRequest, CaregiverRequestStatus};
pub use event::Event;
pub use friendship::{FriendRequest, FriendRequestStatus, Friendship};
pub use message::{CommunityMessage, DirectMessage};
pub use moderation::{ModerationAction, ModerationActionType};
pub use report::{Report, ReportEntityType, ReportReason, ReportStatus};
pub use user::{UserProfile, UserSummary};
