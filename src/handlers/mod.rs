pub mod care;
pub mod events;
pub mod friendships;
pub mod health;
pub mod messages;
pub mod moderation;
pub mod reports;
pub mod users;

pub use care::*;
pub use events::*;
pub use friendships::*;
pub use health::*;
pub use messages::*;
pub use moderation::*;
pub use reports::*;
pub use users::*;
