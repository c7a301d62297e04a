//! Member dashboard pages, mounted under `/user` behind the role guard.

mod events;
mod home;
mod membership;
mod notifications;

pub use events::AvailableEvents;
pub use home::{UserEditProfile, UserWelcome};
pub use membership::{CreateMembership, MyMembership};
pub use notifications::Notifications;
