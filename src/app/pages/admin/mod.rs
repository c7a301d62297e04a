//! Administrator dashboard pages, mounted under `/admin` behind the
//! role guard.

mod documents;
mod events;
mod finance;
mod home;
mod resources;
mod routes;
mod users;

pub use documents::{CreateDocument, Documents};
pub use events::{CreateEvent, EditEvent, EventList, ParticipantList};
pub use finance::{CreateRecord, FinancePanel, Records};
pub use home::{AdminEditProfile, AdminWelcome};
pub use resources::{CreateResource, ResourceList};
pub use routes::{CreateRoute, RouteList};
pub use users::{MemberList, UserList};
