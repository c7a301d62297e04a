//! Pages reachable without a session.

mod club;
mod events;
mod home;
mod store;

pub use club::{AboutUs, Contact, NotFound, Sponsors};
pub use events::PublicEvents;
pub use home::{EventHighlight, EventSummary, Home};
pub use store::{CartPage, Products};
