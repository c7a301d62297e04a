//! Records mirrored from the backend REST API.
//!
//! Field names follow the backend's JSON (Spanish and English mixed) so the
//! structs deserialize without renames; Rust-side helpers carry English names.

pub mod document;
pub mod event;
pub mod finance;
pub mod membership;
pub mod notification;
pub mod resource;
pub mod user;

pub use document::{Document, DocumentForm, DocumentList, DocumentType};
pub use event::{Event, EventPayload, Participant, RoutePayload, RouteRecord};
pub use finance::{
    BalancePeriod, BalanceReport, CheckoutItem, CheckoutRequest, CheckoutResponse, SaleConfirmation,
    SaleFilter, SaleOrder, SaleStatus, Transaction, TransactionForm, TransactionKind,
};
pub use membership::{Membership, MembershipForm, MembershipStats, ParticipationStats};
pub use notification::Notification;
pub use resource::{AssetState, Resource, ResourceBase, ResourcePayload};
pub use user::{Persona, PersonaUpdate, RegisterRequest, Role, TokenResponse, UserAccount};

use serde::{Deserialize, Serialize};

/// Body of `POST /sponsors/apply`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SponsorApplication {
    pub company_name: String,
    pub contact_name: String,
    pub position: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub proposal_description: String,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}
