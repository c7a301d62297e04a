//! Shared UI components for the web client.

pub mod error_alert;
pub mod form_inputs;
pub mod layout;
pub mod modal;
pub mod nav;
pub mod notification_card;
pub mod shell;
pub mod sidebar;
pub mod toast_host;

pub use error_alert::{ErrorAlert, Loading};
pub use form_inputs::{plain_options, FileField, PasswordField, SelectField, TextArea, TextField};
pub use layout::{AuthLayout, Footer, PublicLayout};
pub use modal::{ChecklistModal, Modal};
pub use nav::PublicNav;
pub use notification_card::NotificationCard;
pub use shell::{AdminShell, UserShell};
pub use sidebar::Sidebar;
pub use toast_host::ToastHost;
