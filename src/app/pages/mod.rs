//! Page components, grouped by who can reach them.

pub mod admin;
pub mod auth;
pub mod format;
mod profile;
pub mod public;
pub mod user;
