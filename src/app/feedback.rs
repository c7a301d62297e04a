//! Outcome reporting for page handlers.
//!
//! Bundles the toast queue with what an expired session needs: dropping
//! the token and the cached profile, then sending the visitor to `/login`.

use dioxus::prelude::*;
use dioxus::router::Navigator;

use crate::auth::guard::LOGIN_PATH;
use crate::auth::Session;
use crate::error::ApiError;
use crate::validation::ValidationError;

use super::toast::{use_toast, ToastContext};
use super::user_context::{use_user, UserContext};

#[derive(Clone, Copy)]
pub struct Feedback {
    pub toast: ToastContext,
    user: UserContext,
    nav: Navigator,
}

impl Feedback {
    pub fn success(&self, message: impl Into<String>) {
        self.toast.success(message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.toast.info(message);
    }

    /// Form rejected before any request went out.
    pub fn invalid(&self, err: &ValidationError) {
        self.toast.warning(err.to_string());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.toast.error(message);
    }

    /// Toast a failed call; an expired session also logs out.
    pub fn api(&self, err: &ApiError) {
        tracing::error!("Request failed: {:?}", err);
        self.toast.error(err.to_string());
        if err.requires_login() {
            self.expire_session();
        }
    }

    /// Drop the token and cached profile, then go to `/login`.
    pub fn expire_session(&self) {
        self.user.logout(&Session::browser());
        self.nav.replace(LOGIN_PATH);
    }

    pub fn navigate(&self, path: &str) {
        self.nav.push(path);
    }
}

pub fn use_feedback() -> Feedback {
    Feedback {
        toast: use_toast(),
        user: use_user(),
        nav: navigator(),
    }
}
