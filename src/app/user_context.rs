//! Signed-in user's profile, shared via context.
//!
//! Loaded once on startup when a live token exists and again after login.

use dioxus::prelude::*;

use crate::auth::{now_timestamp, Session};
use crate::models::{Role, UserAccount};
use crate::services::{self, ApiClient};

#[derive(Clone, Copy)]
pub struct UserContext {
    account: Signal<Option<UserAccount>>,
    loading: Signal<bool>,
}

impl UserContext {
    pub fn account(&self) -> Option<UserAccount> {
        (self.account)()
    }

    pub fn is_loading(&self) -> bool {
        (self.loading)()
    }

    pub fn role(&self) -> Option<Role> {
        self.account.read().as_ref().map(|a| a.role)
    }

    /// Name shown in the dashboard header.
    pub fn display_name(&self) -> String {
        self.account
            .read()
            .as_ref()
            .map(UserAccount::display_name)
            .unwrap_or_default()
    }

    pub fn set(&self, account: Option<UserAccount>) {
        let mut slot = self.account;
        slot.set(account);
    }

    /// Re-read `/auth/my_profile`; failures leave the cached profile alone.
    pub async fn refresh(&self, api: &ApiClient) {
        let mut loading = self.loading;
        loading.set(true);
        match services::users::fetch_my_profile(api).await {
            Ok(account) => self.set(Some(account)),
            Err(e) => tracing::warn!("Could not load profile: {}", e),
        }
        loading.set(false);
    }

    /// Forget the token and the cached profile.
    pub fn logout(&self, session: &Session) {
        session.clear();
        self.set(None);
    }
}

/// Initialize user context provider - call once at app root, after the API provider
pub fn use_user_provider() {
    let account = use_signal(|| None::<UserAccount>);
    let loading = use_signal(|| false);
    let ctx = UserContext { account, loading };
    use_context_provider(|| ctx);

    let api = super::api_context::use_api();
    use_hook(move || {
        if api.session().is_authenticated(now_timestamp()) {
            spawn(async move {
                ctx.refresh(&api).await;
            });
        }
    });
}

pub fn use_user() -> UserContext {
    use_context::<UserContext>()
}
