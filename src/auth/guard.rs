//! Navigation guard for the role-gated subtrees (`/admin/*`, `/user/*`).
//!
//! Advisory only: it decides where the UI sends the visitor, while every
//! protected call is still authorized by the backend.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::models::Role;

use super::{decode_token, Session};

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginReason {
    /// Token present but undecodable or past `exp`.
    Expired,
    /// No token at all.
    Missing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectLogin(LoginReason),
    RedirectUnauthorized,
}

impl GuardDecision {
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectLogin(_) => Some(LOGIN_PATH),
            GuardDecision::RedirectUnauthorized => Some(UNAUTHORIZED_PATH),
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectLogin(LoginReason::Expired) => Some("Tu sesión ha expirado."),
            GuardDecision::RedirectLogin(LoginReason::Missing) => Some("Debes iniciar sesión."),
            GuardDecision::RedirectUnauthorized => {
                Some("No tienes permisos para acceder a esta sección.")
            }
        }
    }
}

/// Decide what to do with a navigation into a subtree reserved for `allowed`.
///
/// An expired or corrupt token is cleared from the session.
pub fn evaluate(session: &Session, allowed: &[Role], now: i64) -> GuardDecision {
    let Some(token) = session.token() else {
        session.clear();
        return GuardDecision::RedirectLogin(LoginReason::Missing);
    };

    let claims = match decode_token(&token) {
        Some(claims) if !claims.is_expired(now) => claims,
        _ => {
            tracing::info!("Session token expired or unreadable, logging out");
            session.clear();
            return GuardDecision::RedirectLogin(LoginReason::Expired);
        }
    };

    match claims.role() {
        Some(role) if allowed.contains(&role) => GuardDecision::Allow,
        _ => {
            tracing::debug!(
                "Role {:?} not allowed here (allowed: {:?})",
                claims.role_name(),
                allowed
            );
            GuardDecision::RedirectUnauthorized
        }
    }
}

/// One-shot flag so a redirect chain shows a single toast.
///
/// Fires once, then stays quiet until a guarded page renders successfully.
#[derive(Debug)]
pub struct ToastLatch {
    shown: AtomicBool,
}

impl ToastLatch {
    pub const fn new() -> Self {
        Self {
            shown: AtomicBool::new(false),
        }
    }

    /// True the first time after construction or the last `rearm`.
    pub fn fire(&self) -> bool {
        !self.shown.swap(true, Ordering::SeqCst)
    }

    pub fn rearm(&self) {
        self.shown.store(false, Ordering::SeqCst);
    }
}

impl Default for ToastLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide latch used by the guarded layouts.
pub static GUARD_TOAST: ToastLatch = ToastLatch::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardOutcome {
    pub decision: GuardDecision,
    /// Toast to show, already deduplicated through the latch.
    pub toast: Option<&'static str>,
}

/// [`evaluate`] plus toast deduplication.
pub fn check(session: &Session, allowed: &[Role], now: i64, latch: &ToastLatch) -> GuardOutcome {
    let decision = evaluate(session, allowed, now);
    let toast = match decision {
        GuardDecision::Allow => {
            latch.rearm();
            None
        }
        _ if latch.fire() => decision.message(),
        _ => None,
    };
    GuardOutcome { decision, toast }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_support::make_token;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    const NOW: i64 = 1_750_000_000;

    fn session_with(payload: Option<serde_json::Value>) -> Session {
        let session = Session::new(Rc::new(MemoryStore::new()));
        if let Some(payload) = payload {
            session.set_token(&make_token(payload));
        }
        session
    }

    #[test]
    fn admin_token_is_allowed_into_admin() {
        let session = session_with(Some(serde_json::json!({"role": "Admin", "exp": NOW + 600})));
        assert_eq!(evaluate(&session, &[Role::Admin], NOW), GuardDecision::Allow);
    }

    #[test]
    fn normal_role_on_admin_route_goes_to_unauthorized() {
        let session = session_with(Some(serde_json::json!({"role": "normal", "exp": NOW + 600})));
        let decision = evaluate(&session, &[Role::Admin], NOW);
        assert_eq!(decision, GuardDecision::RedirectUnauthorized);
        assert_eq!(decision.redirect_path(), Some("/unauthorized"));
        // the session survives a permission miss
        assert!(session.token().is_some());
    }

    #[test]
    fn missing_token_goes_to_login() {
        let session = session_with(None);
        let decision = evaluate(&session, &[Role::Admin], NOW);
        assert_eq!(decision, GuardDecision::RedirectLogin(LoginReason::Missing));
        assert_eq!(decision.redirect_path(), Some("/login"));
    }

    #[test]
    fn expired_token_is_cleared_and_goes_to_login() {
        let session = session_with(Some(serde_json::json!({"role": "Admin", "exp": NOW - 1})));
        let decision = evaluate(&session, &[Role::Admin], NOW);
        assert_eq!(decision, GuardDecision::RedirectLogin(LoginReason::Expired));
        assert!(session.token().is_none());
    }

    #[test]
    fn garbage_token_counts_as_expired() {
        let session = Session::new(Rc::new(MemoryStore::new()));
        session.set_token("not-a-jwt");
        assert_eq!(
            evaluate(&session, &[Role::Normal], NOW),
            GuardDecision::RedirectLogin(LoginReason::Expired)
        );
        assert!(session.token().is_none());
    }

    #[test]
    fn unknown_role_is_unauthorized() {
        let session = session_with(Some(serde_json::json!({"role": "guest", "exp": NOW + 60})));
        assert_eq!(
            evaluate(&session, &[Role::Admin, Role::Normal], NOW),
            GuardDecision::RedirectUnauthorized
        );
    }

    #[test]
    fn toast_fires_once_until_rearmed() {
        let latch = ToastLatch::new();
        let anonymous = session_with(None);

        let first = check(&anonymous, &[Role::Normal], NOW, &latch);
        assert_eq!(first.toast, Some("Debes iniciar sesión."));

        let second = check(&anonymous, &[Role::Normal], NOW, &latch);
        assert_eq!(second.decision, first.decision);
        assert_eq!(second.toast, None);

        let member = session_with(Some(serde_json::json!({"role": "Normal", "exp": NOW + 60})));
        let allowed = check(&member, &[Role::Normal], NOW, &latch);
        assert_eq!(allowed.decision, GuardDecision::Allow);
        assert_eq!(allowed.toast, None);

        let again = check(&anonymous, &[Role::Normal], NOW, &latch);
        assert_eq!(again.toast, Some("Debes iniciar sesión."));
    }
}
