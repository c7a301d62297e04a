//! Session token handling.
//!
//! The bearer token is a JWT issued by `/auth/token`. The client only reads
//! its payload (`sub`, `role`, `exp`) to shape navigation; the signature is
//! never checked here and the backend stays the only authority.

pub mod guard;
pub mod permissions;

use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::models::Role;
use crate::storage::{BrowserStore, KeyValueStore, TOKEN_KEY};

/// Payload claims the client cares about.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Claims {
    /// Account email.
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// A token without `exp` is treated as already expired.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.map_or(true, |exp| exp <= now)
    }

    /// Lower-cased role claim.
    pub fn role_name(&self) -> Option<String> {
        self.role.as_deref().map(|r| r.trim().to_lowercase())
    }

    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }
}

/// Decode the payload segment of a JWT. Malformed tokens yield `None`.
pub fn decode_token(token: &str) -> Option<Claims> {
    let mut parts = token.trim().split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Seconds since the epoch.
pub fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Access to the stored bearer token.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Session backed by `window.sessionStorage` (tab-scoped).
    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserStore::session()))
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
    }

    /// Logout: forget the token.
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
    }

    pub fn claims(&self) -> Option<Claims> {
        self.token().as_deref().and_then(decode_token)
    }

    /// Token present, decodable and not past its expiry.
    pub fn is_authenticated(&self, now: i64) -> bool {
        self.claims().is_some_and(|c| !c.is_expired(now))
    }

    pub fn role(&self) -> Option<Role> {
        self.claims().and_then(|c| c.role())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    /// Unsigned JWT carrying the given payload.
    pub fn make_token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::make_token;
    use super::*;
    use crate::storage::MemoryStore;

    const NOW: i64 = 1_750_000_000;

    #[test]
    fn decodes_role_and_expiry() {
        let token = make_token(serde_json::json!({
            "sub": "ana@epn.edu.ec",
            "role": "Admin",
            "exp": NOW + 60
        }));
        let claims = decode_token(&token).unwrap();
        assert_eq!(claims.role_name().as_deref(), Some("admin"));
        assert_eq!(claims.role(), Some(Role::Admin));
        assert!(!claims.is_expired(NOW));
        assert!(claims.is_expired(NOW + 60));
    }

    #[test]
    fn malformed_tokens_decode_to_none() {
        assert!(decode_token("").is_none());
        assert!(decode_token("abc").is_none());
        assert!(decode_token("a.b.c.d").is_none());
        assert!(decode_token("a.%%%.c").is_none());
        let not_json = format!("x.{}.y", URL_SAFE_NO_PAD.encode("hello"));
        assert!(decode_token(&not_json).is_none());
    }

    #[test]
    fn missing_expiry_counts_as_expired() {
        let claims = Claims {
            role: Some("normal".to_string()),
            ..Default::default()
        };
        assert!(claims.is_expired(NOW));
    }

    #[test]
    fn session_tracks_token_lifecycle() {
        let session = Session::new(Rc::new(MemoryStore::new()));
        assert!(!session.is_authenticated(NOW));

        session.set_token(&make_token(serde_json::json!({"role": "Normal", "exp": NOW + 10})));
        assert!(session.is_authenticated(NOW));
        assert_eq!(session.role(), Some(Role::Normal));

        session.clear();
        assert!(session.token().is_none());
    }
}
