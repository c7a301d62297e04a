#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Session Flow Harness
//!
//! Drives the public library the way the UI does: log in against a scripted
//! backend, then walk the navigation guard through the role-gated subtrees.
//!
//! Run with: cargo test --test session_flow
//!
//! Backend calls exercised:
//! - POST /auth/token (form `username`, `password`)
//! - GET /participants/my_events (bearer)
//! - POST /participants/register_event (bearer, JSON `{event_id}`)

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;

use club_ciclismo_web::auth::guard::{self, GuardDecision, LoginReason, ToastLatch};
use club_ciclismo_web::auth::Session;
use club_ciclismo_web::error::{ApiError, ApiResult};
use club_ciclismo_web::models::Role;
use club_ciclismo_web::services::{self, ApiClient, HttpRequest, HttpResponse, Transport};
use club_ciclismo_web::storage::{KeyValueStore, MemoryStore, TOKEN_KEY};

const NOW: i64 = 1_750_000_000;

/// Backend stand-in answering from a queue and recording every request.
#[derive(Default)]
struct ScriptedBackend {
    requests: RefCell<Vec<HttpRequest>>,
    responses: RefCell<VecDeque<HttpResponse>>,
}

impl ScriptedBackend {
    fn respond(&self, status: u16, body: serde_json::Value) {
        self.responses.borrow_mut().push_back(HttpResponse {
            status,
            body: body.to_string().into_bytes(),
        });
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedBackend {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ApiError::Network("backend script exhausted".to_string()))
    }
}

fn token(role: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({ "sub": "ana@epn.edu.ec", "role": role, "exp": exp }).to_string(),
    );
    format!("{}.{}.sig", header, payload)
}

struct Harness {
    store: Rc<MemoryStore>,
    backend: Rc<ScriptedBackend>,
    api: ApiClient,
}

impl Harness {
    fn new() -> Self {
        let store = Rc::new(MemoryStore::new());
        let backend = Rc::new(ScriptedBackend::default());
        let session = Session::new(store.clone());
        let api = ApiClient::new("http://api.test", backend.clone(), session);
        Self {
            store,
            backend,
            api,
        }
    }

    fn session(&self) -> &Session {
        self.api.session()
    }
}

#[test]
fn member_logs_in_and_reaches_user_area() {
    let h = Harness::new();
    h.backend.respond(
        200,
        json!({ "access_token": token("normal", NOW + 3600), "token_type": "bearer" }),
    );

    let resp =
        tokio_test::block_on(services::auth::login(&h.api, "ana@epn.edu.ec", "secreto1"))
            .unwrap();

    assert_eq!(h.store.get(TOKEN_KEY), Some(resp.access_token));
    let login = h.backend.requests.borrow()[0].clone();
    assert!(login.url.ends_with("/auth/token"));

    let latch = ToastLatch::new();
    let outcome = guard::check(h.session(), &[Role::Normal], NOW, &latch);
    assert_eq!(outcome.decision, GuardDecision::Allow);
    assert_eq!(outcome.toast, None);

    let outcome = guard::check(h.session(), &[Role::Admin], NOW, &latch);
    assert_eq!(outcome.decision, GuardDecision::RedirectUnauthorized);
    assert_eq!(
        outcome.toast,
        Some("No tienes permisos para acceder a esta sección.")
    );
    // Still logged in, just in the wrong subtree
    assert!(h.session().is_authenticated(NOW));
}

#[test]
fn failed_login_keeps_session_empty() {
    let h = Harness::new();
    h.backend
        .respond(401, json!({ "detail": "Credenciales incorrectas" }));

    let err = tokio_test::block_on(services::auth::login(&h.api, "ana@epn.edu.ec", "mala"))
        .unwrap_err();

    assert_eq!(err.to_string(), "Credenciales incorrectas");
    assert_eq!(h.store.get(TOKEN_KEY), None);

    let outcome = guard::check(h.session(), &[Role::Normal], NOW, &ToastLatch::new());
    assert_eq!(
        outcome.decision,
        GuardDecision::RedirectLogin(LoginReason::Missing)
    );
}

#[test]
fn expired_token_is_cleared_and_toasts_once() {
    let h = Harness::new();
    h.session().set_token(&token("admin", NOW - 1));
    let latch = ToastLatch::new();

    let first = guard::check(h.session(), &[Role::Admin], NOW, &latch);
    assert_eq!(
        first.decision,
        GuardDecision::RedirectLogin(LoginReason::Expired)
    );
    assert_eq!(first.toast, Some("Tu sesión ha expirado."));
    assert_eq!(h.store.get(TOKEN_KEY), None);

    // The redirect chain lands on another guarded view: no second toast
    let second = guard::check(h.session(), &[Role::Admin], NOW, &latch);
    assert_eq!(
        second.decision,
        GuardDecision::RedirectLogin(LoginReason::Missing)
    );
    assert_eq!(second.toast, None);

    // A successful render rearms the latch
    h.session().set_token(&token("admin", NOW + 60));
    assert_eq!(
        guard::check(h.session(), &[Role::Admin], NOW, &latch).decision,
        GuardDecision::Allow
    );
    h.session().clear();
    assert!(guard::check(h.session(), &[Role::Admin], NOW, &latch)
        .toast
        .is_some());
}

#[test]
fn authorized_calls_carry_the_bearer_token() {
    let h = Harness::new();
    let jwt = token("normal", NOW + 3600);
    h.session().set_token(&jwt);
    h.backend.respond(200, json!([3, 7]));
    h.backend.respond(200, json!({ "message": "ok" }));

    let ids = tokio_test::block_on(services::events::fetch_my_events(&h.api)).unwrap();
    assert_eq!(ids, vec![3, 7]);
    tokio_test::block_on(services::events::register_to_event(&h.api, 9)).unwrap();

    let requests = h.backend.requests.borrow();
    let expected = format!("Bearer {}", jwt);
    for request in requests.iter() {
        assert_eq!(request.header("Authorization"), Some(expected.as_str()));
    }
    assert!(requests[1].url.ends_with("/participants/register_event"));
}

#[test]
fn authorized_call_without_session_never_hits_backend() {
    let h = Harness::new();

    let err = tokio_test::block_on(services::events::fetch_my_events(&h.api)).unwrap_err();

    assert_eq!(err, ApiError::NotAuthenticated);
    assert!(h.backend.requests.borrow().is_empty());
}

#[test]
fn rejected_token_maps_to_unauthorized() {
    let h = Harness::new();
    h.session().set_token(&token("normal", NOW + 3600));
    h.backend
        .respond(401, json!({ "detail": "Could not validate credentials" }));

    let err = tokio_test::block_on(services::events::fetch_my_events(&h.api)).unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
}
