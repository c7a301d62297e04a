//! Backend REST calls, one module per resource.
//!
//! Every function performs a single HTTP call through [`ApiClient`]. Non-2xx
//! answers become [`ApiError`]s carrying the backend's own message so pages
//! can toast them directly.

pub mod auth;
pub mod documents;
pub mod events;
pub mod finances;
pub mod memberships;
pub mod notifications;
pub mod resources;
pub mod routes;
pub mod sponsors;
pub mod transport;
pub mod users;

#[cfg(test)]
pub(crate) mod mock;

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::Session;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};

pub use transport::{
    FetchTransport, HttpRequest, HttpResponse, Method, RequestBody, Transport, UploadFile,
};

/// Entry point shared by all service functions.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    session: Session,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && Rc::ptr_eq(&self.transport, &other.transport)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Rc<dyn Transport>, session: Session) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    /// `fetch` transport and the tab's session storage.
    pub fn browser(config: &Config) -> Self {
        Self::new(&config.api_url, Rc::new(FetchTransport), Session::browser())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Backend-relative paths (e.g. uploaded images) become absolute.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:")
        {
            path.to_string()
        } else {
            self.url(path)
        }
    }

    pub(crate) fn call(&self, method: Method, path: &str, fallback: &'static str) -> Call<'_> {
        Call {
            client: self,
            request: HttpRequest::new(method, self.url(path)),
            auth: Auth::None,
            fallback,
        }
    }

    pub(crate) fn get(&self, path: &str, fallback: &'static str) -> Call<'_> {
        self.call(Method::Get, path, fallback)
    }

    pub(crate) fn post(&self, path: &str, fallback: &'static str) -> Call<'_> {
        self.call(Method::Post, path, fallback)
    }

    pub(crate) fn put(&self, path: &str, fallback: &'static str) -> Call<'_> {
        self.call(Method::Put, path, fallback)
    }

    pub(crate) fn patch(&self, path: &str, fallback: &'static str) -> Call<'_> {
        self.call(Method::Patch, path, fallback)
    }

    pub(crate) fn delete(&self, path: &str, fallback: &'static str) -> Call<'_> {
        self.call(Method::Delete, path, fallback)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    None,
    /// Attach the token if there is one.
    Optional,
    /// Fail with `NotAuthenticated` when there is no token.
    Required,
}

/// One request being built.
pub(crate) struct Call<'a> {
    client: &'a ApiClient,
    request: HttpRequest,
    auth: Auth,
    fallback: &'static str,
}

impl<'a> Call<'a> {
    pub fn authorized(mut self) -> Self {
        self.auth = Auth::Required;
        self
    }

    pub fn bearer_if_present(mut self) -> Self {
        self.auth = Auth::Optional;
        self
    }

    pub fn query<K: AsRef<str>>(mut self, pairs: &[(K, String)]) -> Self {
        if pairs.is_empty() {
            return self;
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_str())))
            .finish();
        self.request.url = format!("{}?{}", self.request.url, query);
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        self.request.body = RequestBody::Json(serde_json::to_string(body)?);
        Ok(self)
    }

    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.request.body = RequestBody::Form(pairs);
        self
    }

    pub fn multipart(mut self, fields: Vec<(String, String)>, file: Option<UploadFile>) -> Self {
        self.request.body = RequestBody::Multipart { fields, file };
        self
    }

    /// Send and fail on any non-2xx status.
    pub async fn send(self) -> ApiResult<HttpResponse> {
        let Call {
            client,
            mut request,
            auth,
            fallback,
        } = self;

        if auth != Auth::None {
            match client.session.token() {
                Some(token) => request
                    .headers
                    .push(("Authorization".to_string(), format!("Bearer {}", token))),
                None if auth == Auth::Required => return Err(ApiError::NotAuthenticated),
                None => {}
            }
        }

        tracing::debug!("{} {}", request.method.as_str(), request.url);
        let method = request.method;
        let url = request.url.clone();
        let response = client.transport.send(request).await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method.as_str(), url, e);
            e
        })?;

        if response.is_success() {
            return Ok(response);
        }

        let err = status_error(&response, auth == Auth::Required, fallback);
        tracing::warn!(
            "{} {} -> {}: {}",
            method.as_str(),
            url,
            response.status,
            err
        );
        Err(err)
    }

    pub async fn fetch<T: DeserializeOwned>(self) -> ApiResult<T> {
        self.send().await?.json()
    }

    /// Send, ignoring whatever body comes back.
    pub async fn execute(self) -> ApiResult<()> {
        self.send().await.map(|_| ())
    }
}

/// Map a failed response to an error, preferring the backend's message.
fn status_error(response: &HttpResponse, authorized: bool, fallback: &str) -> ApiError {
    if response.status == 401 && authorized {
        return ApiError::Unauthorized;
    }
    match extract_detail(&response.body) {
        Some(message) => ApiError::Server {
            status: response.status,
            message,
        },
        None if response.status == 404 => ApiError::NotFound,
        None => ApiError::Server {
            status: response.status,
            message: fallback.to_string(),
        },
    }
}

/// `detail` string, joined `detail[].msg`, `error`/`message` strings, or the
/// raw body when it is not JSON at all.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return Some(text.to_string());
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) if !detail.is_empty() => {
            return Some(detail.clone())
        }
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join(", "));
            }
        }
        _ => {}
    }

    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::mock::{client, client_with_token, MockTransport};
    use super::*;

    #[test]
    fn detail_string_wins() {
        assert_eq!(
            extract_detail(br#"{"detail":"Evento no encontrado"}"#).as_deref(),
            Some("Evento no encontrado")
        );
    }

    #[test]
    fn detail_array_messages_are_joined() {
        let body = br#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email"},{"msg":"field required"}]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("value is not a valid email, field required")
        );
    }

    #[test]
    fn error_key_and_raw_text() {
        assert_eq!(
            extract_detail(br#"{"error":"Membresia no vencida"}"#).as_deref(),
            Some("Membresia no vencida")
        );
        assert_eq!(
            extract_detail(b"Internal Server Error").as_deref(),
            Some("Internal Server Error")
        );
        assert_eq!(extract_detail(br#"{"other":1}"#), None);
        assert_eq!(extract_detail(b"  "), None);
    }

    #[test]
    fn urls_are_joined_once() {
        let session = Session::new(Rc::new(crate::storage::MemoryStore::new()));
        let api = ApiClient::new("http://api.local/", Rc::new(MockTransport::new()), session);
        assert_eq!(api.url("/event"), "http://api.local/event");
        assert_eq!(api.asset_url("/static/a.png"), "http://api.local/static/a.png");
        assert_eq!(api.asset_url("https://cdn/a.png"), "https://cdn/a.png");
    }

    #[test]
    fn authorized_call_without_token_never_hits_network() {
        let mock = Rc::new(MockTransport::new());
        let api = client(&mock);
        let result = tokio_test::block_on(api.get("event", "x").authorized().execute());
        assert_eq!(result, Err(ApiError::NotAuthenticated));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn authorized_call_sends_bearer() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, "[]");
        let api = client_with_token(&mock, "tok");
        tokio_test::block_on(api.get("event", "x").authorized().execute()).unwrap();
        assert_eq!(
            mock.last_request().header("authorization"),
            Some("Bearer tok")
        );
    }

    #[test]
    fn unauthorized_only_for_authorized_calls() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(401, r#"{"detail":"Credenciales incorrectas"}"#);
        mock.respond(401, r#"{"detail":"Could not validate credentials"}"#);
        let api = client_with_token(&mock, "tok");

        let public = tokio_test::block_on(api.post("auth/token", "x").execute());
        assert_eq!(public.unwrap_err().to_string(), "Credenciales incorrectas");

        let private = tokio_test::block_on(api.get("auth/users", "x").authorized().execute());
        assert_eq!(private, Err(ApiError::Unauthorized));
    }

    #[test]
    fn fallback_and_not_found() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(500, "");
        mock.respond(404, "");
        let api = client(&mock);

        let err = tokio_test::block_on(api.get("route", "Error al obtener las rutas").execute())
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                message: "Error al obtener las rutas".to_string()
            }
        );

        let err = tokio_test::block_on(api.get("route", "x").execute()).unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn query_pairs_are_encoded() {
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, "null");
        let api = client(&mock);
        tokio_test::block_on(
            api.post("auth/reset_password/reset", "x")
                .query(&[("code", "12 34".to_string()), ("new_password", "Ab1!&x".to_string())])
                .execute(),
        )
        .unwrap();
        assert_eq!(
            mock.last_request().url,
            "http://api.test/auth/reset_password/reset?code=12+34&new_password=Ab1%21%26x"
        );
    }
}
