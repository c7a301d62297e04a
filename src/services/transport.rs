//! HTTP plumbing under the service functions.
//!
//! Requests are plain data so they can be recorded in tests; the browser
//! implementation turns them into `fetch` calls.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A file picked in an `<input type="file">`, read into memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data`; the file goes under the `file` field.
    Multipart {
        fields: Vec<(String, String)>,
        file: Option<UploadFile>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: RequestBody::Empty,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        // some endpoints answer 204 with no body
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

pub fn encode_form(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

/// `window.fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[cfg(target_arch = "wasm32")]
fn js_err(e: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", e))
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

        let window = web_sys::window().ok_or_else(|| ApiError::Network("No window".to_string()))?;

        let headers = Headers::new().map_err(js_err)?;
        for (name, value) in &request.headers {
            headers.set(name, value).map_err(js_err)?;
        }

        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());

        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => {
                headers
                    .set("Content-Type", "application/json")
                    .map_err(js_err)?;
                opts.set_body(&JsValue::from_str(body));
            }
            RequestBody::Form(pairs) => {
                headers
                    .set("Content-Type", "application/x-www-form-urlencoded")
                    .map_err(js_err)?;
                opts.set_body(&JsValue::from_str(&encode_form(pairs)));
            }
            RequestBody::Multipart { fields, file } => {
                // the browser sets the multipart boundary itself
                let form = FormData::new().map_err(js_err)?;
                for (name, value) in fields {
                    form.append_with_str(name, value).map_err(js_err)?;
                }
                if let Some(file) = file {
                    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                    let parts = js_sys::Array::new();
                    parts.push(&bytes.buffer());
                    let bag = BlobPropertyBag::new();
                    bag.set_type(&file.content_type);
                    let blob =
                        Blob::new_with_u8_array_sequence_and_options(&parts, &bag).map_err(js_err)?;
                    form.append_with_blob_and_filename("file", &blob, &file.name)
                        .map_err(js_err)?;
                }
                opts.set_body(&form);
            }
        }
        opts.set_headers(&headers);

        let fetch_request = Request::new_with_str_and_init(&request.url, &opts).map_err(js_err)?;

        let resp_value = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(js_err)?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ApiError::Network("Not a Response".to_string()))?;

        let buffer = JsFuture::from(resp.array_buffer().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(HttpResponse {
            status: resp.status(),
            body,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        Err(ApiError::Network(format!(
            "fetch is only available in browser ({} {})",
            request.method.as_str(),
            request.url
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_bodies_are_url_encoded() {
        let pairs = vec![
            ("username".to_string(), "ana@epn.edu.ec".to_string()),
            ("password".to_string(), "a&b c".to_string()),
        ];
        assert_eq!(
            encode_form(&pairs),
            "username=ana%40epn.edu.ec&password=a%26b+c"
        );
    }

    #[test]
    fn empty_body_reads_as_null() {
        let resp = HttpResponse {
            status: 204,
            body: Vec::new(),
        };
        let value: Option<serde_json::Value> = resp.json().unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn native_fetch_reports_network_error() {
        let result = tokio_test::block_on(
            FetchTransport.send(HttpRequest::new(Method::Get, "http://localhost/event")),
        );
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
