//! Recording transport for service tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use super::{ApiClient, HttpRequest, HttpResponse, Transport};
use crate::auth::Session;
use crate::error::{ApiError, ApiResult};
use crate::storage::MemoryStore;

pub const BASE_URL: &str = "http://api.test";

#[derive(Default)]
pub struct MockTransport {
    requests: RefCell<Vec<HttpRequest>>,
    responses: RefCell<VecDeque<HttpResponse>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response.
    pub fn respond(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
        });
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ApiError::Network("no response queued".to_string()))
    }
}

pub fn client(mock: &Rc<MockTransport>) -> ApiClient {
    let session = Session::new(Rc::new(MemoryStore::new()));
    ApiClient::new(BASE_URL, mock.clone(), session)
}

pub fn client_with_token(mock: &Rc<MockTransport>, token: &str) -> ApiClient {
    let api = client(mock);
    api.session().set_token(token);
    api
}

/// JSON body of the last request.
pub fn last_json(mock: &MockTransport) -> serde_json::Value {
    match mock.last_request().body {
        super::RequestBody::Json(body) => serde_json::from_str(&body).expect("invalid JSON body"),
        other => panic!("expected JSON body, got {:?}", other),
    }
}
