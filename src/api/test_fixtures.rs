//! Shared test fixtures for the API tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{ClientConfig, VyosClient};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

pub const HOST: &str = "https://192.0.2.1";
pub const API_KEY: &str = "test-key";

/// Mock HTTP client that records requests and replays canned responses.
///
/// Once the queue is exhausted every further request gets a 200 with
/// `{"success": true}`.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn success() -> Self {
        Self::new(vec![Ok(json_response(200, r#"{"success":true,"error":null,"data":null}"#))])
    }

    pub fn with_body(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(json_response(status, body))])
    }

    pub fn failing(error: HttpError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json_response(200, r#"{"success":true}"#)))
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

pub fn json_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        body.as_bytes().to_vec(),
    )
}

pub fn client(mock: &Arc<MockClient>) -> VyosClient<Arc<MockClient>> {
    VyosClient::with_http_client(
        ClientConfig::new(HOST).with_api_key(API_KEY),
        Arc::clone(mock),
    )
    .unwrap()
}

/// Decodes a captured request body into its form fields.
pub fn form_fields(req: &HttpRequest) -> Vec<(String, String)> {
    url::form_urlencoded::parse(req.body.as_deref().unwrap_or_default())
        .into_owned()
        .collect()
}

/// Returns the JSON carried in the `data` form field.
pub fn sent_data(req: &HttpRequest) -> Value {
    let fields = form_fields(req);
    let (_, data) = fields
        .iter()
        .find(|(name, _)| name == "data")
        .expect("request has no data field");
    serde_json::from_str(data).unwrap()
}

/// Returns the path of every action in a captured request, in order.
pub fn sent_paths(req: &HttpRequest) -> Vec<Vec<String>> {
    let data = sent_data(req);
    let actions = match data {
        Value::Array(actions) => actions,
        single => vec![single],
    };
    actions
        .into_iter()
        .map(|action| serde_json::from_value(action["path"].clone()).unwrap())
        .collect()
}

pub fn path(segments: &[&str]) -> Vec<String> {
    segments.iter().map(ToString::to_string).collect()
}
