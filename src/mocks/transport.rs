//! Mock HTTP transport for testing.

use crate::errors::TransportError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// Create a 200 response with a JSON body.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.into(),
        }
    }

    /// Create an error response.
    pub fn error(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Add a header to the response.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    fn into_http_response(self) -> Result<HttpResponse, TransportError> {
        let status = StatusCode::from_u16(self.status)
            .map_err(|e| TransportError::Http(format!("invalid mock status: {}", e)))?;

        let mut headers = HeaderMap::new();
        for (key, value) in self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| TransportError::Http(e.to_string()))?;
            let value =
                HeaderValue::from_str(&value).map_err(|e| TransportError::Http(e.to_string()))?;
            headers.insert(name, value);
        }

        Ok(HttpResponse::new(status, headers, self.body))
    }
}

/// Mock HTTP transport for testing.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create a new mock transport with no responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock transport with queued responses.
    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Get the last request made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Number of queued responses not yet consumed.
    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let description = format!("{:?} {}", request.method, request.url);
        self.requests.lock().unwrap().push(request);

        let response = self.responses.lock().unwrap().pop_front();
        match response {
            Some(response) => response.into_http_response(),
            None => Err(TransportError::Network(format!(
                "no mock response queued for {}",
                description
            ))),
        }
    }
}
