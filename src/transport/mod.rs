//! HTTP transport layer for Google Drive API.

use crate::errors::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::HeaderMap, Client, Method, StatusCode};
use url::Url;

/// HTTP transport abstraction for testability.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and receive a response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// HTTP request representation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: Option<RequestBody>,
    /// Request timeout.
    pub timeout: Option<std::time::Duration>,
}

impl HttpRequest {
    /// Returns the value of a query parameter on the request URL.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET method.
    Get,
    /// POST method.
    Post,
    /// PATCH method.
    Patch,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
        }
    }
}

/// Request body variants.
#[derive(Clone)]
pub enum RequestBody {
    /// JSON document.
    Json(Bytes),
    /// Metadata plus media for an upload.
    Multipart(MultipartBody),
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Json(bytes) => write!(f, "Json({} bytes)", bytes.len()),
            RequestBody::Multipart(body) => write!(
                f,
                "Multipart({} bytes metadata, {} bytes {})",
                body.metadata.len(),
                body.content.len(),
                body.content_type
            ),
        }
    }
}

/// Multipart body for file uploads.
#[derive(Clone)]
pub struct MultipartBody {
    /// Metadata part (JSON).
    pub metadata: Bytes,
    /// Content part.
    pub content: Bytes,
    /// Content type of the content part.
    pub content_type: String,
    /// Boundary string.
    pub boundary: String,
}

impl MultipartBody {
    /// Creates a new multipart body.
    pub fn new(metadata: Bytes, content: Bytes, content_type: impl Into<String>) -> Self {
        Self {
            metadata,
            content,
            content_type: content_type.into(),
            boundary: Self::generate_boundary(),
        }
    }

    fn generate_boundary() -> String {
        format!("==============={}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
    }

    /// Converts to bytes.
    pub fn to_bytes(&self) -> Bytes {
        let mut result = Vec::with_capacity(self.metadata.len() + self.content.len() + 256);

        result.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        result.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        result.extend_from_slice(&self.metadata);
        result.extend_from_slice(b"\r\n");

        result.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        result.extend_from_slice(format!("Content-Type: {}\r\n\r\n", self.content_type).as_bytes());
        result.extend_from_slice(&self.content);
        result.extend_from_slice(format!("\r\n--{}--", self.boundary).as_bytes());

        Bytes::from(result)
    }

    /// Gets the content type header value.
    pub fn content_type_header(&self) -> String {
        format!("multipart/related; boundary={}", self.boundary)
    }
}

/// HTTP response representation.
#[derive(Debug)]
pub struct HttpResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

/// Reqwest-based HTTP transport implementation.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a new reqwest transport with a default client.
    pub fn with_defaults() -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Http(format!("Failed to create client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method: Method = request.method.into();
        let mut req = self.client.request(method, request.url);

        for (key, value) in request.headers.iter() {
            req = req.header(key, value);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        match request.body {
            Some(RequestBody::Json(bytes)) => {
                req = req
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(bytes);
            }
            Some(RequestBody::Multipart(multipart)) => {
                req = req
                    .header(reqwest::header::CONTENT_TYPE, multipart.content_type_header())
                    .body(multipart.to_bytes());
            }
            None => {}
        }

        let response = req.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_body() {
        let metadata = Bytes::from(r#"{"name":"test.txt"}"#);
        let content = Bytes::from("Hello, World!");
        let mut multipart = MultipartBody::new(metadata, content, "text/plain");
        multipart.boundary = "BOUNDARY".to_string();

        let bytes = multipart.to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert_eq!(
            multipart.content_type_header(),
            "multipart/related; boundary=BOUNDARY"
        );
        assert_eq!(
            text,
            "--BOUNDARY\r\n\
             Content-Type: application/json; charset=UTF-8\r\n\r\n\
             {\"name\":\"test.txt\"}\r\n\
             --BOUNDARY\r\n\
             Content-Type: text/plain\r\n\r\n\
             Hello, World!\r\n\
             --BOUNDARY--"
        );
    }

    #[test]
    fn test_multipart_keeps_binary_content() {
        let content = Bytes::from(vec![0xff, 0x00, 0xfe]);
        let multipart = MultipartBody::new(Bytes::from("{}"), content, "application/octet-stream");

        let bytes = multipart.to_bytes();
        assert!(bytes.windows(3).any(|w| w == [0xff, 0x00, 0xfe]));
    }

    #[test]
    fn test_http_method_conversion() {
        assert_eq!(Method::from(HttpMethod::Get), Method::GET);
        assert_eq!(Method::from(HttpMethod::Post), Method::POST);
        assert_eq!(Method::from(HttpMethod::Patch), Method::PATCH);
    }

    #[test]
    fn test_query_param() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: Url::parse("https://example.com/files?q=name%3D%27a%27&corpora=allDrives").unwrap(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        };

        assert_eq!(request.query_param("q").as_deref(), Some("name='a'"));
        assert_eq!(request.query_param("corpora").as_deref(), Some("allDrives"));
        assert_eq!(request.query_param("missing"), None);
    }
}
