//! Request executor with auth and error handling.

use crate::auth::AuthProvider;
use crate::config::GoogleDriveConfig;
use crate::errors::{
    AuthenticationError, AuthorizationError, GoogleDriveError, GoogleDriveResult, QuotaError,
    RequestError, ResourceError, ServerError,
};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Request executor that handles HTTP requests with authentication and error mapping.
///
/// No retries are attempted; the first failure is returned to the caller.
pub struct RequestExecutor {
    config: GoogleDriveConfig,
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
}

impl RequestExecutor {
    /// Creates a new request executor.
    pub fn new(
        config: GoogleDriveConfig,
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            config,
            transport,
            auth,
        }
    }

    /// Executes a request and deserializes the JSON response.
    pub async fn execute_request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: Url,
        body: Option<RequestBody>,
    ) -> GoogleDriveResult<T> {
        let response = self.execute_request_raw(method, url, body).await?;

        serde_json::from_slice(&response).map_err(|e| {
            GoogleDriveError::deserialization(format!("Failed to deserialize response: {}", e))
        })
    }

    /// Executes a request and returns raw bytes.
    pub async fn execute_request_raw(
        &self,
        method: HttpMethod,
        url: Url,
        body: Option<RequestBody>,
    ) -> GoogleDriveResult<Bytes> {
        let token = self
            .auth
            .get_access_token()
            .await
            .map_err(GoogleDriveError::Authentication)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&token.authorization_header())
                .map_err(|e| GoogleDriveError::request(format!("Invalid auth header: {}", e)))?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.config.user_agent)
                .map_err(|e| GoogleDriveError::request(format!("Invalid user agent: {}", e)))?,
        );

        debug!(method = ?method, path = url.path(), "Sending Drive request");

        let http_request = HttpRequest {
            method,
            url,
            headers,
            body,
            timeout: self.config.timeout,
        };

        let response = self.transport.send(http_request).await?;

        if !response.status.is_success() {
            return Err(map_error_response(response));
        }

        Ok(response.body)
    }

    /// Builds a full API URL from a path and an optional encoded query string.
    pub fn build_url(&self, path: &str, query: Option<&str>) -> GoogleDriveResult<Url> {
        join(&self.config.base_url, path, query)
    }

    /// Builds a full upload URL from a path and an optional encoded query string.
    pub fn build_upload_url(&self, path: &str, query: Option<&str>) -> GoogleDriveResult<Url> {
        join(&self.config.upload_url, path, query)
    }
}

fn join(base: &Url, path: &str, query: Option<&str>) -> GoogleDriveResult<Url> {
    let mut url = base
        .join(path.trim_start_matches('/'))
        .map_err(|e| GoogleDriveError::request(format!("Invalid URL: {}", e)))?;
    url.set_query(query.filter(|q| !q.is_empty()));
    Ok(url)
}

/// Maps HTTP status codes and Drive error bodies to domain errors.
fn map_error_response(response: HttpResponse) -> GoogleDriveError {
    #[derive(serde::Deserialize)]
    struct ErrorResponse {
        error: ErrorDetail,
    }

    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        message: String,
        errors: Option<Vec<ErrorItem>>,
    }

    #[derive(serde::Deserialize)]
    struct ErrorItem {
        reason: Option<String>,
    }

    let status = response.status;
    let detail: Option<ErrorResponse> = serde_json::from_slice(&response.body).ok();

    let (message, reason) = match detail {
        Some(e) => {
            let reason = e
                .error
                .errors
                .and_then(|errs| errs.into_iter().next())
                .and_then(|err| err.reason);
            (e.error.message, reason)
        }
        None => (
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                String::from_utf8_lossy(&response.body)
            ),
            None,
        ),
    };

    match status {
        StatusCode::BAD_REQUEST => match reason.as_deref() {
            Some("invalidParameter") => {
                GoogleDriveError::Request(RequestError::InvalidParameter(message))
            }
            Some("invalidQuery") => GoogleDriveError::Request(RequestError::InvalidQuery(message)),
            _ => GoogleDriveError::Request(RequestError::ValidationError(message)),
        },
        StatusCode::UNAUTHORIZED => {
            GoogleDriveError::Authentication(AuthenticationError::InvalidToken(message))
        }
        StatusCode::FORBIDDEN => match reason.as_deref() {
            Some("userRateLimitExceeded") | Some("rateLimitExceeded") => {
                GoogleDriveError::Quota(QuotaError::RateLimitExceeded(message))
            }
            Some("storageQuotaExceeded") => {
                GoogleDriveError::Quota(QuotaError::StorageQuotaExceeded(message))
            }
            Some("insufficientPermissions") | Some("forbidden") => GoogleDriveError::Authorization(
                AuthorizationError::InsufficientPermissions(message),
            ),
            Some("domainPolicy") => {
                GoogleDriveError::Authorization(AuthorizationError::DomainPolicy(message))
            }
            _ => GoogleDriveError::Authorization(AuthorizationError::Forbidden(message)),
        },
        StatusCode::NOT_FOUND => GoogleDriveError::Resource(ResourceError::FileNotFound(message)),
        StatusCode::TOO_MANY_REQUESTS => {
            GoogleDriveError::Quota(QuotaError::RateLimitExceeded(message))
        }
        StatusCode::BAD_GATEWAY => GoogleDriveError::Server(ServerError::BadGateway(message)),
        StatusCode::SERVICE_UNAVAILABLE => {
            GoogleDriveError::Server(ServerError::ServiceUnavailable(message))
        }
        _ => GoogleDriveError::Server(ServerError::InternalError(format!(
            "HTTP {}: {}",
            status.as_u16(),
            message
        ))),
    }
}
