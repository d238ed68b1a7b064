//! Error types for the Drive upload action.
//!
//! Every failure is fatal for the run. The batch driver stops at the first
//! `Err` and the binary turns it into a diagnostic and a non-zero exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for upload operations.
pub type GoogleDriveResult<T> = Result<T, GoogleDriveError>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum GoogleDriveError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Local filesystem error.
    #[error("Local file error: {0}")]
    LocalFile(#[from] LocalFileError),

    /// Authentication error.
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// Authorization error.
    #[error("Authorization error: {0}")]
    Authorization(#[from] AuthorizationError),

    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Resource error.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Quota error.
    #[error("Quota error: {0}")]
    Quota(#[from] QuotaError),

    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Server error.
    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// Response error.
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),
}

impl GoogleDriveError {
    /// Creates a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        GoogleDriveError::Configuration(ConfigurationError::InvalidConfiguration(msg.into()))
    }

    /// Creates a request validation error.
    pub fn request(msg: impl Into<String>) -> Self {
        GoogleDriveError::Request(RequestError::ValidationError(msg.into()))
    }

    /// Creates a deserialization error.
    pub fn deserialization(msg: impl Into<String>) -> Self {
        GoogleDriveError::Response(ResponseError::DeserializationError(msg.into()))
    }

    /// Returns true if the error came from the remote service or token exchange.
    pub fn is_remote(&self) -> bool {
        !matches!(
            self,
            GoogleDriveError::Configuration(_) | GoogleDriveError::LocalFile(_)
        )
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A required input was not provided.
    #[error("missing input '{0}'")]
    MissingInput(&'static str),

    /// An input could not be parsed.
    #[error("invalid value for input '{input}': {message}")]
    InvalidInput {
        /// Input name.
        input: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// Invalid credentials.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The glob pattern is malformed.
    #[error("Invalid filename pattern: {0}")]
    InvalidPattern(String),

    /// The glob pattern matched nothing.
    #[error("No file found! pattern: {0}")]
    NoMatches(String),

    /// Name resolution produced an empty target name.
    #[error("Could not discover target file name for {0}")]
    EmptyTargetName(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Local filesystem errors.
#[derive(Debug, Error)]
pub enum LocalFileError {
    /// Stat of the source path failed.
    #[error("lstat of file with filename: {} failed with error: {source}", path.display())]
    Stat {
        /// Source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the source file failed.
    #[error("opening file with filename: {} failed with error: {source}", path.display())]
    Read {
        /// Source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// Invalid token.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Refresh failed.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// JWT encoding error.
    #[error("JWT encoding error: {0}")]
    JwtEncodingError(String),
}

/// Authorization errors.
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// Forbidden.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Insufficient permissions.
    #[error("Insufficient permissions: {0}")]
    InsufficientPermissions(String),

    /// Domain policy.
    #[error("Domain policy violation: {0}")]
    DomainPolicy(String),
}

/// Request errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing parameter.
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Resource errors.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(String),
}

/// Quota errors.
#[derive(Debug, Error)]
pub enum QuotaError {
    /// Storage quota exceeded.
    #[error("Storage quota exceeded: {0}")]
    StorageQuotaExceeded(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
}

/// Network errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Timeout.
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Internal error.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// Service unavailable.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Bad gateway.
    #[error("Bad gateway: {0}")]
    BadGateway(String),
}

/// Response errors.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// Unexpected format.
    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout error.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// HTTP error.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Network(err.to_string())
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

impl From<TransportError> for GoogleDriveError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout(msg) => GoogleDriveError::Network(NetworkError::Timeout(msg)),
            TransportError::Network(msg) => {
                GoogleDriveError::Network(NetworkError::ConnectionFailed(msg))
            }
            TransportError::Http(msg) => {
                GoogleDriveError::Response(ResponseError::UnexpectedFormat(msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        let error = GoogleDriveError::Configuration(ConfigurationError::MissingInput("filename"));
        assert!(!error.is_remote());

        let error = GoogleDriveError::LocalFile(LocalFileError::Read {
            path: PathBuf::from("a.txt"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert!(!error.is_remote());

        let error = GoogleDriveError::Network(NetworkError::Timeout("slow".to_string()));
        assert!(error.is_remote());

        let error =
            GoogleDriveError::Authentication(AuthenticationError::RefreshFailed("x".to_string()));
        assert!(error.is_remote());
    }

    #[test]
    fn test_configuration_messages() {
        let error = ConfigurationError::MissingInput("folderId");
        assert_eq!(error.to_string(), "missing input 'folderId'");

        let error = ConfigurationError::NoMatches("dist/*.zip".to_string());
        assert_eq!(error.to_string(), "No file found! pattern: dist/*.zip");
    }
}
