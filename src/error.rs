// HTTP API Error Types
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::auth::{JwtError, PasswordError};
use crate::database::StoreError;
use crate::news::NewsError;

/// Body returned when the news proxy receives a non-200 upstream reply
pub const NEWS_FETCH_ERROR: &str = "Error fetching news";

/// HTTP API error with the status code and body each failure path returns
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed { allowed: Vec<Method> },

    // 400 from the news proxy when upstream answered non-200
    UpstreamError,

    // 500 from the news proxy when the upstream call itself failed
    TransportError,

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UpstreamError => StatusCode::BAD_REQUEST,
            ApiError::TransportError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::MethodNotAllowed { .. } => "Method Not Allowed",
            ApiError::UpstreamError => NEWS_FETCH_ERROR,
            ApiError::TransportError => "Upstream request failed",
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::NotFound(message) => json!({
                "status": "Not Found",
                "message": message
            }),
            ApiError::UpstreamError => json!({ "error": NEWS_FETCH_ERROR }),
            ApiError::TransportError => json!([]),
            _ => json!({ "msg": self.message() }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed(allowed: &[Method]) -> Self {
        ApiError::MethodNotAllowed { allowed: allowed.to_vec() }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn missing_field(field: &str) -> Self {
        ApiError::BadRequest(format!("Missing required field: {}", field))
    }
}

// Convert other error types to ApiError
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Don't expose driver errors to clients
        tracing::error!("Document store error: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        tracing::error!("Token issuance failed: {}", err);
        ApiError::internal_server_error("Failed to issue access token")
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!("Password hashing failed: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl From<NewsError> for ApiError {
    fn from(err: NewsError) -> Self {
        tracing::error!("News request failed: {}", err);
        ApiError::TransportError
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let mut response = (status, Json(self.to_json())).into_response();

        if let ApiError::MethodNotAllowed { allowed } = &self {
            let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }

        response
    }
}
