use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::auth::TokenService;
use crate::error::ApiError;

pub const UNAUTHORIZED_MESSAGE: &str = "Missing or invalid Authorization header";

/// Caller identity (email) recovered from a verified bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity(String);

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn email(&self) -> &str {
        &self.0
    }
}

/// Extract the raw token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

/// Resolve the caller identity. Any failure along the way yields `None`.
pub fn identity_from_headers(headers: &HeaderMap, tokens: &dyn TokenService) -> Option<Identity> {
    bearer_token(headers)
        .and_then(|token| tokens.verify(token))
        .map(Identity)
}

/// Handlers take `Identity` as an argument; the route gate has already put it
/// in the request extensions.
#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized(UNAUTHORIZED_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtTokenService;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header() {
        let tokens = JwtTokenService::new("secret", 1).unwrap();
        assert!(identity_from_headers(&HeaderMap::new(), &tokens).is_none());
    }

    #[test]
    fn test_non_bearer_scheme() {
        let tokens = JwtTokenService::new("secret", 1).unwrap();
        let token = tokens.issue("user@example.com").unwrap();
        assert!(identity_from_headers(&headers_with(&format!("Basic {}", token)), &tokens).is_none());
    }

    #[test]
    fn test_empty_token() {
        assert!(bearer_token(&headers_with("Bearer   ")).is_none());
    }

    #[test]
    fn test_unverifiable_token() {
        let tokens = JwtTokenService::new("secret", 1).unwrap();
        assert!(identity_from_headers(&headers_with("Bearer test_jwt_token"), &tokens).is_none());
    }

    #[test]
    fn test_valid_token() {
        let tokens = JwtTokenService::new("secret", 1).unwrap();
        let token = tokens.issue("user@example.com").unwrap();
        let identity = identity_from_headers(&headers_with(&format!("Bearer {}", token)), &tokens);
        assert_eq!(identity, Some(Identity::new("user@example.com")));
    }
}
