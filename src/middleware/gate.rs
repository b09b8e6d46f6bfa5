use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use super::auth::{identity_from_headers, Identity, UNAUTHORIZED_MESSAGE};
use crate::auth::TokenService;
use crate::error::ApiError;

pub const GET: &[Method] = &[Method::GET];
pub const POST: &[Method] = &[Method::POST];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// A verified caller identity is required
    Identified,
}

/// Per-route guard: which verbs the route accepts and whether it needs an identity
#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    pub methods: &'static [Method],
    pub access: Access,
}

impl RoutePolicy {
    pub const fn public(methods: &'static [Method]) -> Self {
        Self { methods, access: Access::Public }
    }

    pub const fn identified(methods: &'static [Method]) -> Self {
        Self { methods, access: Access::Identified }
    }

    /// HEAD is served wherever GET is
    pub fn allows(&self, method: &Method) -> bool {
        self.methods.contains(method) || (*method == Method::HEAD && self.methods.contains(&Method::GET))
    }

    /// Method check first (405), then identity (401).
    ///
    /// `resolve_identity` is only invoked once the method has been accepted and
    /// the route requires an identity.
    pub fn evaluate<F>(&self, method: &Method, resolve_identity: F) -> Result<Option<Identity>, ApiError>
    where
        F: FnOnce() -> Option<Identity>,
    {
        if !self.allows(method) {
            return Err(ApiError::method_not_allowed(self.methods));
        }

        match self.access {
            Access::Public => Ok(None),
            Access::Identified => resolve_identity()
                .map(Some)
                .ok_or_else(|| ApiError::unauthorized(UNAUTHORIZED_MESSAGE)),
        }
    }
}

/// Middleware state for one route
#[derive(Clone)]
pub struct Gate {
    pub policy: RoutePolicy,
    pub tokens: Arc<dyn TokenService>,
}

impl Gate {
    pub fn new(policy: RoutePolicy, tokens: Arc<dyn TokenService>) -> Self {
        Self { policy, tokens }
    }
}

/// Applies a route's `RoutePolicy` and binds the caller identity into the request
pub async fn gate_middleware(
    State(gate): State<Gate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let identity = gate
        .policy
        .evaluate(&method, || identity_from_headers(request.headers(), gate.tokens.as_ref()))
        .map_err(|err| {
            tracing::warn!("{} {} rejected: {}", method, request.uri().path(), err);
            err
        })?;

    if let Some(identity) = identity {
        tracing::debug!("{} {} as {}", method, request.uri().path(), identity.email());
        request.extensions_mut().insert(identity);
    }

    Ok(next.run(request).await)
}
