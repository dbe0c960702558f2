//! Caller access context.
//!
//! Sessions are issued elsewhere. Whatever sits in front of this server
//! (an auth middleware or a trusted proxy) places an [`AccessContext`] in
//! the request extensions; handlers read it through [`Caller`]. A request
//! without one is anonymous and can never export.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use std::convert::Infallible;
use swatch_common::{AccessContext, Role, SubscriptionStatus};

pub const ROLE_HEADER: &str = "x-swatch-role";
pub const SUBSCRIPTION_HEADER: &str = "x-swatch-subscription";

/// Access context of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub AccessContext);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<AccessContext>()
            .cloned()
            .unwrap_or_else(AccessContext::anonymous);
        Ok(Caller(ctx))
    }
}

/// Read the context a fronting auth proxy forwarded as headers
pub fn context_from_headers(headers: &HeaderMap) -> AccessContext {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    AccessContext {
        role: header(ROLE_HEADER).map(Role::from_wire).unwrap_or_default(),
        subscription_status: header(SUBSCRIPTION_HEADER).map(SubscriptionStatus::from_wire),
    }
}

/// Middleware installed only when proxy headers are trusted
pub async fn proxy_access(mut request: Request, next: Next) -> Response {
    let ctx = context_from_headers(request.headers());
    request.extensions_mut().insert(ctx);
    next.run(request).await
}
