//! Request transforms applied to every outgoing auth request.
//!
//! DESIGN
//! ======
//! Header injection is an explicit step in the client's send path rather than
//! a global interceptor, so each transform can be tested in isolation.

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;

use super::transport::ApiRequest;
use crate::session::{self, SessionStore};

/// A pure rewrite of an outgoing request.
pub trait RequestTransform {
    fn apply(&self, request: ApiRequest) -> ApiRequest;
}

/// Apply transforms in order.
pub fn apply_all(request: ApiRequest, transforms: &[&dyn RequestTransform]) -> ApiRequest {
    transforms.iter().fold(request, |req, t| t.apply(req))
}

/// Marks the body as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonContentType;

impl RequestTransform for JsonContentType {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request.with_header("Content-Type", "application/json")
    }
}

/// Attaches `Authorization: Bearer <token>` when the store holds a token.
/// Without a token the request passes through unauthenticated.
pub struct BearerAuth<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: SessionStore + ?Sized> BearerAuth<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<S: SessionStore + ?Sized> RequestTransform for BearerAuth<'_, S> {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        match session::token(self.store) {
            Some(token) => request.with_header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }
}
