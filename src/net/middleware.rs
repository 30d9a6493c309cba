//! Request/response hooks wrapped around every `ApiClient` call.
//!
//! SYSTEM CONTEXT
//! ==============
//! `BearerAuth` and `LogoutOnUnauthorized` form the auth pair: the first
//! attaches the session's credential to outgoing requests, the second tears
//! the session down when the server rejects that credential. Pages never
//! repeat either concern.

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;

use super::http::{ApiRequest, ApiResponse};
use crate::state::session::SessionStore;

/// A layer in the client's middleware chain. Both hooks default to no-ops.
pub trait Middleware {
    fn on_request(&self, request: &mut ApiRequest) {
        let _ = request;
    }

    fn on_response(&self, response: &ApiResponse) {
        let _ = response;
    }
}

/// Adds `Authorization: Bearer <token>` while the session holds a token.
///
/// The token comes from the in-memory session on each request, never from
/// durable storage, so a failed `localStorage` write cannot strip it and a
/// logout takes effect on the very next call.
pub struct BearerAuth {
    session: SessionStore,
}

impl BearerAuth {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl Middleware for BearerAuth {
    fn on_request(&self, request: &mut ApiRequest) {
        if let Some(token) = self.session.token() {
            request.set_header("Authorization", format!("Bearer {token}"));
        }
    }
}

/// Logs the session out on any 401 answer. The caller still gets the error.
pub struct LogoutOnUnauthorized {
    session: SessionStore,
}

impl LogoutOnUnauthorized {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl Middleware for LogoutOnUnauthorized {
    fn on_response(&self, response: &ApiResponse) {
        if response.status == 401 {
            log::warn!("server rejected credentials; ending session");
            self.session.logout();
        }
    }
}
