//! Auth-session snapshot for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. The `SessionStore` owns the
//! authoritative copy and publishes clones of this struct to the view tree.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Current user, bearer token, and whether the session is still resolving.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

impl AuthState {
    /// Authenticated means a user record is present, not merely a token.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Share of the plan's credits already spent, 0 to 100.
    pub fn credit_usage_percent(&self) -> u8 {
        self.user
            .as_ref()
            .map_or(0, |u| crate::util::format::usage_percent(u.credits_used, u.credits_limit))
    }
}
