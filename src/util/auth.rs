//! Route-guard decisions and the well-known auth routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guard components in `components::route_guard` and the session operations
//! both route through these paths. The decision itself is a pure function of
//! the session snapshot so it is evaluated identically on every change.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ONBOARDING_PATH: &str = "/onboarding";

/// Which side of the login wall a route lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardKind {
    /// Only for signed-in users; everyone else goes to `/login`.
    Protected,
    /// Only for visitors; signed-in users go to `/dashboard`.
    Public,
}

/// What a guard should render for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Loading,
    Render,
    Redirect(&'static str),
}

/// Decide what a guarded route shows. Children are never rendered while the
/// session is still resolving.
pub fn guard_outcome(state: &AuthState, kind: GuardKind) -> GuardOutcome {
    if state.loading {
        return GuardOutcome::Loading;
    }
    match (kind, state.is_authenticated()) {
        (GuardKind::Protected, true) | (GuardKind::Public, false) => GuardOutcome::Render,
        (GuardKind::Protected, false) => GuardOutcome::Redirect(LOGIN_PATH),
        (GuardKind::Public, true) => GuardOutcome::Redirect(DASHBOARD_PATH),
    }
}
