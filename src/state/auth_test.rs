use super::*;
use crate::net::types::PlanType;
use crate::testing::sample_user;

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(state.token.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn auth_state_default_not_loading() {
    let state = AuthState::default();
    assert!(!state.loading);
}

// =============================================================
// Derived values
// =============================================================

#[test]
fn token_alone_is_not_authenticated() {
    let state = AuthState { token: Some("abc".to_owned()), ..AuthState::default() };
    assert!(!state.is_authenticated());
}

#[test]
fn user_present_is_authenticated() {
    let state = AuthState { user: Some(sample_user(PlanType::Basic, 3)), ..AuthState::default() };
    assert!(state.is_authenticated());
}

#[test]
fn credit_usage_percent_uses_user_counters() {
    let state = AuthState { user: Some(sample_user(PlanType::Basic, 25)), ..AuthState::default() };
    assert_eq!(state.credit_usage_percent(), 50);
    assert_eq!(AuthState::default().credit_usage_percent(), 0);
}
