use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::net::types::PlanType;
use crate::testing::{RecordingNavigator, ScriptedTransport, sample_user};
use crate::util::auth::{GuardKind, GuardOutcome, guard_outcome};
use crate::util::storage::MemoryTokenStore;

// =============================================================
// Helpers
// =============================================================

struct Harness {
    session: Session<ScriptedTransport>,
    transport: ScriptedTransport,
    storage: MemoryTokenStore,
    navigator: RecordingNavigator,
}

fn harness(storage: MemoryTokenStore) -> Harness {
    let transport = ScriptedTransport::default();
    let navigator = RecordingNavigator::default();
    let session = Session::new(
        ApiConfig::new("http://api.test").unwrap(),
        transport.clone(),
        Rc::new(storage.clone()),
        Rc::new(navigator.clone()),
    );
    Harness { session, transport, storage, navigator }
}

fn token_body(token: &str, user: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "access_token": token, "token_type": "bearer", "user": user })
}

// =============================================================
// Startup
// =============================================================

#[test]
fn new_store_reads_persisted_token_and_starts_loading() {
    let h = harness(MemoryTokenStore::with_token("abc"));
    let state = h.session.state();
    assert_eq!(state.token.as_deref(), Some("abc"));
    assert!(state.user.is_none());
    assert!(state.loading);
}

#[test]
fn restore_without_token_skips_request() {
    let h = harness(MemoryTokenStore::default());
    block_on(h.session.restore());
    assert!(h.transport.sent().is_empty());
    assert!(!h.session.state().loading);
    assert!(!h.session.state().is_authenticated());
}

#[test]
fn restore_with_valid_token_loads_user() {
    let h = harness(MemoryTokenStore::with_token("abc"));
    h.transport.respond(200, serde_json::json!({"id": 1, "email": "joao@x.com", "plan_type": "basic"}));

    block_on(h.session.restore());

    let state = h.session.state();
    assert!(state.is_authenticated());
    assert!(!state.loading);
    assert_eq!(h.transport.last_sent().header("Authorization"), Some("Bearer abc"));
    assert!(h.navigator.paths().is_empty());
}

#[test]
fn restore_with_rejected_token_clears_session() {
    let h = harness(MemoryTokenStore::with_token("abc"));
    h.transport.respond(401, serde_json::json!({"detail": "Could not validate credentials"}));

    block_on(h.session.restore());

    let state = h.session.state();
    assert_eq!(state.user, None);
    assert_eq!(state.token, None);
    assert!(!state.loading);
    assert_eq!(h.storage.load(), None);
}

#[test]
fn restore_network_failure_clears_without_navigating() {
    let h = harness(MemoryTokenStore::with_token("abc"));
    h.transport.fail(ApiError::Transport("offline".to_owned()));

    block_on(h.session.restore());

    assert_eq!(h.session.state().token, None);
    assert!(!h.session.state().loading);
    assert!(h.navigator.paths().is_empty());
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_fresh_trial_goes_to_onboarding() {
    let h = harness(MemoryTokenStore::default());
    h.transport.respond(
        200,
        token_body("t1", serde_json::json!({"id": 1, "plan_type": "trial", "credits_used": 0})),
    );

    block_on(h.session.login("joao@x.com", "Secret123")).unwrap();

    assert_eq!(h.storage.load().as_deref(), Some("t1"));
    assert_eq!(h.session.state().token.as_deref(), Some("t1"));
    assert!(h.session.state().is_authenticated());
    assert!(!h.session.state().loading);
    assert_eq!(h.navigator.last().as_deref(), Some("/onboarding"));
}

#[test]
fn login_used_account_goes_to_dashboard() {
    let h = harness(MemoryTokenStore::default());
    h.transport.respond(
        200,
        token_body("t2", serde_json::json!({"id": 1, "plan_type": "pro", "credits_used": 5})),
    );

    block_on(h.session.login("joao@x.com", "Secret123")).unwrap();

    assert_eq!(h.navigator.last().as_deref(), Some("/dashboard"));
}

#[test]
fn login_trial_with_usage_goes_to_dashboard() {
    let user = sample_user(PlanType::Trial, 3);
    assert_eq!(landing_path(&user), "/dashboard");
    assert_eq!(landing_path(&sample_user(PlanType::Trial, 0)), "/onboarding");
}

#[test]
fn login_failure_surfaces_server_detail() {
    let h = harness(MemoryTokenStore::default());
    h.transport.respond(401, serde_json::json!({"detail": "Email ou senha incorretos"}));

    let err = block_on(h.session.login("joao@x.com", "wrong")).unwrap_err();

    assert_eq!(err.message, "Email ou senha incorretos");
    assert!(!h.session.state().is_authenticated());
    assert!(!h.session.state().loading);
    assert_eq!(h.transport.sent().len(), 1);
}

#[test]
fn login_failure_without_detail_uses_fallback() {
    let h = harness(MemoryTokenStore::default());
    h.transport.fail(ApiError::Transport("offline".to_owned()));

    let err = block_on(h.session.login("joao@x.com", "Secret123")).unwrap_err();

    assert_eq!(err.message, LOGIN_FAILED);
    assert!(h.navigator.paths().is_empty());
}

#[test]
fn login_then_401_ends_unauthenticated_at_login() {
    let h = harness(MemoryTokenStore::default());
    h.transport
        .respond(200, token_body("t1", serde_json::json!({"id": 1, "plan_type": "basic", "credits_used": 4})))
        .respond(401, serde_json::json!({"detail": "Token expired"}));

    block_on(h.session.login("joao@x.com", "Secret123")).unwrap();
    let err = block_on(h.session.client().whatsapp_numbers()).unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    let state = h.session.state();
    assert_eq!(state.user, None);
    assert_eq!(state.token, None);
    assert_eq!(h.storage.load(), None);
    assert_eq!(h.navigator.last().as_deref(), Some("/login"));
}

#[derive(Debug, PartialEq)]
enum Event {
    Guard(GuardOutcome),
    Nav(String),
}

#[test]
fn login_requests_landing_route_before_public_guard_redirects() {
    let transport = ScriptedTransport::default();
    let events = Rc::new(RefCell::new(Vec::new()));
    let nav_log = Rc::clone(&events);
    let session = Session::new(
        ApiConfig::new("http://api.test").unwrap(),
        transport.clone(),
        Rc::new(MemoryTokenStore::default()),
        Rc::new(move |path: &str| nav_log.borrow_mut().push(Event::Nav(path.to_owned()))),
    );
    let guard_log = Rc::clone(&events);
    session
        .store()
        .subscribe(move |s| guard_log.borrow_mut().push(Event::Guard(guard_outcome(s, GuardKind::Public))));
    transport.respond(
        200,
        token_body("t1", serde_json::json!({"id": 1, "plan_type": "trial", "credits_used": 0})),
    );

    block_on(session.login("joao@x.com", "Secret123")).unwrap();

    let events = events.borrow();
    let nav_at = events.iter().position(|e| *e == Event::Nav("/onboarding".to_owned())).unwrap();
    let first_redirect = events.iter().position(|e| matches!(e, Event::Guard(GuardOutcome::Redirect(_))));
    assert!(first_redirect.is_none_or(|at| at > nav_at), "events: {events:?}");
    assert!(!events.iter().any(|e| *e == Event::Nav("/dashboard".to_owned())));
}

struct LossyTokenStore;

impl TokenStore for LossyTokenStore {
    fn load(&self) -> Option<String> {
        None
    }

    fn save(&self, _token: &str) {}

    fn clear(&self) {}
}

#[test]
fn token_survives_failed_persistence() {
    let transport = ScriptedTransport::default();
    let navigator = RecordingNavigator::default();
    let session = Session::new(
        ApiConfig::new("http://api.test").unwrap(),
        transport.clone(),
        Rc::new(LossyTokenStore),
        Rc::new(navigator.clone()),
    );
    transport
        .respond(200, token_body("t1", serde_json::json!({"id": 1, "plan_type": "basic", "credits_used": 4})))
        .respond(200, serde_json::json!([]));

    block_on(session.login("joao@x.com", "Secret123")).unwrap();
    block_on(session.client().whatsapp_numbers()).unwrap();

    assert_eq!(transport.last_sent().header("Authorization"), Some("Bearer t1"));
    assert!(session.state().is_authenticated());
    assert_eq!(navigator.paths(), vec!["/dashboard"]);
}

// =============================================================
// Register
// =============================================================

#[test]
fn register_success_authenticates_and_goes_to_onboarding() {
    let h = harness(MemoryTokenStore::default());
    h.transport.respond(
        201,
        token_body("t3", serde_json::json!({"id": 3, "plan_type": "basic", "credits_used": 9})),
    );
    let data = RegisterData { email: "ana@x.com".to_owned(), ..RegisterData::default() };

    block_on(h.session.register(&data)).unwrap();

    assert!(h.session.state().is_authenticated());
    assert_eq!(h.storage.load().as_deref(), Some("t3"));
    assert_eq!(h.navigator.last().as_deref(), Some("/onboarding"));
}

#[test]
fn register_failure_uses_registration_fallback() {
    let h = harness(MemoryTokenStore::default());
    h.transport.respond(500, serde_json::json!({}));

    let err = block_on(h.session.register(&RegisterData::default())).unwrap_err();

    assert_eq!(err.message, REGISTRATION_FAILED);
    assert!(!h.session.state().loading);
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_twice_is_safe() {
    let h = harness(MemoryTokenStore::with_token("abc"));
    h.session.store().establish("abc".to_owned(), sample_user(PlanType::Basic, 1));

    h.session.logout();
    assert!(!h.session.state().is_authenticated());
    h.session.logout();
    assert!(!h.session.state().is_authenticated());

    assert_eq!(h.session.state().token, None);
    assert_eq!(h.navigator.paths(), vec!["/login", "/login"]);
}

#[test]
fn sign_out_logs_out_even_when_server_fails() {
    let h = harness(MemoryTokenStore::with_token("abc"));
    h.session.store().establish("abc".to_owned(), sample_user(PlanType::Basic, 1));
    h.transport.fail(ApiError::Transport("offline".to_owned()));

    block_on(h.session.sign_out());

    assert_eq!(h.transport.last_sent().url, "http://api.test/api/auth/logout");
    assert!(!h.session.state().is_authenticated());
    assert_eq!(h.navigator.last().as_deref(), Some("/login"));
}

// =============================================================
// User updates
// =============================================================

#[test]
fn update_user_merges_locally_without_request() {
    let h = harness(MemoryTokenStore::default());
    h.session.store().establish("t".to_owned(), sample_user(PlanType::Basic, 1));

    h.session.update_user(&UserPatch { business_name: Some("Padaria".to_owned()), ..UserPatch::default() });

    let user = h.session.state().user.unwrap();
    assert_eq!(user.business_name.as_deref(), Some("Padaria"));
    assert!(h.transport.sent().is_empty());
}

#[test]
fn update_user_without_user_is_noop() {
    let h = harness(MemoryTokenStore::default());
    h.session.update_user(&UserPatch { full_name: Some("X".to_owned()), ..UserPatch::default() });
    assert!(h.session.state().user.is_none());
}

#[test]
fn save_profile_adopts_server_user() {
    let h = harness(MemoryTokenStore::default());
    h.session.store().establish("t".to_owned(), sample_user(PlanType::Basic, 1));
    h.transport.respond(200, serde_json::json!({"id": 1, "full_name": "João Souza", "plan_type": "basic"}));

    let user = block_on(h.session.save_profile(&UserPatch {
        full_name: Some("João Souza".to_owned()),
        ..UserPatch::default()
    }))
    .unwrap();

    assert_eq!(user.full_name.as_deref(), Some("João Souza"));
    assert_eq!(h.session.state().user, Some(user));
    assert_eq!(h.transport.last_sent().body.as_deref(), Some(r#"{"full_name":"João Souza"}"#));
}

#[test]
fn save_profile_failure_keeps_local_user() {
    let h = harness(MemoryTokenStore::default());
    let before = sample_user(PlanType::Basic, 1);
    h.session.store().establish("t".to_owned(), before.clone());
    h.transport.respond(422, serde_json::json!({"detail": [{"msg": "too long"}]}));

    let err = block_on(h.session.save_profile(&UserPatch {
        full_name: Some("x".repeat(200)),
        ..UserPatch::default()
    }))
    .unwrap_err();

    assert_eq!(err.user_message(), "too long");
    assert_eq!(h.session.state().user, Some(before));
}

// =============================================================
// Subscribers
// =============================================================

#[test]
fn subscribers_see_each_change() {
    let h = harness(MemoryTokenStore::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    h.session.store().subscribe(move |s| sink.borrow_mut().push((s.is_authenticated(), s.loading)));

    h.session.store().establish("t".to_owned(), sample_user(PlanType::Basic, 1));
    h.session.store().set_loading(false);
    h.session.logout();

    assert_eq!(*seen.borrow(), vec![(true, true), (true, false), (false, false)]);
}

#[test]
fn subscriber_may_reenter_store() {
    let h = harness(MemoryTokenStore::default());
    let store = h.session.store().clone();
    h.session.store().subscribe(move |s| {
        if s.is_authenticated() && s.loading {
            store.set_loading(false);
        }
    });

    h.session.store().establish("t".to_owned(), sample_user(PlanType::Basic, 1));

    assert!(!h.session.state().loading);
}
