//! Session store and the operations that mutate it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is the single writer of "who is logged in". It owns the
//! `AuthState`, mirrors the token into durable storage, and notifies
//! subscribers (the Leptos bridge in `app`) after every change. `Session`
//! pairs the store with the shared `ApiClient` for the operations that need
//! the network: login, register, startup identity check, profile save.
//!
//! CONCURRENCY
//! ===========
//! Single-threaded: state lives in `Rc<RefCell<..>>`. Borrows are released
//! before subscribers or the navigator run, so a callback may re-enter the
//! store (for example a 401 during a subscriber-triggered fetch). Concurrent
//! logins are not serialized; the last one to finish wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ApiConfig;
use crate::error::{ApiError, AuthError};
use crate::net::http::{ApiClient, Transport};
use crate::net::middleware::{BearerAuth, LogoutOnUnauthorized};
use crate::net::types::{RegisterData, User, UserPatch};
use crate::state::auth::AuthState;
use crate::util::auth::{DASHBOARD_PATH, LOGIN_PATH, ONBOARDING_PATH};
use crate::util::storage::TokenStore;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Where session operations send the router.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn navigate(&self, path: &str) {
        self(path);
    }
}

type Subscriber = Rc<dyn Fn(&AuthState)>;

struct StoreInner {
    state: RefCell<AuthState>,
    storage: Rc<dyn TokenStore>,
    navigator: Rc<dyn Navigator>,
    subscribers: RefCell<Vec<Subscriber>>,
}

/// Owner of the session state. Clones are handles to the same store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<StoreInner>,
}

impl SessionStore {
    /// Open the store with whatever token is already persisted.
    ///
    /// The session starts in the loading state until the identity check
    /// resolves it.
    pub fn new(storage: Rc<dyn TokenStore>, navigator: Rc<dyn Navigator>) -> Self {
        let state = AuthState { user: None, token: storage.load(), loading: true };
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(state),
                storage,
                navigator,
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Register `callback` to receive every future state change.
    pub fn subscribe(&self, callback: impl Fn(&AuthState) + 'static) {
        self.inner.subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn mutate(&self, change: impl FnOnce(&mut AuthState)) {
        change(&mut self.inner.state.borrow_mut());
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        let subscribers = self.inner.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }

    pub fn navigate(&self, path: &str) {
        let navigator = Rc::clone(&self.inner.navigator);
        navigator.navigate(path);
    }

    pub fn set_loading(&self, loading: bool) {
        if self.inner.state.borrow().loading == loading {
            return;
        }
        self.mutate(|s| s.loading = loading);
    }

    /// Persist `token` and make `user` the current user.
    pub fn establish(&self, token: String, user: User) {
        self.inner.storage.save(&token);
        self.mutate(|s| {
            s.token = Some(token);
            s.user = Some(user);
        });
    }

    /// Replace the current user record.
    pub fn set_user(&self, user: User) {
        self.mutate(|s| s.user = Some(user));
    }

    /// Drop token and user without navigating.
    pub fn clear(&self) {
        self.inner.storage.clear();
        self.mutate(|s| {
            s.token = None;
            s.user = None;
        });
    }

    /// Drop token and user, then send the router to the login screen.
    ///
    /// Local only; safe to call repeatedly.
    pub fn logout(&self) {
        log::info!("session ended");
        self.clear();
        self.navigate(LOGIN_PATH);
    }

    /// Merge `patch` into the in-memory user. The server is not told.
    pub fn update_user(&self, patch: &UserPatch) {
        if self.inner.state.borrow().user.is_none() {
            return;
        }
        self.mutate(|s| {
            if let Some(user) = s.user.as_mut() {
                patch.apply_to(user);
            }
        });
    }
}

/// Route a freshly authenticated user lands on.
pub fn landing_path(user: &User) -> &'static str {
    if user.is_fresh_trial() { ONBOARDING_PATH } else { DASHBOARD_PATH }
}

/// Session store plus the client whose middleware is bound to it.
pub struct Session<T> {
    store: SessionStore,
    client: ApiClient<T>,
}

impl<T> Clone for Session<T> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone(), client: self.client.clone() }
    }
}

impl<T: Transport> Session<T> {
    /// Build the store and a client wired with the auth middleware pair.
    pub fn new(
        config: ApiConfig,
        transport: T,
        storage: Rc<dyn TokenStore>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let store = SessionStore::new(storage, navigator);
        let client = ApiClient::new(config, transport)
            .with(BearerAuth::new(store.clone()))
            .with(LogoutOnUnauthorized::new(store.clone()));
        Self { store, client }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn state(&self) -> AuthState {
        self.store.snapshot()
    }

    /// Startup identity check.
    ///
    /// With a persisted token, fetches the current user; any failure clears
    /// the credential without navigating (route guards redirect from the
    /// resulting state). Always leaves `loading` false.
    pub async fn restore(&self) {
        if self.store.token().is_some() {
            match self.client.current_user().await {
                Ok(user) => self.store.set_user(user),
                Err(e) => {
                    log::warn!("identity check failed: {e}");
                    self.store.clear();
                }
            }
        }
        self.store.set_loading(false);
    }

    /// Exchange credentials for a token and route the user onward.
    ///
    /// # Errors
    ///
    /// Returns the server's message (or a generic one) when the credentials
    /// are refused or the request fails. Nothing is retried.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.store.set_loading(true);
        let result = self.client.login(email, password).await;
        let outcome = self.accept_token(result, LOGIN_FAILED, landing_path);
        self.finish(outcome)
    }

    /// Create an account and go to onboarding.
    ///
    /// # Errors
    ///
    /// Returns the server's message (or a generic one) on failure.
    pub async fn register(&self, data: &RegisterData) -> Result<(), AuthError> {
        self.store.set_loading(true);
        let result = self.client.register(data).await;
        let outcome = self.accept_token(result, REGISTRATION_FAILED, |_| ONBOARDING_PATH);
        self.finish(outcome)
    }

    fn accept_token(
        &self,
        result: Result<crate::net::types::TokenResponse, ApiError>,
        fallback: &str,
        destination: impl FnOnce(&User) -> &'static str,
    ) -> Result<&'static str, AuthError> {
        match result {
            Ok(resp) => {
                let path = destination(&resp.user);
                self.store.establish(resp.access_token, resp.user);
                Ok(path)
            }
            Err(e) => {
                log::warn!("authentication failed: {e}");
                Err(AuthError::normalize(e, fallback))
            }
        }
    }

    /// The navigation request goes out while `loading` is still set, so a
    /// public guard never sees an authenticated, settled session first.
    fn finish(&self, outcome: Result<&'static str, AuthError>) -> Result<(), AuthError> {
        if let Ok(path) = &outcome {
            self.store.navigate(path);
        }
        self.store.set_loading(false);
        outcome.map(|_| ())
    }

    /// Local logout; see [`SessionStore::logout`].
    pub fn logout(&self) {
        self.store.logout();
    }

    /// Tell the server, then log out locally regardless of its answer.
    pub async fn sign_out(&self) {
        if let Err(e) = self.client.logout_remote().await {
            log::warn!("server logout failed: {e}");
        }
        self.store.logout();
    }

    /// Local-only merge; see [`SessionStore::update_user`].
    pub fn update_user(&self, patch: &UserPatch) {
        self.store.update_user(patch);
    }

    /// Save `patch` on the server and adopt the user it returns.
    ///
    /// # Errors
    ///
    /// Returns the request error; the local user is left untouched.
    pub async fn save_profile(&self, patch: &UserPatch) -> Result<User, ApiError> {
        let user = self.client.update_current_user(patch).await?;
        self.store.set_user(user.clone());
        Ok(user)
    }
}
