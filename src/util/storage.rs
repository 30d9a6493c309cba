//! Durable client storage for the bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is the only value the dashboard persists. Its presence means a
//! prior login succeeded; its absence forces unauthenticated routing. The
//! browser build keeps it in `localStorage` under [`TOKEN_KEY`]; tests and
//! the SSR pass use [`MemoryTokenStore`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::rc::Rc;

/// `localStorage` key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key-value slot for the persisted credential.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// `window.localStorage` backed store. Inert outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTokenStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let raw = local_storage()?.get_item(TOKEN_KEY).ok().flatten()?;
            if raw.is_empty() { None } else { Some(raw) }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("localStorage unavailable; token not persisted");
                return;
            };
            if let Err(e) = storage.set_item(TOKEN_KEY, token) {
                log::warn!("failed to persist token: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
    }
}

/// Process-local store; clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self { slot: Rc::new(RefCell::new(Some(token.to_owned()))) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}
