//! Page-local list state for server-backed collections.
//!
//! DESIGN
//! ======
//! Each page owns one `ListState` per collection. The server stays
//! authoritative: helpers here are applied only after a mutation request
//! succeeded, so the list never shows a change the backend refused.

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;

use crate::net::types::{Generation, Template, WhatsAppNumber};

/// Records with a stable server id.
pub trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Generation {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Template {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for WhatsAppNumber {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Items plus the fetch status of one collection.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self { items: Vec::new(), loading: true, error: None }
    }
}

impl<T: Keyed> ListState<T> {
    /// Replace the contents with a fresh fetch result.
    pub fn load(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
        self.error = None;
    }

    /// Record a failed fetch. Previously loaded items are kept.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.key() == id)
    }

    /// Drop the item with `id`; returns whether one was present.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.key() != id);
        self.items.len() != before
    }

    /// Replace the item with the same id, or prepend it.
    pub fn upsert(&mut self, item: T) {
        match self.items.iter_mut().find(|existing| existing.key() == item.key()) {
            Some(slot) => *slot = item,
            None => self.items.insert(0, item),
        }
    }

    /// Apply `change` to the item with `id`, if present.
    pub fn update(&mut self, id: i64, change: impl FnOnce(&mut T)) {
        if let Some(item) = self.items.iter_mut().find(|item| item.key() == id) {
            change(item);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
