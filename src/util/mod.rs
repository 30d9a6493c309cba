//! Utility helpers shared across UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage) and pure
//! decisions (guards, formatting) from page and component logic so they can
//! be tested without a DOM.

pub mod auth;
pub mod format;
pub mod storage;
