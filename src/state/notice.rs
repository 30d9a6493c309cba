//! Transient notices (toasts) shown above the page.
//!
//! DESIGN
//! ======
//! Pages push notices instead of rendering their own error banners so every
//! failure surfaces the same way. The host component dismisses each notice
//! after [`NOTICE_TTL_MS`] in the browser.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use crate::error::ApiError;

/// How long a notice stays on screen.
pub const NOTICE_TTL_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

/// Queue of visible notices, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    pub items: Vec<Notice>,
    next_id: u64,
}

impl NoticeState {
    /// Append a notice and return its id.
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice { id, kind, text: text.into() });
        id
    }

    pub fn success(&mut self, text: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, text)
    }

    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, text)
    }

    /// Surface a request failure with its user-facing message.
    pub fn api_error(&mut self, err: &ApiError) -> u64 {
        self.error(err.user_message())
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }
}
