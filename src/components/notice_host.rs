//! Toast notices and the host that renders them.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages report outcomes through [`Notices`] from context rather than
//! rendering their own banners. In the browser every notice is dismissed
//! automatically after `NOTICE_TTL_MS`.

use leptos::prelude::*;

use crate::error::ApiError;
use crate::state::notice::{Notice, NoticeKind, NoticeState};

/// Context handle for pushing notices.
#[derive(Clone, Copy)]
pub struct Notices(RwSignal<NoticeState>);

impl Notices {
    pub fn new() -> Self {
        Self(RwSignal::new(NoticeState::default()))
    }

    pub fn success(self, text: impl Into<String>) {
        let text = text.into();
        self.push_with(move |n| n.success(text));
    }

    pub fn error(self, text: impl Into<String>) {
        let text = text.into();
        self.push_with(move |n| n.error(text));
    }

    /// Report a failed request with its user-facing message.
    pub fn api_error(self, err: &ApiError) {
        log::warn!("request failed: {err}");
        self.push_with(|n| n.api_error(err));
    }

    pub fn dismiss(self, id: u64) {
        self.0.update(|n| n.dismiss(id));
    }

    fn push_with(self, push: impl FnOnce(&mut NoticeState) -> u64) {
        let mut id = 0;
        self.0.update(|n| id = push(n));

        #[cfg(feature = "hydrate")]
        {
            let state = self.0;
            gloo_timers::callback::Timeout::new(crate::state::notice::NOTICE_TTL_MS, move || {
                state.update(|n| n.dismiss(id));
            })
            .forget();
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notices() -> Notices {
    expect_context::<Notices>()
}

/// Stack of visible notices, newest last.
#[component]
pub fn NoticeHost() -> impl IntoView {
    let notices = use_notices();

    view! {
        <div class="notice-host" aria-live="polite">
            <For
                each=move || notices.0.get().items
                key=|notice| notice.id
                children=move |notice: Notice| {
                    let id = notice.id;
                    let class = match notice.kind {
                        NoticeKind::Success => "notice notice--success",
                        NoticeKind::Error => "notice notice--error",
                    };
                    view! {
                        <div class=class role="alert">
                            <span class="notice__text">{notice.text}</span>
                            <button
                                class="notice__close"
                                title="Dismiss"
                                on:click=move |_| notices.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
