//! Route wrappers that gate rendering on the session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route in `app::App` is wrapped in one of these. The decision comes
//! from `util::auth::guard_outcome`; this module only maps the outcome to a
//! view. The outcome is memoized so a user-record refresh that does not
//! change the decision leaves the page mounted.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::state::auth::AuthState;
use crate::util::auth::{GuardKind, GuardOutcome, guard_outcome};

/// Render children only for signed-in users.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::Protected, children)
}

/// Render children only for visitors.
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::Public, children)
}

fn guarded(kind: GuardKind, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let outcome = Memo::new(move |_| auth.with(|state| guard_outcome(state, kind)));

    move || match outcome.get() {
        GuardOutcome::Loading => view! { <LoadingScreen/> }.into_any(),
        GuardOutcome::Render => children().into_any(),
        GuardOutcome::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
    }
}

/// Full-screen spinner shown while the session resolves.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen" role="status">
            <div class="spinner" aria-hidden="true"></div>
            <span class="sr-only">"Loading..."</span>
        </div>
    }
}
