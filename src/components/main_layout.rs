//! Signed-in chrome: navigation, account summary, credit meter, logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every protected page. Reads the session snapshot for the header
//! and calls `Session::sign_out` from the logout button; the session then
//! routes to `/login`.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_session;
use crate::state::auth::AuthState;

const NAV_ITEMS: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/gallery", "Gallery"),
    ("/templates", "Templates"),
    ("/whatsapp", "WhatsApp"),
    ("/plans", "Plans"),
    ("/settings", "Settings"),
];

#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = use_session();
    let signing_out = RwSignal::new(false);

    let display_name = move || {
        auth.with(|s| s.user.as_ref().map(|u| u.display_name().to_owned()).unwrap_or_default())
    };
    let plan_label = move || auth.with(|s| s.user.as_ref().map(|u| u.plan_type.label()).unwrap_or_default());
    let credits = move || {
        auth.with(|s| {
            s.user
                .as_ref()
                .map(|u| format!("{} / {} credits", u.credits_used, u.credits_limit))
                .unwrap_or_default()
        })
    };
    let meter_style = move || format!("width: {}%", auth.with(AuthState::credit_usage_percent));

    let on_logout = move |_| {
        if signing_out.get() {
            return;
        }
        signing_out.set(true);
        #[cfg(feature = "hydrate")]
        {
            let session = session.session();
            leptos::task::spawn_local(async move {
                session.sign_out().await;
                signing_out.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        session.session().logout();
    };

    view! {
        <div class="app-shell">
            <aside class="sidebar">
                <div class="sidebar__brand">"NexusArt"</div>
                <nav class="sidebar__nav">
                    {NAV_ITEMS
                        .iter()
                        .map(|(href, label)| {
                            view! {
                                <A href=*href attr:class="sidebar__link">
                                    {*label}
                                </A>
                            }
                        })
                        .collect_view()}
                </nav>
                <div class="sidebar__credits">
                    <span class="sidebar__credits-label">{credits}</span>
                    <div class="meter">
                        <div class="meter__fill" style=meter_style></div>
                    </div>
                    <A href="/plans" attr:class="sidebar__upgrade">
                        "Upgrade plan"
                    </A>
                </div>
            </aside>
            <div class="app-shell__main">
                <header class="topbar">
                    <span class="topbar__spacer"></span>
                    <span class="topbar__user">{display_name}</span>
                    <span class="topbar__plan">{plan_label}</span>
                    <button
                        class="btn topbar__logout"
                        on:click=on_logout
                        disabled=move || signing_out.get()
                    >
                        "Logout"
                    </button>
                </header>
                <main class="page">{children()}</main>
            </div>
        </div>
    }
}
