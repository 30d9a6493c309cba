//! Login page: email + password exchanged for a bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. On success `Session::login` persists the token and routes
//! to onboarding or the dashboard itself; this page only validates input
//! and shows the failure message.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_session;
use crate::components::auth_layout::AuthLayout;
use crate::components::notice_host::use_notices;

/// Trim and require both credentials.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !crate::pages::signup::is_valid_email(email) {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notices();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.session();
            leptos::task::spawn_local(async move {
                match session.login(&email_value, &password_value).await {
                    Ok(()) => notices.success("Welcome back!"),
                    // The guard remounts this page once loading ends, so the
                    // inline message may be gone; the notice outlives it.
                    Err(e) => {
                        notices.error(e.message.clone());
                        error.set(Some(e.message));
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (session, notices, email_value, password_value);
        }
    };

    view! {
        <AuthLayout title="Sign in" subtitle="Manage your WhatsApp art studio">
            <form class="auth-form" on:submit=on_submit>
                <label class="field">
                    <span class="field__label">"Email"</span>
                    <input
                        class="field__input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@business.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field__label">"Password"</span>
                    <input
                        class="field__input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <p class="auth-card__footer">
                "No account yet? "
                <A href="/signup">"Create one"</A>
            </p>
        </AuthLayout>
    }
}
