//! Centered card frame shared by the login, signup, and onboarding screens.

use leptos::prelude::*;

#[component]
pub fn AuthLayout(
    #[prop(into)] title: String,
    #[prop(into, optional)] subtitle: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-card__brand">"NexusArt"</div>
                <h1 class="auth-card__title">{title}</h1>
                {subtitle.map(|s| view! { <p class="auth-card__subtitle">{s}</p> })}
                {children()}
            </div>
        </div>
    }
}
