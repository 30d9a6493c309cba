//! Dashboard: account stats and the most recent generations.
//!
//! SYSTEM CONTEXT
//! ==============
//! Default landing route for returning users. Loads `/api/auth/me/stats`
//! and the first page of generations once on mount; failures become
//! notices and the cards fall back to zeros.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_session;
use crate::components::notice_host::use_notices;
#[cfg(feature = "hydrate")]
use crate::net::types::GenerationQuery;
use crate::net::types::{Generation, User, UserStats};
use crate::state::auth::AuthState;
use crate::state::list::ListState;
use crate::util::format::short_date;

/// How many generations the "recent" strip shows.
pub const RECENT_LIMIT: u32 = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

/// Credits the user can still spend this period.
pub fn remaining_credits(user: &User) -> u32 {
    user.remaining_credits.unwrap_or_else(|| user.credits_limit.saturating_sub(user.credits_used))
}

pub fn stat_cards(stats: &UserStats, user: Option<&User>) -> Vec<StatCard> {
    vec![
        StatCard { label: "Arts created", value: stats.total_generations.to_string() },
        StatCard { label: "This month", value: stats.generations_this_month.to_string() },
        StatCard { label: "Credits left", value: user.map_or(0, remaining_credits).to_string() },
        StatCard { label: "WhatsApp numbers", value: stats.whatsapp_numbers_count.to_string() },
    ]
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = use_session();
    let notices = use_notices();
    let stats = RwSignal::new(UserStats::default());
    let recent = RwSignal::new(ListState::<Generation>::default());

    #[cfg(feature = "hydrate")]
    {
        let client = session.client();
        leptos::task::spawn_local(async move {
            match client.user_stats().await {
                Ok(s) => stats.set(s),
                Err(e) => notices.api_error(&e),
            }
            let query = GenerationQuery { page: Some(1), limit: Some(RECENT_LIMIT), ..GenerationQuery::default() };
            match client.list_generations(&query).await {
                Ok(list) => recent.update(|r| r.load(list.generations)),
                Err(e) => {
                    recent.update(|r| r.fail(e.user_message()));
                    notices.api_error(&e);
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (session, notices);

    let greeting = move || {
        auth.with(|s| s.user.as_ref().map(|u| format!("Hello, {}", u.display_name())).unwrap_or_default())
    };
    let cards = move || stats.with(|s| auth.with(|a| stat_cards(s, a.user.as_ref())));

    view! {
        <div class="dashboard-page">
            <header class="page__header">
                <h1>{greeting}</h1>
                <p class="page__subtitle">
                    {move || format!("{}% of this period's credits used", auth.with(AuthState::credit_usage_percent))}
                </p>
            </header>

            <section class="stat-grid">
                {move || {
                    cards()
                        .into_iter()
                        .map(|card| {
                            view! {
                                <div class="stat-card">
                                    <span class="stat-card__value">{card.value}</span>
                                    <span class="stat-card__label">{card.label}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </section>

            <section class="recent">
                <header class="recent__header">
                    <h2>"Recent arts"</h2>
                    <A href="/gallery">"See all"</A>
                </header>
                <Show
                    when=move || !recent.with(|r| r.loading)
                    fallback=move || view! { <p>"Loading arts..."</p> }
                >
                    <Show
                        when=move || !recent.with(ListState::is_empty)
                        fallback=move || {
                            view! {
                                <p class="empty">
                                    "No arts yet. Send a message to your WhatsApp number to create one."
                                </p>
                            }
                        }
                    >
                        <div class="recent__grid">
                            {move || {
                                recent
                                    .get()
                                    .items
                                    .into_iter()
                                    .map(|g| {
                                        let src = g.thumbnail_url.or(g.image_url).unwrap_or_default();
                                        view! {
                                            <figure class="art-thumb">
                                                <img src=src alt=g.prompt/>
                                                <figcaption>
                                                    <span class="art-thumb__status">{g.status.as_str()}</span>
                                                    <span class="art-thumb__date">{short_date(&g.created_at)}</span>
                                                </figcaption>
                                            </figure>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                </Show>
            </section>
        </div>
    }
}
