//! Gallery: every generated art with search, status filter, share and
//! multi-select delete.
//!
//! DESIGN
//! ======
//! Filtering is done by the server (`status` and `search` query params);
//! the page re-fetches whenever the applied filter or page changes. Deletes
//! run one request per selected item and each item leaves the grid only
//! after its own request succeeded, so a partial failure leaves the
//! survivors selected for a retry.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

use std::collections::BTreeSet;

use leptos::prelude::*;

use crate::app::use_session;
use crate::components::notice_host::use_notices;
use crate::net::types::{Generation, GenerationQuery, GenerationStatus};
use crate::state::list::ListState;
use crate::util::format::short_date;

pub const PAGE_SIZE: u32 = 12;

/// Status filter options, as `(query value, label)`; `None` means all.
pub const STATUS_FILTERS: &[(Option<GenerationStatus>, &str)] = &[
    (None, "All"),
    (Some(GenerationStatus::Completed), "Completed"),
    (Some(GenerationStatus::Processing), "Processing"),
    (Some(GenerationStatus::Failed), "Failed"),
];

/// Filter applied to the server query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    pub search: String,
    pub status: Option<GenerationStatus>,
    pub page: u32,
}

impl GalleryFilter {
    pub fn query(&self) -> GenerationQuery {
        let search = self.search.trim();
        GenerationQuery {
            page: Some(self.page.max(1)),
            limit: Some(PAGE_SIZE),
            status: self.status,
            search: (!search.is_empty()).then(|| search.to_owned()),
        }
    }
}

pub fn parse_status_filter(value: &str) -> Option<GenerationStatus> {
    STATUS_FILTERS.iter().filter_map(|(status, _)| *status).find(|s| s.as_str() == value)
}

/// Ids of the generations ticked in the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<i64>,
}

impl Selection {
    pub fn toggle(&mut self, id: i64) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Select all of `visible`, or clear if they already are all selected.
    pub fn toggle_all(&mut self, visible: &[i64]) {
        if !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id)) {
            self.ids.clear();
        } else {
            self.ids.extend(visible.iter().copied());
        }
    }

    pub fn remove(&mut self, id: i64) {
        self.ids.remove(&id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.ids.iter().copied().collect()
    }
}

/// Summary notice for a batch delete.
pub fn delete_summary(deleted: usize, failed: usize) -> (Option<String>, Option<String>) {
    let ok = (deleted > 0).then(|| format!("{deleted} item(s) deleted"));
    let err = (failed > 0).then(|| format!("{failed} item(s) could not be deleted"));
    (ok, err)
}

#[component]
pub fn GalleryPage() -> impl IntoView {
    let session = use_session();
    #[cfg(not(feature = "hydrate"))]
    let _ = session;
    let notices = use_notices();
    let generations = RwSignal::new(ListState::<Generation>::default());
    let total_pages = RwSignal::new(1_u32);
    let filter = RwSignal::new(GalleryFilter { page: 1, ..GalleryFilter::default() });
    let search_input = RwSignal::new(String::new());
    let selection = RwSignal::new(Selection::default());
    let deleting = RwSignal::new(false);

    Effect::new(move || {
        let query = filter.with(GalleryFilter::query);
        generations.update(|g| g.loading = true);
        selection.update(Selection::clear);

        #[cfg(feature = "hydrate")]
        {
            let client = session.client();
            leptos::task::spawn_local(async move {
                match client.list_generations(&query).await {
                    Ok(list) => {
                        total_pages.set(list.total_pages.max(1));
                        generations.update(|g| g.load(list.generations));
                    }
                    Err(e) => {
                        generations.update(|g| g.fail(e.user_message()));
                        notices.api_error(&e);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = query;
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let search = search_input.get();
        filter.update(|f| {
            f.search = search;
            f.page = 1;
        });
    };

    let on_delete_selected = move |_| {
        if deleting.get() || selection.with(Selection::is_empty) {
            return;
        }
        let ids = selection.with(Selection::ids);
        deleting.set(true);

        #[cfg(feature = "hydrate")]
        {
            let client = session.client();
            leptos::task::spawn_local(async move {
                let mut deleted = 0;
                let mut failed = 0;
                for id in ids {
                    match client.delete_generation(id).await {
                        Ok(()) => {
                            deleted += 1;
                            generations.update(|g| {
                                g.remove(id);
                            });
                            selection.update(|s| s.remove(id));
                        }
                        Err(e) => {
                            log::warn!("delete generation {id} failed: {e}");
                            failed += 1;
                        }
                    }
                }
                let (ok, err) = delete_summary(deleted, failed);
                if let Some(text) = ok {
                    notices.success(text);
                }
                if let Some(text) = err {
                    notices.error(text);
                }
                deleting.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ids;
    };

    let share = move |id: i64| {
        #[cfg(feature = "hydrate")]
        {
            let client = session.client();
            leptos::task::spawn_local(async move {
                match client.share_generation(id).await {
                    Ok(link) => {
                        generations.update(|g| g.update(id, |item| item.shares = link.share_count));
                        notices.success(format!("Share link: {}", link.share_url));
                    }
                    Err(e) => notices.api_error(&e),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, notices);
    };

    let visible_ids = move || generations.with(|g| g.items.iter().map(|item| item.id).collect::<Vec<_>>());

    view! {
        <div class="gallery-page">
            <header class="page__header">
                <h1>"Gallery"</h1>
            </header>

            <div class="toolbar">
                <form class="toolbar__search" on:submit=on_search>
                    <input
                        class="field__input"
                        type="search"
                        placeholder="Search by prompt"
                        prop:value=move || search_input.get()
                        on:input=move |ev| search_input.set(event_target_value(&ev))
                    />
                    <button class="btn" type="submit">
                        "Search"
                    </button>
                </form>
                <select
                    class="field__input"
                    on:change=move |ev| {
                        let status = parse_status_filter(&event_target_value(&ev));
                        filter.update(|f| {
                            f.status = status;
                            f.page = 1;
                        });
                    }
                >
                    {STATUS_FILTERS
                        .iter()
                        .map(|(status, label)| {
                            let value = status.map_or("all", GenerationStatus::as_str);
                            view! { <option value=value>{*label}</option> }
                        })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || !selection.with(Selection::is_empty)>
                <div class="selection-bar">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || {
                                let ids = visible_ids();
                                !ids.is_empty() && selection.with(|s| s.len() == ids.len())
                            }
                            on:change=move |_| {
                                let ids = visible_ids();
                                selection.update(|s| s.toggle_all(&ids));
                            }
                        />
                        {move || format!("{} item(s) selected", selection.with(Selection::len))}
                    </label>
                    <button
                        class="btn btn--danger"
                        on:click=on_delete_selected
                        disabled=move || deleting.get()
                    >
                        {move || if deleting.get() { "Deleting..." } else { "Delete selected" }}
                    </button>
                </div>
            </Show>

            <Show
                when=move || !generations.with(|g| g.loading)
                fallback=move || view! { <p>"Loading arts..."</p> }
            >
                <Show
                    when=move || !generations.with(ListState::is_empty)
                    fallback=move || {
                        view! {
                            <p class="empty">
                                {move || {
                                    if filter.with(|f| f.search.trim().is_empty() && f.status.is_none()) {
                                        "No arts yet."
                                    } else {
                                        "No arts match this filter."
                                    }
                                }}
                            </p>
                        }
                    }
                >
                    <div class="gallery-grid">
                        <For
                            each=move || generations.get().items
                            key=|g| (g.id, g.shares)
                            children=move |g: Generation| {
                                let id = g.id;
                                let src = g.thumbnail_url.or(g.image_url).unwrap_or_default();
                                let alt = g.prompt.clone();
                                view! {
                                    <figure class="art-card">
                                        <input
                                            class="art-card__select"
                                            type="checkbox"
                                            prop:checked=move || selection.with(|s| s.contains(id))
                                            on:change=move |_| selection.update(|s| s.toggle(id))
                                        />
                                        <img src=src alt=alt/>
                                        <figcaption>
                                            <p class="art-card__prompt">{g.prompt}</p>
                                            <span class="art-card__status">{g.status.as_str()}</span>
                                            <span class="art-card__date">{short_date(&g.created_at)}</span>
                                            <span class="art-card__shares">{format!("{} shares", g.shares)}</span>
                                            <button class="btn btn--small" on:click=move |_| share(id)>
                                                "Share"
                                            </button>
                                        </figcaption>
                                    </figure>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>

            <nav class="pager">
                <button
                    class="btn"
                    disabled=move || filter.with(|f| f.page <= 1)
                    on:click=move |_| filter.update(|f| f.page = f.page.saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                <span>{move || format!("Page {} of {}", filter.with(|f| f.page), total_pages.get())}</span>
                <button
                    class="btn"
                    disabled=move || filter.with(|f| f.page) >= total_pages.get()
                    on:click=move |_| filter.update(|f| f.page += 1)
                >
                    "Next"
                </button>
            </nav>
        </div>
    }
}
