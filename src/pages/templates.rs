//! Templates: the art templates available to the account.
//!
//! DESIGN
//! ======
//! The whole catalogue is fetched once and filtered locally by category and
//! favorites, so switching filters is instant. Favorite toggles wait for the
//! server before flipping the star.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use leptos::prelude::*;

use crate::app::use_session;
use crate::components::notice_host::use_notices;
use crate::net::types::Template;
use crate::state::list::ListState;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    /// `None` shows every category.
    pub category: Option<String>,
    pub favorites_only: bool,
}

impl TemplateFilter {
    pub fn matches(&self, template: &Template) -> bool {
        if self.favorites_only && !template.is_favorite {
            return false;
        }
        self.category.as_ref().is_none_or(|c| *c == template.category)
    }
}

/// Distinct non-empty categories in first-seen order.
pub fn categories(templates: &[Template]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for t in templates {
        if !t.category.is_empty() && !seen.contains(&t.category) {
            seen.push(t.category.clone());
        }
    }
    seen
}

pub fn visible_templates(templates: &[Template], filter: &TemplateFilter) -> Vec<Template> {
    templates.iter().filter(|t| filter.matches(t)).cloned().collect()
}

#[component]
pub fn TemplatesPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notices();
    let templates = RwSignal::new(ListState::<Template>::default());
    let filter = RwSignal::new(TemplateFilter::default());
    let pending = RwSignal::new(None::<i64>);

    #[cfg(feature = "hydrate")]
    {
        let client = session.client();
        leptos::task::spawn_local(async move {
            match client.list_templates(None).await {
                Ok(items) => templates.update(|t| t.load(items)),
                Err(e) => {
                    templates.update(|t| t.fail(e.user_message()));
                    notices.api_error(&e);
                }
            }
        });
    }

    let toggle_favorite = move |id: i64| {
        if pending.get().is_some() {
            return;
        }
        let Some(favorite) = templates.with(|t| t.get(id).map(|item| !item.is_favorite)) else {
            return;
        };
        pending.set(Some(id));

        #[cfg(feature = "hydrate")]
        {
            let client = session.client();
            leptos::task::spawn_local(async move {
                match client.set_template_favorite(id, favorite).await {
                    Ok(()) => templates.update(|t| t.update(id, |item| item.is_favorite = favorite)),
                    Err(e) => notices.api_error(&e),
                }
                pending.set(None);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (favorite, session, notices);
    };

    let category_options = move || templates.with(|t| categories(&t.items));
    let visible = move || templates.with(|t| filter.with(|f| visible_templates(&t.items, f)));

    view! {
        <div class="templates-page">
            <header class="page__header">
                <h1>"Templates"</h1>
            </header>

            <div class="toolbar">
                <select
                    class="field__input"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.category = (!value.is_empty()).then_some(value));
                    }
                >
                    <option value="">"All categories"</option>
                    {move || {
                        category_options()
                            .into_iter()
                            .map(|c| {
                                let label = c.clone();
                                view! { <option value=c>{label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
                <label class="toolbar__toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || filter.with(|f| f.favorites_only)
                        on:change=move |_| filter.update(|f| f.favorites_only = !f.favorites_only)
                    />
                    "Favorites only"
                </label>
            </div>

            <Show
                when=move || !templates.with(|t| t.loading)
                fallback=move || view! { <p>"Loading templates..."</p> }
            >
                <div class="template-grid">
                    <For
                        each=visible
                        key=|t| (t.id, t.is_favorite)
                        children=move |t: Template| {
                            let id = t.id;
                            let star = if t.is_favorite { "★" } else { "☆" };
                            view! {
                                <article class="template-card">
                                    {t.preview_url.map(|src| view! { <img src=src alt=""/> })}
                                    <h3 class="template-card__name">{t.name}</h3>
                                    <p class="template-card__description">{t.description.unwrap_or_default()}</p>
                                    <span class="template-card__category">{t.category}</span>
                                    {t.is_premium.then(|| view! { <span class="badge badge--premium">"Premium"</span> })}
                                    <span class="template-card__usage">{format!("Used {} times", t.usage_count)}</span>
                                    <button
                                        class="btn btn--icon"
                                        title="Favorite"
                                        disabled=move || pending.get() == Some(id)
                                        on:click=move |_| toggle_favorite(id)
                                    >
                                        {star}
                                    </button>
                                </article>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
