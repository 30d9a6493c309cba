//! First-run onboarding: link a WhatsApp number and pick an art style.
//!
//! SYSTEM CONTEXT
//! ==============
//! Fresh trial accounts land here after login or signup. Finishing saves
//! the choices with `POST /api/users/onboarding` and opens the dashboard;
//! skipping opens the dashboard without saving.

#[cfg(test)]
#[path = "onboarding_test.rs"]
mod onboarding_test;

use leptos::prelude::*;

use crate::app::{use_nav_request, use_session};
use crate::components::auth_layout::AuthLayout;
use crate::components::notice_host::use_notices;
use crate::net::types::OnboardingSettings;
use crate::util::auth::DASHBOARD_PATH;
use crate::util::format::{digits_only, format_phone};

/// Art styles offered during onboarding, as `(id, name, description)`.
pub const ART_STYLES: &[(&str, &str, &str)] = &[
    ("modern", "Modern", "Clean, current design"),
    ("elegant", "Elegant", "Refined, for premium businesses"),
    ("fun", "Fun", "Colorful and relaxed"),
    ("minimal", "Minimal", "Simple and to the point"),
    ("bold", "Bold", "Big highlights for promotions"),
    ("custom", "Custom", "Decide later"),
];

pub const DEFAULT_STYLE: &str = "modern";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnboardingStep {
    #[default]
    Connect,
    Style,
    Finish,
}

impl OnboardingStep {
    pub const ALL: [Self; 3] = [Self::Connect, Self::Style, Self::Finish];

    pub fn title(self) -> &'static str {
        match self {
            Self::Connect => "Connect WhatsApp",
            Self::Style => "Choose a style",
            Self::Finish => "All set",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OnboardingWizard {
    pub step: OnboardingStep,
    pub number: String,
    pub style: String,
    pub error: Option<&'static str>,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self { step: OnboardingStep::Connect, number: String::new(), style: DEFAULT_STYLE.to_owned(), error: None }
    }
}

/// A Brazilian number with area code: 10 (landline) or 11 (mobile) digits.
pub fn is_valid_whatsapp_number(raw: &str) -> bool {
    matches!(digits_only(raw).len(), 10 | 11)
}

impl OnboardingWizard {
    /// Move to the next step when the current one is complete.
    pub fn advance(&mut self) -> bool {
        match self.step {
            OnboardingStep::Connect => {
                if self.number.trim().is_empty() {
                    self.error = Some("Enter a WhatsApp number");
                    return false;
                }
                if !is_valid_whatsapp_number(&self.number) {
                    self.error = Some("Enter the number with area code, e.g. (11) 98765-4321");
                    return false;
                }
                self.error = None;
                self.step = OnboardingStep::Style;
                true
            }
            OnboardingStep::Style => {
                self.step = OnboardingStep::Finish;
                true
            }
            OnboardingStep::Finish => false,
        }
    }

    pub fn back(&mut self) {
        self.error = None;
        self.step = match self.step {
            OnboardingStep::Connect | OnboardingStep::Style => OnboardingStep::Connect,
            OnboardingStep::Finish => OnboardingStep::Style,
        };
    }

    pub fn select_style(&mut self, style: &str) {
        if ART_STYLES.iter().any(|(id, _, _)| *id == style) {
            self.style = style.to_owned();
        }
    }

    /// Payload to save; only available on the final step.
    pub fn settings(&self) -> Option<OnboardingSettings> {
        (self.step == OnboardingStep::Finish).then(|| OnboardingSettings {
            whatsapp_number: digits_only(&self.number),
            preferred_style: self.style.clone(),
        })
    }

    pub fn style_name(&self) -> &'static str {
        ART_STYLES.iter().find(|(id, _, _)| *id == self.style).map_or("Modern", |(_, name, _)| *name)
    }
}

#[component]
pub fn OnboardingPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notices();
    let nav = use_nav_request();
    let wizard = RwSignal::new(OnboardingWizard::default());
    let busy = RwSignal::new(false);

    let step = move || wizard.with(|w| w.step);

    let on_next = move |_| {
        wizard.update(|w| {
            w.advance();
        });
    };
    let on_back = move |_| wizard.update(OnboardingWizard::back);
    let on_skip = move |_| nav.go(DASHBOARD_PATH);

    let on_finish = move |_| {
        if busy.get() {
            return;
        }
        let Some(settings) = wizard.with(OnboardingWizard::settings) else {
            return;
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let client = session.client();
            leptos::task::spawn_local(async move {
                match client.save_onboarding(&settings).await {
                    Ok(()) => {
                        notices.success("Setup complete!");
                        nav.go(DASHBOARD_PATH);
                    }
                    Err(e) => notices.api_error(&e),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (session, notices, settings);
        }
    };

    view! {
        <AuthLayout title="Welcome to NexusArt" subtitle="Three quick steps and your art studio is ready">
            <ol class="steps">
                {OnboardingStep::ALL
                    .into_iter()
                    .map(|s| {
                        let class = move || {
                            if s == step() { "steps__item steps__item--current" } else { "steps__item" }
                        };
                        view! { <li class=class>{s.title()}</li> }
                    })
                    .collect_view()}
            </ol>

            <Show when=move || step() == OnboardingStep::Connect>
                <label class="field">
                    <span class="field__label">"WhatsApp number"</span>
                    <input
                        class="field__input"
                        type="tel"
                        placeholder="(11) 98765-4321"
                        prop:value=move || wizard.with(|w| w.number.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            wizard.update(|w| w.number = value);
                        }
                    />
                    {move || wizard.with(|w| w.error).map(|m| view! { <span class="field__error">{m}</span> })}
                </label>
                <p class="hint">"Customers send a message to this number and receive the art back."</p>
            </Show>

            <Show when=move || step() == OnboardingStep::Style>
                <div class="style-grid">
                    {ART_STYLES
                        .iter()
                        .map(|(id, name, description)| {
                            let id = *id;
                            let class = move || {
                                if wizard.with(|w| w.style == id) { "style-card style-card--selected" } else { "style-card" }
                            };
                            view! {
                                <button
                                    type="button"
                                    class=class
                                    on:click=move |_| wizard.update(|w| w.select_style(id))
                                >
                                    <span class="style-card__name">{*name}</span>
                                    <span class="style-card__description">{*description}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>

            <Show when=move || step() == OnboardingStep::Finish>
                <div class="summary">
                    <p>
                        "WhatsApp: "
                        <strong>{move || wizard.with(|w| format_phone(&w.number))}</strong>
                    </p>
                    <p>
                        "Style: "
                        <strong>{move || wizard.with(OnboardingWizard::style_name)}</strong>
                    </p>
                    <p class="hint">"Send a product photo or description to your number to create the first art."</p>
                </div>
            </Show>

            <div class="wizard__actions">
                <button class="btn btn--ghost" type="button" on:click=on_skip>
                    "Skip for now"
                </button>
                <Show when=move || step() != OnboardingStep::Connect>
                    <button class="btn" type="button" on:click=on_back>
                        "Back"
                    </button>
                </Show>
                <Show
                    when=move || step() == OnboardingStep::Finish
                    fallback=move || {
                        view! {
                            <button class="btn btn--primary" type="button" on:click=on_next>
                                "Continue"
                            </button>
                        }
                    }
                >
                    <button class="btn btn--primary" type="button" on:click=on_finish disabled=move || busy.get()>
                        {move || if busy.get() { "Saving..." } else { "Go to dashboard" }}
                    </button>
                </Show>
            </div>
        </AuthLayout>
    }
}
