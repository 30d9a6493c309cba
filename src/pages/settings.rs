//! Settings: the account's profile, saved through the server.
//!
//! SYSTEM CONTEXT
//! ==============
//! Uses `Session::save_profile`, so the session (and the chrome that reads
//! it) only changes once `PUT /api/auth/me` accepted the edit. Only fields
//! that differ from the current user are sent.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;

use crate::app::use_session;
use crate::components::notice_host::use_notices;
use crate::net::types::{User, UserPatch};
use crate::pages::signup::BUSINESS_SECTORS;
use crate::state::auth::AuthState;
use crate::util::format::{digits_only, format_phone, short_date};

/// Editable copy of the profile fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub full_name: String,
    pub phone: String,
    pub business_name: String,
    pub business_sector: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone().unwrap_or_default(),
            phone: user.phone.as_deref().map(format_phone).unwrap_or_default(),
            business_name: user.business_name.clone().unwrap_or_default(),
            business_sector: user.business_sector.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.full_name.trim().chars().count() < 3 {
            return Err("Name must be at least 3 characters");
        }
        if !self.phone.trim().is_empty() && digits_only(&self.phone).len() < 10 {
            return Err("Invalid phone number");
        }
        if !self.business_name.trim().is_empty() && self.business_name.trim().chars().count() < 2 {
            return Err("Invalid business name");
        }
        Ok(())
    }

    /// Fields that differ from `user`, normalized the way signup sends them.
    pub fn patch_against(&self, user: &User) -> UserPatch {
        fn changed(new: String, old: Option<&str>) -> Option<String> {
            (new != old.unwrap_or_default()).then_some(new)
        }
        UserPatch {
            full_name: changed(self.full_name.trim().to_owned(), user.full_name.as_deref()),
            phone: changed(digits_only(&self.phone), user.phone.as_deref().map(str::trim)),
            business_name: changed(self.business_name.trim().to_owned(), user.business_name.as_deref()),
            business_sector: changed(self.business_sector.clone(), user.business_sector.as_deref()),
        }
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = use_session();
    let notices = use_notices();
    let form = RwSignal::new(auth.with_untracked(|s| s.user.as_ref().map(ProfileForm::from_user).unwrap_or_default()));
    let error = RwSignal::new(None::<&'static str>);
    let saving = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get() {
            return;
        }
        let Some(user) = auth.with_untracked(|s| s.user.clone()) else {
            return;
        };
        let current = form.get();
        if let Err(message) = current.validate() {
            error.set(Some(message));
            return;
        }
        error.set(None);
        let patch = current.patch_against(&user);
        if patch.is_empty() {
            notices.success("Nothing to save");
            return;
        }
        saving.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.session();
            leptos::task::spawn_local(async move {
                match session.save_profile(&patch).await {
                    Ok(saved) => {
                        form.set(ProfileForm::from_user(&saved));
                        notices.success("Profile saved");
                    }
                    Err(e) => notices.api_error(&e),
                }
                saving.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (patch, session);
    };

    let account_line = move || {
        auth.with(|s| {
            s.user
                .as_ref()
                .map(|u| format!("{} · {} plan · member since {}", u.email, u.plan_type.label(), short_date(&u.created_at)))
                .unwrap_or_default()
        })
    };

    view! {
        <div class="settings-page">
            <header class="page__header">
                <h1>"Settings"</h1>
                <p class="page__subtitle">{account_line}</p>
            </header>
            <form class="settings-form" on:submit=on_submit>
                {profile_field(form, "Full name", "text", |f| &f.full_name, |f, v| f.full_name = v)}
                {profile_field(form, "Phone", "tel", |f| &f.phone, |f, v| f.phone = v)}
                {profile_field(form, "Business name", "text", |f| &f.business_name, |f, v| f.business_name = v)}
                <label class="field">
                    <span class="field__label">"Business sector"</span>
                    <select
                        class="field__input"
                        prop:value=move || form.with(|f| f.business_sector.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.business_sector = value);
                        }
                    >
                        {BUSINESS_SECTORS
                            .iter()
                            .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                            .collect_view()}
                    </select>
                </label>
                {move || error.get().map(|m| view! { <p class="form-error">{m}</p> })}
                <button class="btn btn--primary" type="submit" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save changes" }}
                </button>
            </form>
        </div>
    }
}

fn profile_field(
    form: RwSignal<ProfileForm>,
    label: &'static str,
    input_type: &'static str,
    get: fn(&ProfileForm) -> &String,
    set: fn(&mut ProfileForm, String),
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field__label">{label}</span>
            <input
                class="field__input"
                type=input_type
                prop:value=move || form.with(|f| get(f).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        </label>
    }
}
