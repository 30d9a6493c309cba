//! Three-step signup wizard: personal data, business, security.
//!
//! DESIGN
//! ======
//! The wizard is a plain state machine (`SignupWizard`) held in one signal.
//! Forward moves validate only the current step; back is always allowed.
//! Submitting re-validates every step and jumps to the first failing one,
//! then hands the payload to `Session::register`, which routes to
//! onboarding on success.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_session;
use crate::components::auth_layout::AuthLayout;
use crate::components::notice_host::use_notices;
use crate::net::types::RegisterData;
use crate::util::format::digits_only;

/// Business sectors offered at signup, as `(value, label)`.
pub const BUSINESS_SECTORS: &[(&str, &str)] = &[
    ("restaurant", "Restaurant / Snack bar"),
    ("supermarket", "Grocery / Supermarket"),
    ("clothing", "Clothing store"),
    ("beauty", "Beauty & Aesthetics"),
    ("services", "General services"),
    ("electronics", "Electronics"),
    ("pharmacy", "Pharmacy"),
    ("other", "Other"),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignupStep {
    #[default]
    Personal,
    Business,
    Security,
}

impl SignupStep {
    pub const ALL: [Self; 3] = [Self::Personal, Self::Business, Self::Security];

    pub fn number(self) -> u8 {
        match self {
            Self::Personal => 1,
            Self::Business => 2,
            Self::Security => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal data",
            Self::Business => "Your business",
            Self::Security => "Security",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Personal => Some(Self::Business),
            Self::Business => Some(Self::Security),
            Self::Security => None,
        }
    }

    fn prev(self) -> Option<Self> {
        match self {
            Self::Personal => None,
            Self::Business => Some(Self::Personal),
            Self::Security => Some(Self::Business),
        }
    }
}

/// A validation failure attached to one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub cpf_cnpj: String,
    pub email: String,
    pub business_name: String,
    pub phone: String,
    pub business_sector: String,
    pub password: String,
    pub confirm_password: String,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            cpf_cnpj: String::new(),
            email: String::new(),
            business_name: String::new(),
            phone: String::new(),
            business_sector: "restaurant".to_owned(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// CPF (11 digits) or CNPJ (14 digits), punctuation ignored. Repeated-digit
/// placeholders such as `111.111.111-11` are refused.
pub fn is_valid_cpf_cnpj(raw: &str) -> bool {
    let digits = digits_only(raw);
    if digits.len() != 11 && digits.len() != 14 {
        return false;
    }
    let first = digits.as_bytes()[0];
    !digits.bytes().all(|b| b == first)
}

/// First rule `password` breaks, if any.
pub fn password_problem(password: &str) -> Option<&'static str> {
    if password.chars().count() < 8 {
        Some("Password must be at least 8 characters")
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Password must contain an uppercase letter")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain a number")
    } else {
        None
    }
}

impl SignupForm {
    /// Errors for the inputs shown on `step`.
    pub fn validate_step(&self, step: SignupStep) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &'static str, message: &'static str| {
            if !ok {
                errors.push(FieldError { field, message });
            }
        };
        match step {
            SignupStep::Personal => {
                check(
                    self.full_name.trim().chars().count() >= 3,
                    "full_name",
                    "Name must be at least 3 characters",
                );
                check(is_valid_cpf_cnpj(&self.cpf_cnpj), "cpf_cnpj", "Invalid CPF/CNPJ");
                check(is_valid_email(self.email.trim()), "email", "Invalid email");
            }
            SignupStep::Business => {
                check(
                    self.business_name.trim().chars().count() >= 2,
                    "business_name",
                    "Invalid business name",
                );
                check(digits_only(&self.phone).len() >= 10, "phone", "Invalid phone number");
                check(
                    BUSINESS_SECTORS.iter().any(|(value, _)| *value == self.business_sector),
                    "business_sector",
                    "Select a sector",
                );
            }
            SignupStep::Security => {
                if let Some(problem) = password_problem(&self.password) {
                    check(false, "password", problem);
                }
                check(
                    self.password == self.confirm_password,
                    "confirm_password",
                    "Passwords do not match",
                );
            }
        }
        errors
    }

    pub fn to_register_data(&self) -> RegisterData {
        RegisterData {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            full_name: self.full_name.trim().to_owned(),
            cpf_cnpj: digits_only(&self.cpf_cnpj),
            phone: digits_only(&self.phone),
            business_name: self.business_name.trim().to_owned(),
            business_sector: self.business_sector.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupWizard {
    pub step: SignupStep,
    pub form: SignupForm,
    pub errors: Vec<FieldError>,
}

impl SignupWizard {
    /// Validate the current step and move forward. Returns whether it moved.
    pub fn advance(&mut self) -> bool {
        self.errors = self.form.validate_step(self.step);
        if !self.errors.is_empty() {
            return false;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
            self.errors.clear();
        }
    }

    /// Payload for registration once every step validates. Otherwise the
    /// wizard moves to the first failing step and shows its errors.
    pub fn submission(&mut self) -> Option<RegisterData> {
        for step in SignupStep::ALL {
            let errors = self.form.validate_step(step);
            if !errors.is_empty() {
                self.step = step;
                self.errors = errors;
                return None;
            }
        }
        self.errors.clear();
        Some(self.form.to_register_data())
    }

    pub fn error_for(&self, field: &str) -> Option<&'static str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notices();
    let wizard = RwSignal::new(SignupWizard::default());
    let busy = RwSignal::new(false);

    let step = move || wizard.with(|w| w.step);

    let on_next = move |_| {
        wizard.update(|w| {
            w.advance();
        });
    };
    let on_back = move |_| wizard.update(SignupWizard::back);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let mut data = None;
        wizard.update(|w| data = w.submission());
        let Some(data) = data else {
            return;
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.session();
            leptos::task::spawn_local(async move {
                match session.register(&data).await {
                    Ok(()) => notices.success("Account created!"),
                    Err(e) => notices.error(e.message),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (session, notices, data);
        }
    };

    view! {
        <AuthLayout title="Create your account" subtitle="Seven days free, no card required">
            <ol class="steps">
                {SignupStep::ALL
                    .into_iter()
                    .map(|s| {
                        let class = move || {
                            let current = step();
                            if s == current {
                                "steps__item steps__item--current"
                            } else if s.number() < current.number() {
                                "steps__item steps__item--done"
                            } else {
                                "steps__item"
                            }
                        };
                        view! {
                            <li class=class>
                                <span class="steps__number">{s.number()}</span>
                                <span class="steps__title">{s.title()}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
            <form class="auth-form" on:submit=on_submit>
                <Show when=move || step() == SignupStep::Personal>
                    {text_field(wizard, "Full name", "text", "full_name", |f| &f.full_name, |f, v| f.full_name = v)}
                    {text_field(wizard, "CPF or CNPJ", "text", "cpf_cnpj", |f| &f.cpf_cnpj, |f, v| f.cpf_cnpj = v)}
                    {text_field(wizard, "Email", "email", "email", |f| &f.email, |f, v| f.email = v)}
                </Show>
                <Show when=move || step() == SignupStep::Business>
                    {text_field(
                        wizard,
                        "Business name",
                        "text",
                        "business_name",
                        |f| &f.business_name,
                        |f, v| f.business_name = v,
                    )}
                    {text_field(wizard, "Phone", "tel", "phone", |f| &f.phone, |f, v| f.phone = v)}
                    <label class="field">
                        <span class="field__label">"Business sector"</span>
                        <select
                            class="field__input"
                            prop:value=move || wizard.with(|w| w.form.business_sector.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                wizard.update(|w| w.form.business_sector = value);
                            }
                        >
                            {BUSINESS_SECTORS
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </select>
                        {move || {
                            wizard
                                .with(|w| w.error_for("business_sector"))
                                .map(|m| view! { <span class="field__error">{m}</span> })
                        }}
                    </label>
                </Show>
                <Show when=move || step() == SignupStep::Security>
                    {text_field(wizard, "Password", "password", "password", |f| &f.password, |f, v| f.password = v)}
                    {text_field(
                        wizard,
                        "Confirm password",
                        "password",
                        "confirm_password",
                        |f| &f.confirm_password,
                        |f, v| f.confirm_password = v,
                    )}
                </Show>
                <div class="wizard__actions">
                    <Show when=move || step() != SignupStep::Personal>
                        <button class="btn" type="button" on:click=on_back>
                            "Back"
                        </button>
                    </Show>
                    <Show
                        when=move || step() == SignupStep::Security
                        fallback=move || {
                            view! {
                                <button class="btn btn--primary" type="button" on:click=on_next>
                                    "Continue"
                                </button>
                            }
                        }
                    >
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Creating account..." } else { "Create account" }}
                        </button>
                    </Show>
                </div>
            </form>
            <p class="auth-card__footer">
                "Already registered? "
                <A href="/login">"Sign in"</A>
            </p>
        </AuthLayout>
    }
}

fn text_field(
    wizard: RwSignal<SignupWizard>,
    label: &'static str,
    input_type: &'static str,
    field: &'static str,
    get: fn(&SignupForm) -> &String,
    set: fn(&mut SignupForm, String),
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field__label">{label}</span>
            <input
                class="field__input"
                type=input_type
                prop:value=move || wizard.with(|w| get(&w.form).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    wizard.update(|w| set(&mut w.form, value));
                }
            />
            {move || wizard.with(|w| w.error_for(field)).map(|m| view! { <span class="field__error">{m}</span> })}
        </label>
    }
}
