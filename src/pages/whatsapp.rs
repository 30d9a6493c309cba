//! WhatsApp: numbers linked to the account, connect/disconnect, and a test
//! message sender.
//!
//! SYSTEM CONTEXT
//! ==============
//! Customers message these numbers to request art. Connecting adds the
//! server's record to the list; disconnecting removes the row only after
//! the server confirms.

#[cfg(test)]
#[path = "whatsapp_test.rs"]
mod whatsapp_test;

use leptos::prelude::*;

use crate::app::use_session;
use crate::components::notice_host::use_notices;
use crate::net::types::{NumberStatus, WhatsAppNumber};
use crate::pages::onboarding::is_valid_whatsapp_number;
use crate::state::list::ListState;
use crate::util::format::{digits_only, format_phone};

pub const DEFAULT_TEST_MESSAGE: &str = "Hello from NexusArt! Your number is connected.";

/// Number in the form the backend stores: `+55` followed by the digits.
pub fn normalize_number(raw: &str) -> Result<String, &'static str> {
    if raw.trim().is_empty() {
        return Err("Enter a WhatsApp number");
    }
    if !is_valid_whatsapp_number(raw) {
        return Err("Enter the number with area code, e.g. (11) 98765-4321");
    }
    Ok(format!("+55{}", digits_only(raw)))
}

pub fn status_label(status: NumberStatus) -> &'static str {
    match status {
        NumberStatus::Pending => "Pending verification",
        NumberStatus::Verified => "Connected",
        NumberStatus::Inactive => "Inactive",
    }
}

#[component]
pub fn WhatsAppPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notices();
    let numbers = RwSignal::new(ListState::<WhatsAppNumber>::default());
    let new_number = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<&'static str>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let client = session.client();
        leptos::task::spawn_local(async move {
            match client.whatsapp_numbers().await {
                Ok(items) => numbers.update(|n| n.load(items)),
                Err(e) => {
                    numbers.update(|n| n.fail(e.user_message()));
                    notices.api_error(&e);
                }
            }
        });
    }

    let on_connect = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let phone = match normalize_number(&new_number.get()) {
            Ok(phone) => phone,
            Err(message) => {
                form_error.set(Some(message));
                return;
            }
        };
        form_error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let client = session.client();
            leptos::task::spawn_local(async move {
                match client.connect_whatsapp(&phone).await {
                    Ok(number) => {
                        numbers.update(|n| n.upsert(number));
                        new_number.set(String::new());
                        notices.success("WhatsApp number connected");
                    }
                    Err(e) => notices.api_error(&e),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = phone;
    };

    let disconnect = move |id: i64| {
        #[cfg(feature = "hydrate")]
        {
            let client = session.client();
            leptos::task::spawn_local(async move {
                match client.disconnect_whatsapp(id).await {
                    Ok(()) => {
                        numbers.update(|n| {
                            n.remove(id);
                        });
                        notices.success("Number disconnected");
                    }
                    Err(e) => notices.api_error(&e),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    let send_test = move |phone: String| {
        #[cfg(feature = "hydrate")]
        {
            let client = session.client();
            leptos::task::spawn_local(async move {
                match client.send_test_message(&phone, DEFAULT_TEST_MESSAGE).await {
                    Ok(receipt) if receipt.success => notices.success("Test message sent"),
                    Ok(_) => notices.error("The test message was not accepted"),
                    Err(e) => notices.api_error(&e),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (phone, session, notices);
    };

    view! {
        <div class="whatsapp-page">
            <header class="page__header">
                <h1>"WhatsApp"</h1>
                <p class="page__subtitle">"Customers message these numbers to get their art."</p>
            </header>

            <form class="inline-form" on:submit=on_connect>
                <input
                    class="field__input"
                    type="tel"
                    placeholder="(11) 98765-4321"
                    prop:value=move || new_number.get()
                    on:input=move |ev| new_number.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Connecting..." } else { "Connect number" }}
                </button>
                {move || form_error.get().map(|m| view! { <span class="field__error">{m}</span> })}
            </form>

            <Show
                when=move || !numbers.with(|n| n.loading)
                fallback=move || view! { <p>"Loading numbers..."</p> }
            >
                <Show
                    when=move || !numbers.with(ListState::is_empty)
                    fallback=move || view! { <p class="empty">"No numbers connected yet."</p> }
                >
                    <ul class="number-list">
                        <For
                            each=move || numbers.get().items
                            key=|n| n.id
                            children=move |n: WhatsAppNumber| {
                                let id = n.id;
                                let phone = n.phone_number.clone();
                                view! {
                                    <li class="number-row">
                                        <span class="number-row__phone">{format_phone(&n.phone_number)}</span>
                                        <span class="number-row__status">{status_label(n.status)}</span>
                                        <span class="number-row__stats">
                                            {format!("{} received / {} sent", n.messages_received, n.messages_sent)}
                                        </span>
                                        <button class="btn btn--small" on:click=move |_| send_test(phone.clone())>
                                            "Send test"
                                        </button>
                                        <button class="btn btn--small btn--danger" on:click=move |_| disconnect(id)>
                                            "Disconnect"
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </div>
    }
}
