//! Plans: catalogue, current subscription, billing history.
//!
//! SYSTEM CONTEXT
//! ==============
//! Subscribing or cancelling goes through `/api/subscriptions`; the card
//! state changes only after the server answered. The identity check is not
//! re-run here, so the header's plan badge catches up on the next load.

#[cfg(test)]
#[path = "plans_test.rs"]
mod plans_test;

use leptos::prelude::*;

use crate::app::use_session;
use crate::components::notice_host::use_notices;
use crate::net::types::{BillingCycle, Invoice, Plan, Subscription, SubscriptionRequest, SubscriptionStatus};
use crate::util::format::{brl, short_date};

pub fn plan_price(plan: &Plan, cycle: BillingCycle) -> f64 {
    match cycle {
        BillingCycle::Monthly => plan.price_monthly,
        BillingCycle::Yearly => plan.price_yearly,
    }
}

/// Discount of paying yearly versus twelve monthly payments, in percent.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn yearly_savings_percent(plan: &Plan) -> u8 {
    let full = plan.price_monthly * 12.0;
    if full <= 0.0 || plan.price_yearly >= full {
        return 0;
    }
    // Within 0..=100 after the checks above.
    ((full - plan.price_yearly) / full * 100.0).round() as u8
}

pub fn is_current_plan(plan: &Plan, subscription: Option<&Subscription>) -> bool {
    subscription.is_some_and(|s| {
        s.plan_type.as_str() == plan.id && !matches!(s.status, SubscriptionStatus::Cancelled | SubscriptionStatus::Expired)
    })
}

pub fn status_label(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Active => "Active",
        SubscriptionStatus::PastDue => "Payment overdue",
        SubscriptionStatus::Cancelled => "Cancelled",
        SubscriptionStatus::Expired => "Expired",
        SubscriptionStatus::Trial => "Trial",
    }
}

pub fn can_cancel(subscription: Option<&Subscription>) -> bool {
    subscription.is_some_and(|s| matches!(s.status, SubscriptionStatus::Active | SubscriptionStatus::PastDue))
}

#[component]
pub fn PlansPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notices();
    let plans = RwSignal::new(Vec::<Plan>::new());
    let current = RwSignal::new(None::<Subscription>);
    let invoices = RwSignal::new(Vec::<Invoice>::new());
    let cycle = RwSignal::new(BillingCycle::Monthly);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let client = session.client();
        leptos::task::spawn_local(async move {
            match client.plans().await {
                Ok(items) => plans.set(items),
                Err(e) => notices.api_error(&e),
            }
            match client.current_subscription().await {
                Ok(sub) => current.set(Some(sub)),
                Err(e) => log::warn!("no current subscription: {e}"),
            }
            match client.invoices().await {
                Ok(items) => invoices.set(items),
                Err(e) => log::warn!("invoices unavailable: {e}"),
            }
        });
    }

    let on_subscribe = move |plan_id: String| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let request = SubscriptionRequest { plan_id, billing_cycle: cycle.get(), payment_method_id: None };

        #[cfg(feature = "hydrate")]
        {
            let client = session.client();
            leptos::task::spawn_local(async move {
                match client.subscribe(&request).await {
                    Ok(sub) => {
                        current.set(Some(sub));
                        notices.success("Subscription updated");
                    }
                    Err(e) => notices.api_error(&e),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let on_cancel = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let client = session.client();
            leptos::task::spawn_local(async move {
                match client.cancel_subscription().await {
                    Ok(()) => {
                        current.update(|c| {
                            if let Some(sub) = c.as_mut() {
                                sub.status = SubscriptionStatus::Cancelled;
                            }
                        });
                        notices.success("Subscription cancelled");
                    }
                    Err(e) => notices.api_error(&e),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (session, notices);
    };

    view! {
        <div class="plans-page">
            <header class="page__header">
                <h1>"Plans"</h1>
                {move || {
                    current
                        .get()
                        .map(|sub| {
                            view! {
                                <p class="page__subtitle">
                                    {format!("{} plan, {}", sub.plan_type.label(), status_label(sub.status))}
                                    {sub.current_period_end.map(|end| format!(" until {}", short_date(&end)))}
                                </p>
                            }
                        })
                }}
            </header>

            <div class="toolbar">
                <button
                    class=move || if cycle.get() == BillingCycle::Monthly { "btn btn--active" } else { "btn" }
                    on:click=move |_| cycle.set(BillingCycle::Monthly)
                >
                    "Monthly"
                </button>
                <button
                    class=move || if cycle.get() == BillingCycle::Yearly { "btn btn--active" } else { "btn" }
                    on:click=move |_| cycle.set(BillingCycle::Yearly)
                >
                    "Yearly"
                </button>
                <Show when=move || can_cancel(current.get().as_ref())>
                    <button class="btn btn--danger" on:click=on_cancel disabled=move || busy.get()>
                        "Cancel subscription"
                    </button>
                </Show>
            </div>

            <div class="plan-grid">
                <For
                    each=move || plans.get()
                    key=|p| p.id.clone()
                    children=move |plan: Plan| {
                        let plan_for_price = plan.clone();
                        let plan_for_state = plan.clone();
                        let plan_id = plan.id.clone();
                        let savings = yearly_savings_percent(&plan);
                        view! {
                            <article class="plan-card">
                                <h3>{plan.name}</h3>
                                <p class="plan-card__description">{plan.description}</p>
                                <p class="plan-card__price">
                                    {move || brl(plan_price(&plan_for_price, cycle.get()))}
                                    {move || if cycle.get() == BillingCycle::Monthly { " / month" } else { " / year" }}
                                </p>
                                {(savings > 0).then(|| view! { <span class="badge">{format!("Save {savings}% yearly")}</span> })}
                                <ul class="plan-card__features">
                                    {plan.features.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
                                </ul>
                                <Show
                                    when=move || is_current_plan(&plan_for_state, current.get().as_ref())
                                    fallback=move || {
                                        let plan_id = plan_id.clone();
                                        view! {
                                            <button
                                                class="btn btn--primary"
                                                disabled=move || busy.get()
                                                on:click=move |_| on_subscribe(plan_id.clone())
                                            >
                                                "Choose plan"
                                            </button>
                                        }
                                    }
                                >
                                    <span class="badge badge--current">"Current plan"</span>
                                </Show>
                            </article>
                        }
                    }
                />
            </div>

            <section class="invoices">
                <h2>"Billing history"</h2>
                <Show
                    when=move || !invoices.with(Vec::is_empty)
                    fallback=move || view! { <p class="empty">"No invoices yet."</p> }
                >
                    <table class="invoice-table">
                        <tbody>
                            {move || {
                                invoices
                                    .get()
                                    .into_iter()
                                    .map(|inv| {
                                        view! {
                                            <tr>
                                                <td>{short_date(&inv.created_at)}</td>
                                                <td>{brl(inv.amount)}</td>
                                                <td>{inv.status}</td>
                                                <td>
                                                    {inv.invoice_url.map(|href| view! { <a href=href target="_blank">"View"</a> })}
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </section>
        </div>
    }
}
