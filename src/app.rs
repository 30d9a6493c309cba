//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the one `Session` for the browser tab and bridges it into the
//! reactive tree:
//! - store subscribers mirror every change into `RwSignal<AuthState>`, which
//!   guards and chrome read;
//! - session navigation requests land in [`NavRequest`] and are replayed
//!   through the router by `NavigationBridge`;
//! - the startup identity check runs once after hydration.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::{NavigateOptions, StaticSegment};

use crate::components::main_layout::MainLayout;
use crate::components::notice_host::{NoticeHost, Notices};
use crate::components::route_guard::{ProtectedRoute, PublicRoute};
use crate::config::ApiConfig;
use crate::net::http::ApiClient;
use crate::net::transport::BrowserTransport;
use crate::pages::{
    dashboard::DashboardPage, gallery::GalleryPage, login::LoginPage, not_found::NotFoundPage,
    onboarding::OnboardingPage, plans::PlansPage, settings::SettingsPage, signup::SignupPage,
    templates::TemplatesPage, whatsapp::WhatsAppPage,
};
use crate::state::session::Session;
use crate::util::storage::LocalTokenStore;

pub type AppSession = Session<BrowserTransport>;

/// Copyable context handle to the tab's session.
///
/// The session is `Rc`-based, so it lives in local arena storage and view
/// closures capture this handle instead.
#[derive(Clone, Copy)]
pub struct SessionHandle(StoredValue<AppSession, LocalStorage>);

impl SessionHandle {
    pub fn session(self) -> AppSession {
        self.0.get_value()
    }

    pub fn client(self) -> ApiClient<BrowserTransport> {
        self.0.with_value(|s| s.client().clone())
    }
}

pub fn use_session() -> SessionHandle {
    expect_context::<SessionHandle>()
}

/// Path the session asked the router to visit, if not yet followed.
#[derive(Clone, Copy)]
pub struct NavRequest(pub RwSignal<Option<String>>);

impl NavRequest {
    /// Ask the router to visit `path`; usable from spawned tasks.
    pub fn go(self, path: &str) {
        self.0.set(Some(path.to_owned()));
    }
}

pub fn use_nav_request() -> NavRequest {
    expect_context::<NavRequest>()
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let pending_nav = RwSignal::new(None::<String>);
    let session = AppSession::new(
        ApiConfig::from_env(),
        BrowserTransport,
        std::rc::Rc::new(LocalTokenStore),
        std::rc::Rc::new(move |path: &str| pending_nav.set(Some(path.to_owned()))),
    );

    let auth = RwSignal::new(session.state());
    session.store().subscribe(move |state| auth.set(state.clone()));

    #[cfg(feature = "hydrate")]
    {
        let session = session.clone();
        leptos::task::spawn_local(async move { session.restore().await });
    }

    provide_context(auth);
    provide_context(SessionHandle(StoredValue::new_local(session)));
    provide_context(NavRequest(pending_nav));
    provide_context(Notices::new());

    view! {
        <Title text="NexusArt"/>

        <Router>
            <NavigationBridge/>
            <NoticeHost/>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=public(LoginPage)/>
                <Route path=StaticSegment("login") view=public(LoginPage)/>
                <Route path=StaticSegment("signup") view=public(SignupPage)/>
                <Route path=StaticSegment("onboarding") view=onboarding/>
                <Route path=StaticSegment("dashboard") view=protected(DashboardPage)/>
                <Route path=StaticSegment("gallery") view=protected(GalleryPage)/>
                <Route path=StaticSegment("templates") view=protected(TemplatesPage)/>
                <Route path=StaticSegment("whatsapp") view=protected(WhatsAppPage)/>
                <Route path=StaticSegment("settings") view=protected(SettingsPage)/>
                <Route path=StaticSegment("plans") view=protected(PlansPage)/>
            </Routes>
        </Router>
    }
}

fn public<V: IntoView + 'static>(
    page: fn() -> V,
) -> impl Fn() -> AnyView + Clone + Send + Sync + 'static {
    move || view! { <PublicRoute>{page()}</PublicRoute> }.into_any()
}

fn protected<V: IntoView + 'static>(
    page: fn() -> V,
) -> impl Fn() -> AnyView + Clone + Send + Sync + 'static {
    move || {
        view! {
            <ProtectedRoute>
                <MainLayout>{page()}</MainLayout>
            </ProtectedRoute>
        }
        .into_any()
    }
}

/// Onboarding is protected but renders without the sidebar chrome.
fn onboarding() -> AnyView {
    view! {
        <ProtectedRoute>
            <OnboardingPage/>
        </ProtectedRoute>
    }
    .into_any()
}

/// Follows navigation requests raised by session operations.
#[component]
fn NavigationBridge() -> impl IntoView {
    let NavRequest(pending) = expect_context::<NavRequest>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(path) = pending.get() {
            pending.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });
}
