//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::push_client::PushSender;
use crate::pages::board::BoardPage;
use crate::state::{connection::ConnectionState, notifications::NotificationFeed, ui::UiState};
use crate::util::bootstrap::{BOOTSTRAP_ELEMENT_ID, PageBootstrap};

/// HTML shell rendered on the server for SSR + hydration.
///
/// `bootstrap` is embedded as JSON so the hydrating client starts from the
/// same role and cards.
pub fn shell(options: LeptosOptions, bootstrap: PageBootstrap) -> impl IntoView {
    let script = bootstrap.to_script_json();
    provide_context(bootstrap);
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
                <script id=BOOTSTRAP_ELEMENT_ID type="application/json" inner_html=script></script>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts, starts the push client in the
/// browser, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let bootstrap = use_context::<PageBootstrap>().unwrap_or_else(crate::util::bootstrap::read);

    let connection = RwSignal::new(ConnectionState::default());
    let feed = RwSignal::new(NotificationFeed::default());
    let kanban = RwSignal::new(bootstrap.kanban_state());
    let ui = RwSignal::new(UiState::default());
    let push = RwSignal::new(PushSender::default());

    provide_context(connection);
    provide_context(feed);
    provide_context(kanban);
    provide_context(ui);
    provide_context(push);

    #[cfg(feature = "hydrate")]
    {
        use crate::net::push_client::{HandlerRegistry, spawn_push_client};

        let mut registry = HandlerRegistry::default();
        crate::net::notifications::register(&mut registry, feed);
        crate::net::kanban::register(&mut registry, kanban, ui);
        push.set(spawn_push_client(bootstrap.reconnect_policy(), registry, connection));

        leptos::task::spawn_local(crate::net::notifications::load_unread(feed));
        leptos::task::spawn_local(crate::util::browser::request_notification_permission());

        // The hydrated root owner is never disposed, so teardown hangs off
        // page exit instead of `on_cleanup`.
        let _ = window_event_listener(leptos::ev::pagehide, move |_| push.get_untracked().close());
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/approval-board.css"/>
        <Title text="Applications"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=BoardPage/>
                <Route path=(StaticSegment("applications"), StaticSegment("kanban")) view=BoardPage/>
            </Routes>
        </Router>
    }
}
