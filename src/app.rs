//! Root application component with the session context provider.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::chat_panel::ChatPanel;
use crate::net::api::{CHAT_PATH, CONFIG_PATH, HEALTH_PATH};
use crate::state::session::ChatSession;
use crate::util::base_path::api_url;

/// Root application component.
///
/// Builds the page's single `ChatSession`, provides it to child components,
/// and fires the one-shot configuration probe.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    #[cfg(feature = "csr")]
    let api_base = crate::util::base_path::detect_base_path();
    #[cfg(not(feature = "csr"))]
    let api_base = String::new();

    leptos::logging::log!(
        "API endpoints: config={} chat={} health={}",
        api_url(&api_base, CONFIG_PATH),
        api_url(&api_base, CHAT_PATH),
        api_url(&api_base, HEALTH_PATH)
    );

    let session = RwSignal::new(ChatSession::new(api_base.clone()));
    provide_context(session);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_config_status(&api_base).await;
        if let Err(e) = &result {
            leptos::logging::warn!("config check failed: {e}");
        }
        session.update(|s| s.apply_config_status(result));
    });

    view! {
        <Title text="Agent Chat"/>
        <ChatPanel/>
    }
}
