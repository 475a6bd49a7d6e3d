use crate::config::ClientConfig;
use crate::session::Session;
use crate::views::ChatView;
use dioxus::prelude::*;

const CHAT_CSS: Asset = asset!("/assets/chat.css");

#[component]
pub fn App() -> Element {
    let session = use_hook(|| {
        let config = ClientConfig::from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid configuration, falling back to defaults");
            ClientConfig::default()
        });
        Session::connect(&config)
    });
    use_context_provider(|| session);

    rsx! {
        document::Link { rel: "stylesheet", href: CHAT_CSS }
        div { class: "page",
            ChatView {}
        }
    }
}
