use crate::backend::{ACCEPTED_EXTENSIONS, UploadFile};
use crate::session::Session;
use crate::types::{ChatMessage, Role};
use dioxus::events::Key;
use dioxus::prelude::*;
use std::path::Path;

const CHAT_TITLE: &str = "Job Application Helper";
const SCROLL_TO_END: &str =
    "document.getElementById('chat-end')?.scrollIntoView({ behavior: 'smooth' });";

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn accept_attribute() -> String {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// File engines on desktop report full paths; the backend only wants the name.
fn display_name(picked: &str) -> String {
    Path::new(picked)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(picked)
        .to_string()
}

#[component]
pub fn ChatView() -> Element {
    let session = use_context::<Session>();
    let revision = use_signal(|| 0u64);
    let backend_up = use_signal(|| Option::<bool>::None);

    // Mirror store changes into a signal so the view re-renders.
    {
        let store = session.store().clone();
        use_future(move || {
            let mut changes = store.subscribe();
            let mut revision = revision;
            async move {
                while changes.changed().await.is_ok() {
                    let current = *changes.borrow_and_update();
                    revision.set(current);
                }
            }
        });
    }

    {
        let session = session.clone();
        use_future(move || {
            let session = session.clone();
            let mut backend_up = backend_up;
            async move {
                backend_up.set(Some(session.backend_reachable().await));
            }
        });
    }

    use_effect(move || {
        let _ = revision();
        document::eval(SCROLL_TO_END);
    });

    let _ = revision();
    let store = session.store();
    let messages: Vec<ChatMessage> = store.snapshot();
    let sending = store.is_sending();
    let status = store.status_text();
    let input = store.pending_input();

    let send = {
        let controller = session.controller().clone();
        move || {
            let controller = controller.clone();
            spawn(async move {
                controller.submit().await;
            });
        }
    };
    let send_on_enter = send.clone();
    let send_on_click = send;

    let controller = session.controller().clone();
    let uploads = session.uploads().clone();

    rsx! {
        div {
            div { class: "chatbox",
                div { class: "chat-header",
                    "{CHAT_TITLE}"
                    if backend_up() == Some(false) {
                        span { class: "backend-offline", title: "Backend unreachable", " (offline)" }
                    }
                }

                div { class: "chat-messages",
                    for (i, msg) in messages.iter().enumerate() {
                        div { key: "{i}", class: format_args!("msg {}", role_class(msg.role)),
                            "{msg.content}"
                        }
                    }
                    if sending {
                        div { class: "msg assistant",
                            span { class: "typing-dots", aria_label: "Generating",
                                span { "." }
                                span { "." }
                                span { "." }
                            }
                        }
                    }
                    div { id: "chat-end" }
                }

                div { class: "chat-input",
                    label { class: "upload-btn", r#for: "fileInput", title: "Choose file", "+" }
                    input {
                        id: "fileInput",
                        r#type: "file",
                        accept: accept_attribute(),
                        style: "display:none",
                        onchange: move |evt: FormEvent| {
                            let uploads = uploads.clone();
                            async move {
                                let Some(engine) = evt.files() else {
                                    return;
                                };
                                let Some(picked) = engine.files().into_iter().next() else {
                                    return;
                                };
                                match engine.read_file(&picked).await {
                                    Some(bytes) => {
                                        uploads
                                            .upload_file(UploadFile::new(display_name(&picked), bytes))
                                            .await;
                                    }
                                    None => tracing::warn!(file = %picked, "could not read picked file"),
                                }
                            }
                        },
                    }
                    input {
                        r#type: "text",
                        placeholder: "Type a message...",
                        value: "{input}",
                        oninput: move |ev| controller.set_input(ev.value()),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter {
                                ev.prevent_default();
                                send_on_enter();
                            }
                        },
                    }
                    button {
                        r#type: "button",
                        disabled: sending,
                        onclick: move |_| send_on_click(),
                        "Send"
                    }
                }
            }

            if !status.is_empty() {
                div { class: "below-status", "{status}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_attribute_lists_extensions() {
        assert_eq!(accept_attribute(), ".txt,.pdf");
    }

    #[test]
    fn display_name_strips_directories() {
        assert_eq!(display_name("/home/me/resume.pdf"), "resume.pdf");
        assert_eq!(display_name("notes.txt"), "notes.txt");
    }
}
