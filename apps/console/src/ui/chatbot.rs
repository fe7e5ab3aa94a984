use dioxus::prelude::*;

use crate::hooks::chat::use_chat_session;
use crate::services::chat::{ChatEntry, ChatRole, TYPING};

#[component]
pub fn Chatbot() -> Element {
    let chat = use_chat_session();
    let mut input = chat.input;

    let session = chat.session.read().clone();
    let waiting = session.is_waiting();

    let rows: Vec<Element> = session
        .entries()
        .map(|entry| match entry {
            ChatEntry::Message(message) => {
                let class = match message.role {
                    ChatRole::User => "message user-message self-end rounded-lg bg-teal-600 px-3 py-2 text-white",
                    ChatRole::Bot => "message bot-message self-start rounded-lg bg-slate-100 px-3 py-2 text-slate-800",
                };
                let lines: Vec<String> = message.lines().map(str::to_string).collect();
                let last = lines.len().saturating_sub(1);
                let source = message.source_label();
                rsx! {
                    div { key: "{message.id}", class: class,
                        for (idx, line) in lines.into_iter().enumerate() {
                            span { "{line}" }
                            if idx < last { br {} }
                        }
                        if let Some(source) = source {
                            p { class: "mt-1 text-[11px] italic text-slate-500", "{source}" }
                        }
                    }
                }
            }
            ChatEntry::Typing => rsx! {
                div { key: "typing", class: "message bot-message self-start rounded-lg bg-slate-100 px-3 py-2 text-slate-400", "{TYPING}" }
            },
        })
        .collect();

    rsx! {
        section { class: "mx-auto flex max-w-2xl flex-col gap-3",
            header { class: "flex flex-col gap-1",
                h1 { class: "text-xl font-semibold text-slate-900", "Health assistant" }
                p { class: "text-xs text-slate-500",
                    "Answers are drawn from \"Where There Is No Doctor\". Always consult a health worker."
                }
            }
            div {
                id: "chat-messages",
                class: "flex h-96 flex-col gap-2 overflow-y-auto rounded-lg border border-slate-200 bg-white p-4 text-sm shadow-sm",
                {rows.into_iter()}
            }
            div { class: "flex gap-2",
                input {
                    id: "user-input",
                    class: "flex-1 rounded border border-slate-300 px-3 py-2 text-sm",
                    placeholder: "Ask a health question...",
                    value: "{input}",
                    oninput: move |evt| input.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            evt.prevent_default();
                            chat.submit();
                        }
                    },
                }
                button {
                    id: "send-button",
                    class: "rounded bg-teal-600 px-4 py-2 text-sm font-semibold text-white hover:bg-teal-700 disabled:opacity-50",
                    r#type: "button",
                    disabled: waiting,
                    onclick: move |_| chat.submit(),
                    "Send"
                }
            }
        }
    }
}
