use dioxus::prelude::*;

use crate::state::{http_status_advice, use_app_actions, use_app_state};

#[derive(Props, Clone)]
#[props(no_eq)]
pub struct ToastProps {
    pub title: String,
    pub message: String,
    #[props(optional)]
    pub advice: Option<String>,
    #[props(optional)]
    pub on_close: Option<EventHandler<MouseEvent>>,
}

impl PartialEq for ToastProps {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

#[component]
pub fn Toast(props: ToastProps) -> Element {
    rsx! {
        div { class: "pointer-events-auto rounded-lg border-l-4 border-red-500 bg-red-50 p-4 shadow-lg",
            div { class: "flex items-start justify-between gap-4",
                div { class: "space-y-1",
                    h3 { class: "text-sm font-semibold text-red-700", "{props.title}" }
                    p { class: "text-xs text-slate-700 break-words", "{props.message}" }
                    if let Some(ref advice) = props.advice {
                        p { class: "text-[11px] text-slate-500", "{advice}" }
                    }
                }
                if let Some(handler) = props.on_close.as_ref() {
                    button {
                        class: "rounded bg-slate-200 px-2 py-1 text-[11px] text-slate-600 transition hover:bg-slate-300",
                        onclick: handler.clone(),
                        "Dismiss"
                    }
                }
            }
        }
    }
}

/// Shows the last failed request, if any.
#[component]
pub fn NotificationCenter() -> Element {
    let actions = use_app_actions();
    let operation = use_app_state().read().operation.clone();

    let Some(error) = operation.error else {
        return rsx! { Fragment {} };
    };
    let title = operation
        .context
        .unwrap_or_else(|| "Request failed".to_string());
    let advice = operation
        .last_status
        .map(|status| http_status_advice(status).to_string());

    rsx! {
        div { class: "pointer-events-none fixed right-4 top-4 z-50 flex w-80 flex-col gap-3",
            Toast {
                title,
                message: error,
                advice,
                on_close: move |_| actions.clear_operation(),
            }
        }
    }
}
