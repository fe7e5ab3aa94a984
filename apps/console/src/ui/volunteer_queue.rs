use dioxus::prelude::*;

use crate::hooks::queue::use_volunteer_queue;
use crate::models::EscalatedCase;
use crate::services::modal::{ModalClick, ModalController};
use crate::API_CLIENT;

#[component]
pub fn VolunteerQueue() -> Element {
    let queue = use_volunteer_queue();
    let mut modal = use_signal(ModalController::default);

    let controller = modal.read().clone();
    let action = controller.form_action().map(|path| {
        API_CLIENT
            .get()
            .map(|client| client.form_action(&path))
            .unwrap_or(path)
    });

    let body = match queue.read().clone() {
        None => rsx! { p { class: "text-xs text-slate-500", "Loading cases..." } },
        Some(cases) if cases.is_empty() => rsx! {
            p { class: "text-xs text-slate-500 italic", "No cases need attention." }
        },
        Some(cases) => rsx! {
            CaseTable { cases, on_complete: move |id: String| modal.write().open(id) }
        },
    };

    rsx! {
        section { class: "space-y-4",
            header { class: "flex flex-col gap-1",
                h1 { class: "text-xl font-semibold text-slate-900", "Volunteer queue" }
                p { class: "text-xs text-slate-500", "Cases the automated caller could not resolve." }
            }
            {body}
            if controller.is_visible() {
                div {
                    id: "notesModal",
                    class: "fixed inset-0 z-40 flex items-center justify-center bg-black/40",
                    onclick: move |_| {
                        modal.write().handle_click(ModalClick::Backdrop);
                    },
                    div {
                        class: "w-full max-w-md space-y-3 rounded-lg bg-white p-4 shadow-lg",
                        onclick: move |evt| {
                            evt.stop_propagation();
                            modal.write().handle_click(ModalClick::Content);
                        },
                        div { class: "flex items-center justify-between",
                            h2 { class: "text-sm font-semibold text-slate-800", "Complete case" }
                            button {
                                class: "close-btn rounded bg-slate-200 px-2 py-1 text-[11px] text-slate-600 hover:bg-slate-300",
                                r#type: "button",
                                onclick: move |evt| {
                                    evt.stop_propagation();
                                    modal.write().handle_click(ModalClick::CloseButton);
                                },
                                "Close"
                            }
                        }
                        if let Some(action) = action {
                            form { id: "completeCaseForm", action: action, method: "post", class: "space-y-2",
                                textarea {
                                    name: "notes",
                                    class: "h-28 w-full rounded border border-slate-300 p-2 text-xs",
                                    placeholder: "Call notes",
                                }
                                button {
                                    class: "rounded bg-slate-900 px-3 py-1.5 text-xs font-semibold text-white hover:bg-slate-800",
                                    r#type: "submit",
                                    "Mark as completed"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CaseTable(cases: Vec<EscalatedCase>, on_complete: EventHandler<String>) -> Element {
    rsx! {
        table { class: "w-full overflow-hidden rounded-lg border border-slate-200 bg-white text-xs shadow-sm",
            thead { class: "bg-slate-100 text-left text-slate-600",
                tr {
                    th { class: "p-2", "Patient" }
                    th { class: "p-2", "Phone" }
                    th { class: "p-2", "Service" }
                    th { class: "p-2", "Status" }
                    th { class: "p-2", "" }
                }
            }
            tbody {
                for case in cases {
                    tr { key: "{case.appointment_id}", class: "border-t border-slate-100",
                        td { class: "p-2 font-medium text-slate-800", "{case.patients.full_name}" }
                        td { class: "p-2", {case.patients.phone_number.clone().unwrap_or_default()} }
                        td { class: "p-2", {case.service_type.clone().unwrap_or_default()} }
                        td { class: "p-2", {case.status_label()} }
                        td { class: "p-2 text-right",
                            button {
                                class: "rounded bg-teal-600 px-2 py-1 text-white hover:bg-teal-700",
                                r#type: "button",
                                onclick: {
                                    let id = case.appointment_id.clone();
                                    move |_| on_complete.call(id.clone())
                                },
                                "Complete"
                            }
                        }
                    }
                }
            }
        }
    }
}
