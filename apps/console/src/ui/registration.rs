use dioxus::prelude::*;

use crate::hooks::location::{use_location_cascade, use_states};
use crate::services::location::{CascadeProfile, SelectorStatus};
use crate::API_CLIENT;

const LANGUAGES: [&str; 5] = ["English", "Hausa", "Igbo", "Yoruba", "Pidgin"];

/// Patient registration; submitted as a regular form post.
#[component]
pub fn RegisterPatient() -> Element {
    let states = use_states();
    let lga_cascade = use_location_cascade(CascadeProfile::Registration);

    let state_options = states.read().clone().unwrap_or_default();
    let lga = lga_cascade.selector.read().clone();
    let action = API_CLIENT
        .get()
        .map(|client| client.form_action("register-patient"))
        .unwrap_or_else(|| "/register-patient".to_string());

    rsx! {
        section { class: "space-y-4",
            header { class: "flex flex-col gap-1",
                h1 { class: "text-xl font-semibold text-slate-900", "Register a patient" }
                p { class: "text-xs text-slate-500", "Reminders are sent in the patient's preferred language." }
            }
            form {
                class: "grid gap-3 rounded-lg border border-slate-200 bg-white p-4 text-xs text-slate-600 shadow-sm md:grid-cols-2",
                action: action,
                method: "post",
                label { class: "space-y-1",
                    span { class: "block font-medium", "Full name" }
                    input { name: "full_name", required: true, class: "w-full rounded border border-slate-300 p-2" }
                }
                label { class: "space-y-1",
                    span { class: "block font-medium", "Phone number" }
                    input { name: "phone_number", r#type: "tel", required: true, class: "w-full rounded border border-slate-300 p-2" }
                }
                label { class: "space-y-1",
                    span { class: "block font-medium", "State" }
                    select {
                        id: "state",
                        name: "state_id",
                        required: true,
                        class: "w-full rounded border border-slate-300 bg-white p-2",
                        onchange: move |evt| lga_cascade.parent_changed(evt.value()),
                        option { value: "", "-- Select a State --" }
                        for state in state_options {
                            option { key: "{state.id}", value: "{state.id}", "{state.name}" }
                        }
                    }
                }
                label { class: "space-y-1",
                    span { class: "block font-medium", "LGA" }
                    select {
                        id: "lga",
                        name: "lga_id",
                        required: true,
                        disabled: lga.is_disabled(),
                        class: "w-full rounded border border-slate-300 bg-white p-2",
                        for choice in lga.options().iter().cloned() {
                            option { key: "{choice.value}-{choice.label}", value: "{choice.value}", "{choice.label}" }
                        }
                    }
                    if lga.status() == SelectorStatus::Loading {
                        span { class: "text-[11px] text-slate-400", "Fetching LGAs..." }
                    }
                }
                label { class: "space-y-1 md:col-span-2",
                    span { class: "block font-medium", "Spoken languages" }
                    select {
                        id: "spoken_languages",
                        name: "spoken_languages",
                        multiple: true,
                        class: "w-full rounded border border-slate-300 bg-white p-2",
                        for language in LANGUAGES {
                            option { key: "{language}", value: "{language}", "{language}" }
                        }
                    }
                }
                div { class: "md:col-span-2",
                    button {
                        class: "rounded bg-slate-900 px-3 py-1.5 text-xs font-semibold text-white hover:bg-slate-800",
                        r#type: "submit",
                        "Register"
                    }
                }
            }
        }
    }
}
