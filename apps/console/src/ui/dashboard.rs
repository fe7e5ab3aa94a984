use dioxus::prelude::*;

use crate::hooks::dashboard::use_dashboard;
use crate::hooks::location::{use_location_cascade, use_states};
use crate::services::dashboard::{
    SlotId, BAR_CANVAS, HISTOGRAM_CANVAS, LINE_CANVAS, MAP_CONTAINER, PIE_CANVAS,
};
use crate::services::filters::{FilterField, FilterState};
use crate::services::location::{CascadeProfile, SelectorStatus, ALL_SENTINEL};
use crate::API_CLIENT;

const SERVICE_TYPES: [(&str, &str); 4] = [
    ("", "All services"),
    ("antenatal", "Antenatal"),
    ("vaccination", "Vaccination"),
    ("general", "General"),
];

const STATUSES: [(&str, &str); 6] = [
    ("", "All statuses"),
    ("confirmed", "Confirmed"),
    ("rescheduled", "Rescheduled"),
    ("unreachable", "Unreachable"),
    ("human_escalation", "Human escalation"),
    ("completed", "Completed"),
];

#[component]
pub fn Dashboard() -> Element {
    let mut filter = use_signal(FilterState::default);
    let handle = use_dashboard(filter);
    let states = use_states();
    let lga_cascade = use_location_cascade(CascadeProfile::AdminFilter);

    let loading = *handle.loading.read();
    let failed = handle
        .last_report
        .read()
        .as_ref()
        .map(|report| report.failed.clone())
        .unwrap_or_default();
    let state_options = states.read().clone().unwrap_or_default();
    let lga = lga_cascade.selector.read().clone();
    let report_action = API_CLIENT
        .get()
        .map(|client| client.form_action("download-report"))
        .unwrap_or_else(|| "/download-report".to_string());

    let mut set_field = move |field: FilterField, value: String| {
        filter.write().set(field, value);
    };

    rsx! {
        section { class: "space-y-4",
            header { class: "flex flex-wrap items-end justify-between gap-2",
                div {
                    h1 { class: "text-xl font-semibold text-slate-900", "Outreach dashboard" }
                    p { class: "text-xs text-slate-500",
                        if loading { "Refreshing..." } else { "Call outcomes, service volume and coverage." }
                    }
                }
                form { action: report_action, method: "post",
                    button {
                        class: "rounded bg-slate-900 px-3 py-1.5 text-xs font-semibold text-white hover:bg-slate-800",
                        r#type: "submit",
                        "Download report"
                    }
                }
            }

            div { class: "grid gap-2 rounded-lg border border-slate-200 bg-white p-4 text-xs text-slate-600 shadow-sm md:grid-cols-6",
                label { class: "space-y-1",
                    span { class: "block font-medium", "From" }
                    input {
                        id: "date-start",
                        r#type: "date",
                        class: "w-full rounded border border-slate-300 p-2",
                        value: "{filter.read().start_date}",
                        onchange: move |evt| set_field(FilterField::StartDate, evt.value()),
                    }
                }
                label { class: "space-y-1",
                    span { class: "block font-medium", "To" }
                    input {
                        id: "date-end",
                        r#type: "date",
                        class: "w-full rounded border border-slate-300 p-2",
                        value: "{filter.read().end_date}",
                        onchange: move |evt| set_field(FilterField::EndDate, evt.value()),
                    }
                }
                label { class: "space-y-1",
                    span { class: "block font-medium", "Service" }
                    select {
                        id: "service-type-filter",
                        class: "w-full rounded border border-slate-300 bg-white p-2",
                        onchange: move |evt| set_field(FilterField::ServiceType, evt.value()),
                        for (value, label) in SERVICE_TYPES {
                            option { key: "{value}", value: value, "{label}" }
                        }
                    }
                }
                label { class: "space-y-1",
                    span { class: "block font-medium", "Status" }
                    select {
                        id: "status-filter",
                        class: "w-full rounded border border-slate-300 bg-white p-2",
                        onchange: move |evt| set_field(FilterField::Status, evt.value()),
                        for (value, label) in STATUSES {
                            option { key: "{value}", value: value, "{label}" }
                        }
                    }
                }
                label { class: "space-y-1",
                    span { class: "block font-medium", "State" }
                    select {
                        id: "state-filter",
                        class: "w-full rounded border border-slate-300 bg-white p-2",
                        onchange: move |evt| {
                            let value = evt.value();
                            set_field(FilterField::State, value.clone());
                            lga_cascade.parent_changed(value);
                        },
                        option { value: ALL_SENTINEL, "All States" }
                        for state in state_options {
                            option { key: "{state.id}", value: "{state.id}", "{state.name}" }
                        }
                    }
                }
                label { class: "space-y-1",
                    span { class: "block font-medium", "LGA" }
                    select {
                        id: "lga-filter-supa",
                        class: "w-full rounded border border-slate-300 bg-white p-2",
                        disabled: lga.is_disabled(),
                        onchange: move |evt| set_field(FilterField::Lga, evt.value()),
                        for choice in lga.options().iter().cloned() {
                            option { key: "{choice.value}-{choice.label}", value: "{choice.value}", "{choice.label}" }
                        }
                    }
                    if lga.status() == SelectorStatus::Failed {
                        span { class: "text-[11px] text-red-500", "Could not load LGAs for this state." }
                    }
                }
            }

            div { class: "grid gap-4 md:grid-cols-2",
                ChartCard { title: "Calls by agent", canvas_id: BAR_CANVAS, failed: failed.contains(&SlotId::Bar) }
                ChartCard { title: "Call outcomes", canvas_id: PIE_CANVAS, failed: failed.contains(&SlotId::Pie) }
                ChartCard { title: "Call volume", canvas_id: LINE_CANVAS, failed: failed.contains(&SlotId::Line) }
                ChartCard { title: "Services delivered", canvas_id: HISTOGRAM_CANVAS, failed: failed.contains(&SlotId::Histogram) }
            }

            div { class: "rounded-lg border border-slate-200 bg-white p-4 shadow-sm space-y-2",
                h2 { class: "text-sm font-semibold text-slate-800", "Patients by state" }
                div { id: MAP_CONTAINER, class: "h-96 w-full rounded" }
                if failed.contains(&SlotId::Map) {
                    p { class: "text-xs text-red-500", "Map could not be drawn." }
                }
            }
        }
    }
}

#[component]
fn ChartCard(title: &'static str, canvas_id: &'static str, failed: bool) -> Element {
    rsx! {
        div { class: "rounded-lg border border-slate-200 bg-white p-4 shadow-sm space-y-2",
            h2 { class: "text-sm font-semibold text-slate-800", "{title}" }
            div { class: "relative h-64",
                canvas { id: canvas_id }
            }
            if failed {
                p { class: "text-xs text-red-500", "Chart could not be drawn." }
            }
        }
    }
}
