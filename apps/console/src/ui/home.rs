use dioxus::prelude::*;

use crate::hooks::kpi::{use_public_kpis, KpiKind};

#[component]
pub fn Home() -> Element {
    let kpis = use_public_kpis();
    let values = kpis.read().values.clone();
    let cards: Vec<(&'static str, &'static str, String)> = KpiKind::ALL
        .into_iter()
        .zip(values)
        .map(|(kind, value)| (kind.element_id(), kind.label(), value))
        .collect();

    rsx! {
        section { class: "space-y-4",
            header { class: "rounded-lg border border-slate-200 bg-white p-6 shadow-sm",
                h1 { class: "text-2xl font-semibold text-slate-900", "Safer pregnancies, healthier children" }
                p { class: "text-sm text-slate-600",
                    "Automated reminders and volunteer follow-up for antenatal and immunisation appointments."
                }
            }
            div { class: "grid gap-4 md:grid-cols-3",
                for (id, label, value) in cards {
                    div {
                        key: "{id}",
                        class: "rounded-lg border border-slate-200 bg-white p-4 text-center shadow-sm",
                        p { id: id, class: "text-3xl font-bold text-teal-600", "{value}" }
                        p { class: "text-xs uppercase tracking-wide text-slate-500", "{label}" }
                    }
                }
            }
        }
    }
}
