use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::hooks::sidebar::use_sidebar;
use crate::ui::notifications::NotificationCenter;
use crate::Route;

fn nav_links() -> [(&'static str, Route); 5] {
    [
        ("Home", Route::Home {}),
        ("Dashboard", Route::Dashboard {}),
        ("Register Patient", Route::RegisterPatient {}),
        ("Volunteer Queue", Route::VolunteerQueue {}),
        ("Health Chatbot", Route::Chatbot {}),
    ]
}

#[component]
pub fn Layout() -> Element {
    let mut sidebar = use_sidebar();
    let state = *sidebar.read();

    let sidebar_class = if state.is_open() {
        "sidebar active fixed inset-y-0 left-0 z-30 w-64 translate-x-0 bg-slate-900 text-white transition md:static"
    } else {
        "sidebar fixed inset-y-0 left-0 z-30 w-64 -translate-x-full bg-slate-900 text-white transition md:static md:translate-x-0"
    };

    rsx! {
        div { class: "flex min-h-screen bg-slate-50",
            nav { id: "sidebar", class: sidebar_class,
                onclick: move |evt| evt.stop_propagation(),
                div { class: "px-4 py-5 text-lg font-semibold", "SafeMama Pikin" }
                ul { class: "space-y-1 px-2",
                    for (label, target) in nav_links() {
                        li { key: "{label}",
                            Link {
                                class: "block rounded px-3 py-2 text-sm hover:bg-slate-800",
                                to: target,
                                onclick: move |_| sidebar.write().nav_link_clicked(),
                                "{label}"
                            }
                        }
                    }
                }
            }
            if state.is_open() && state.is_mobile() {
                div {
                    class: "fixed inset-0 z-20 bg-black/30 md:hidden",
                    onclick: move |_| sidebar.write().click_outside(),
                }
            }
            div { class: "flex-1 space-y-4 p-4",
                header { class: "flex items-center gap-3",
                    button {
                        id: "menu-toggle",
                        class: "rounded border border-slate-300 px-3 py-1.5 text-sm text-slate-700 hover:bg-slate-100",
                        r#type: "button",
                        onclick: move |evt| {
                            evt.stop_propagation();
                            sidebar.write().toggle();
                        },
                        "☰"
                    }
                }
                main { class: "space-y-4", Outlet::<Route> {} }
            }
            NotificationCenter {}
        }
    }
}
