use std::rc::Rc;

use dioxus::prelude::*;

use crate::interop::dom::{self, ResizeListener};
use crate::services::sidebar::SidebarState;

pub fn use_sidebar() -> Signal<SidebarState> {
    let mut sidebar = use_signal(|| {
        dom::viewport_width()
            .map(SidebarState::new)
            .unwrap_or_default()
    });

    use_hook(move || {
        Rc::new(ResizeListener::attach(move |width| {
            sidebar.write().resized(width);
        }))
    });

    sidebar
}
