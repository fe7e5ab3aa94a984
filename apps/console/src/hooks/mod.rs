use dioxus::prelude::*;

use crate::services::StateCell;

pub mod chat;
pub mod dashboard;
pub mod kpi;
pub mod location;
pub mod queue;
pub mod sidebar;

impl<T: 'static> StateCell<T> for Signal<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.write();
        f(&mut *guard)
    }
}
