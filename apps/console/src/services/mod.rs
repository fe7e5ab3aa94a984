pub mod charts;
pub mod chat;
pub mod dashboard;
pub mod filters;
pub mod kpi;
pub mod location;
pub mod map;
pub mod modal;
pub mod sidebar;

/// Short, synchronous access to state that an async flow revisits across awaits.
pub trait StateCell<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T> StateCell<T> for &mut T {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut **self)
    }
}
