use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::describe;

pub fn element_by_id(id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

pub fn viewport_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

/// Keeps a window `resize` listener alive until dropped.
pub struct ResizeListener {
    closure: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn attach(mut on_resize: impl FnMut(f64) + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(width) = viewport_width() {
                on_resize(width);
            }
        });

        if let Err(err) =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            tracing::warn!("resize listener not attached: {}", describe(&err));
            return None;
        }
        Some(Self { closure })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window
                .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
        }
    }
}
