//! Bindings to the page's JS libraries and DOM.

pub mod chartjs;
pub mod dom;
pub mod leaflet;

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use crate::services::charts::RenderError;

/// Hands a serde value to JS as a plain object.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, RenderError> {
    let text = serde_json::to_string(value).map_err(|err| RenderError::Interop(err.to_string()))?;
    js_sys::JSON::parse(&text).map_err(|err| RenderError::Interop(describe(&err)))
}

pub(crate) fn call_method(target: &JsValue, name: &str, args: &[&JsValue]) -> Result<JsValue, RenderError> {
    let function = js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        .ok_or_else(|| RenderError::Interop(format!("missing method {name}")))?;

    let arguments = js_sys::Array::new();
    for arg in args {
        arguments.push(arg);
    }
    function
        .apply(target, &arguments)
        .map_err(|err| RenderError::Interop(describe(&err)))
}

pub(crate) fn global_defined(name: &str) -> bool {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}

pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
