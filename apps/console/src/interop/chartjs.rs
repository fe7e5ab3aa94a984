use std::sync::Once;

use serde_json::Value;
use tracing::warn;
use wasm_bindgen::prelude::*;

use super::{describe, global_defined, to_js};
use crate::services::charts::{ChartBackend, RenderError};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    pub type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(item: &web_sys::Element, config: &JsValue) -> Result<ChartJs, JsValue>;

    #[wasm_bindgen(method, js_class = "Chart")]
    fn destroy(this: &ChartJs);
}

/// Chart.js on page canvases.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChartJsBackend;

impl ChartBackend for ChartJsBackend {
    type Handle = ChartJs;

    fn create(&mut self, canvas_id: &str, config: &Value) -> Result<ChartJs, RenderError> {
        if !global_defined("Chart") {
            return Err(RenderError::LibraryUnavailable("Chart".into()));
        }
        apply_defaults();

        let canvas = super::dom::element_by_id(canvas_id)
            .ok_or_else(|| RenderError::MissingContainer(canvas_id.to_string()))?;
        let config = to_js(config)?;
        ChartJs::new(&canvas, &config).map_err(|err| RenderError::Interop(describe(&err)))
    }

    fn destroy(&mut self, handle: ChartJs) {
        handle.destroy();
    }
}

fn apply_defaults() {
    static DEFAULTS: Once = Once::new();
    DEFAULTS.call_once(|| {
        let result = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))
            .and_then(|chart| js_sys::Reflect::get(&chart, &JsValue::from_str("defaults")))
            .and_then(|defaults| {
                js_sys::Reflect::set(&defaults, &"color".into(), &"#212121".into())?;
                js_sys::Reflect::set(&defaults, &"borderColor".into(), &"#E0E0E0".into())
            });
        if let Err(err) = result {
            warn!("could not set chart defaults: {}", describe(&err));
        }
    });
}
