use serde_json::json;
use wasm_bindgen::prelude::*;

use super::{call_method, global_defined, to_js};
use crate::services::charts::RenderError;
use crate::services::map::{MapBackend, MarkerSpec, Viewport};

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L, js_name = map, catch)]
    fn leaflet_map(container_id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn leaflet_tile_layer(url: &str, options: &JsValue) -> JsValue;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn leaflet_marker(lat_lng: &JsValue, options: &JsValue) -> JsValue;

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    fn leaflet_div_icon(options: &JsValue) -> JsValue;
}

/// Leaflet maps over OpenStreetMap tiles.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeafletBackend;

impl MapBackend for LeafletBackend {
    type Handle = JsValue;

    fn create(&mut self, container_id: &str, viewport: &Viewport) -> Result<JsValue, RenderError> {
        if !global_defined("L") {
            return Err(RenderError::LibraryUnavailable("L".into()));
        }
        if super::dom::element_by_id(container_id).is_none() {
            return Err(RenderError::MissingContainer(container_id.to_string()));
        }

        let map = leaflet_map(container_id).map_err(|err| RenderError::Interop(super::describe(&err)))?;
        let center = to_js(&[viewport.lat, viewport.lng])?;
        call_method(&map, "setView", &[&center, &JsValue::from(viewport.zoom)])?;

        let tiles = leaflet_tile_layer(
            TILE_URL,
            &to_js(&json!({ "attribution": TILE_ATTRIBUTION, "maxZoom": 18 }))?,
        );
        call_method(&tiles, "addTo", &[&map])?;
        Ok(map)
    }

    fn add_marker(&mut self, map: &JsValue, marker: &MarkerSpec) -> Result<(), RenderError> {
        let icon = leaflet_div_icon(&to_js(&marker.icon_options())?);
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"icon".into(), &icon)
            .map_err(|err| RenderError::Interop(super::describe(&err)))?;

        let pin = leaflet_marker(&to_js(&[marker.lat, marker.lng])?, &options);
        call_method(&pin, "bindPopup", &[&JsValue::from_str(&marker.popup())])?;
        call_method(&pin, "addTo", &[map])?;
        Ok(())
    }

    fn destroy(&mut self, map: JsValue) {
        if let Err(err) = call_method(&map, "remove", &[]) {
            tracing::warn!("failed to remove map: {err}");
        }
    }
}
