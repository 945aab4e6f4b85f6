use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue, JsError};

use swumeta_core::{EWidgetError, WidgetResult};

pub trait TErgonomicDocument {
    fn get_typed_element_by_id<T: JsCast>(&self, id: &str) -> Option<T>;
    fn query_typed_selector_all<T: JsCast>(&self, selector: &str) -> WidgetResult<Vec<T>>;
}

pub trait TToJsError {
    type OkType;

    fn to_jserr(self) -> Result<Self::OkType, JsError>;
}

pub trait TToWidgetError {
    type OkType;

    fn to_dom_err(self) -> WidgetResult<Self::OkType>;
}

// -- Implementations start here

pub fn js_message(e: &JsValue) -> String {
    if let Some(err) = e.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }

    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

impl<T> TToJsError for Result<T, EWidgetError> {
    type OkType = T;

    fn to_jserr(self) -> Result<Self::OkType, JsError> {
        self.map_err(|e| JsError::new(e.to_string().as_str()))
    }
}

impl<T> TToWidgetError for Result<T, JsValue> {
    type OkType = T;

    fn to_dom_err(self) -> WidgetResult<Self::OkType> {
        self.map_err(|e| EWidgetError::Dom(js_message(&e)))
    }
}

impl TErgonomicDocument for web_sys::Document {
    fn get_typed_element_by_id<T: JsCast>(&self, id: &str) -> Option<T> {
        self.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn query_typed_selector_all<T: JsCast>(&self, selector: &str) -> WidgetResult<Vec<T>> {
        let nodes = self.query_selector_all(selector).to_dom_err()?;

        let mut result = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(elem) = nodes.item(i).and_then(|n| n.dyn_into::<T>().ok()) {
                result.push(elem);
            }
        }

        Ok(result)
    }
}

/// Round-trips through `JSON` so plain serde types can be handed to JS libraries.
pub fn to_js_value<T: Serialize>(value: &T) -> WidgetResult<JsValue> {
    let text = serde_json::to_string(value).map_err(|e| EWidgetError::Schema(e.to_string()))?;
    js_sys::JSON::parse(text.as_str()).to_dom_err()
}

/// Reads a JS object into a serde type. `undefined` and `null` give `T::default()`.
pub fn from_js_value<T: DeserializeOwned + Default>(value: &JsValue) -> WidgetResult<T> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }

    let text = String::from(js_sys::JSON::stringify(value).to_dom_err()?);
    serde_json::from_str(text.as_str()).map_err(|e| EWidgetError::Schema(e.to_string()))
}

pub fn window() -> web_sys::Window {
    let window = web_sys::window().expect("no global `window` exists");
    window
}

pub fn document() -> web_sys::Document {
    let window = window();
    let document = window.document().expect("should have a document on window");

    document
}
