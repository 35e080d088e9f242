use wasm_bindgen::prelude::*;

use crate::model::Document;
use crate::serialize;

fn document_from(value: JsValue) -> Result<Document, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_sys::Error::new(&format!("Invalid card document: {}", e)).into())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

fn card_error(e: crate::CardError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

#[wasm_bindgen]
pub fn render_card(document: JsValue) -> Result<String, JsValue> {
    Ok(crate::render(&document_from(document)?))
}

#[wasm_bindgen]
pub fn render_card_standalone(document: JsValue) -> Result<String, JsValue> {
    Ok(crate::render_standalone(&document_from(document)?))
}

#[wasm_bindgen]
pub fn save_card(document: JsValue) -> Result<JsValue, JsValue> {
    to_js(&serialize::save(&document_from(document)?))
}

#[wasm_bindgen]
pub fn load_card(record: JsValue, current: JsValue) -> Result<JsValue, JsValue> {
    let record: serde_json::Value = serde_wasm_bindgen::from_value(record)
        .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
    let document = serialize::load(&record, &document_from(current)?).map_err(card_error)?;
    to_js(&document)
}

#[wasm_bindgen]
pub fn import_card_markup(text: &str, current: JsValue) -> Result<JsValue, JsValue> {
    let document = serialize::import_markup(text, &document_from(current)?).map_err(card_error)?;
    to_js(&document)
}
