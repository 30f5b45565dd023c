//! WebAssembly bindings for the halberd HAL library.
//!
//! Exposes two groups of APIs to JavaScript/TypeScript via `wasm-bindgen`.
//! Compile with `wasm-pack build` to produce an npm-ready package that works
//! in browsers, Node.js, and any other WASM host.
//!
//! ## Document API: [`validate`], [`to_json`], [`to_xml`]
//!
//! ```js
//! import init, { validate, to_json, to_xml } from './halberd_wasm.js';
//! await init();
//!
//! validate(halJson);                 // throws if a link is malformed
//! console.log(to_xml(halJson, '  ')); // HAL+XML, two-space indent
//! ```
//!
//! ## Resource API: [`Resource`](HalResource)
//!
//! ```js
//! const orders = new Resource('{"shippedToday": 20}', '/orders');
//! orders.link('next', '/orders?page=2');
//! orders.linkWithAttributes('find', '{"href": "/orders{?id}", "templated": true}');
//! orders.embed('orders', '[{"href": "/orders/123", "total": 30}]');
//! orders.firstHref('next');   // "/orders?page=2"
//! orders.toJSONString();      // compact HAL+JSON
//! orders.toXML('\t');
//! ```
//!
//! Every export throws a descriptive string on failure.

use halberd::{Resource, ValidationError};
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

/// One-time initialisation called at the start of every exported function.
///
/// Installs the `console_error_panic_hook` when the feature is enabled so
/// that Rust panics are forwarded to the browser console as readable errors
/// rather than appearing as generic "unreachable" WASM traps.
fn setup() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Check that a HAL+JSON document parses into a resource.
///
/// Returns `undefined` on success. Throws on invalid JSON or a malformed
/// link.
#[wasm_bindgen]
pub fn validate(json: &str) -> Result<(), JsValue> {
    setup();
    parse_document(json).map(|_| ()).map_err(to_js)
}

/// Re-emit a HAL+JSON document, compact or indented with `indent`.
#[wasm_bindgen]
pub fn to_json(json: &str, indent: Option<String>) -> Result<String, JsValue> {
    setup();
    let resource = parse_document(json).map_err(to_js)?;
    json_text(&resource, indent.as_deref()).map_err(to_js)
}

/// Render a HAL+JSON document as HAL+XML.
///
/// Without `indent` the XML is a single line.
#[wasm_bindgen]
pub fn to_xml(json: &str, indent: Option<String>) -> Result<String, JsValue> {
    setup();
    let resource = parse_document(json).map_err(to_js)?;
    Ok(resource.to_xml(indent.as_deref().unwrap_or_default()))
}

// ── Resource API ──────────────────────────────────────────────────────────────

/// A HAL resource held in WASM memory, exported to JavaScript as `Resource`.
#[wasm_bindgen(js_name = Resource)]
pub struct HalResource {
    inner: Resource,
}

#[wasm_bindgen(js_class = Resource)]
impl HalResource {
    /// Build a resource from a JSON object string and an optional self URI.
    ///
    /// Without `uri`, an `href` property becomes the self link.
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str, uri: Option<String>) -> Result<HalResource, JsValue> {
        setup();
        let inner = build(json, uri).map_err(to_js)?;
        Ok(Self { inner })
    }

    /// Attach a link with a bare href.
    pub fn link(&mut self, rel: &str, href: &str) -> Result<(), JsValue> {
        self.inner.link(rel, href).map(|_| ()).map_err(|e| to_js(e.to_string()))
    }

    /// Attach a link from a JSON attribute map (must contain `href`).
    #[wasm_bindgen(js_name = linkWithAttributes)]
    pub fn link_with_attributes(
        &mut self,
        rel: &str,
        attributes_json: &str,
    ) -> Result<(), JsValue> {
        let attributes = parse_attributes(attributes_json).map_err(to_js)?;
        self.inner
            .link(rel, attributes)
            .map(|_| ())
            .map_err(|e| to_js(e.to_string()))
    }

    /// The href of the first link for `rel`, or `undefined`.
    #[wasm_bindgen(js_name = firstHref)]
    pub fn first_href(&self, rel: &str) -> Option<String> {
        self.inner.get_link(rel).map(|l| l.href().to_string())
    }

    /// Every href for `rel`, in attachment order.
    pub fn hrefs(&self, rel: &str) -> Vec<String> {
        self.inner
            .links_for(rel)
            .iter()
            .map(|l| l.href().to_string())
            .collect()
    }

    /// Embed a JSON object, or each object of a JSON array, under `rel`.
    pub fn embed(&mut self, rel: &str, json: &str) -> Result<(), JsValue> {
        embed_json(&mut self.inner, rel, json).map_err(to_js)
    }

    /// HAL+JSON text. Named so that `JSON.stringify` does not pick it up.
    #[wasm_bindgen(js_name = toJSONString)]
    pub fn to_json_string(&self, indent: Option<String>) -> Result<String, JsValue> {
        json_text(&self.inner, indent.as_deref()).map_err(to_js)
    }

    /// HAL+XML text.
    #[wasm_bindgen(js_name = toXML)]
    pub fn to_xml(&self, indent: Option<String>) -> String {
        self.inner.to_xml(indent.as_deref().unwrap_or_default())
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────
//
// Plain `Result<_, String>` so they run under native `cargo test`.

fn to_js(msg: String) -> JsValue {
    JsValue::from_str(&msg)
}

fn parse_json(json: &str) -> Result<Value, String> {
    serde_json::from_str(json).map_err(|e| format!("parse error: {e}"))
}

fn invalid(e: ValidationError) -> String {
    format!("validation error: {e}")
}

fn parse_document(json: &str) -> Result<Resource, String> {
    Resource::from_hal(parse_json(json)?).map_err(invalid)
}

fn build(json: &str, uri: Option<String>) -> Result<Resource, String> {
    let object = match parse_json(json)? {
        Value::Object(map) => map,
        _ => return Err("resource JSON must be an object".into()),
    };
    Resource::from_map(object, uri.map(Into::into)).map_err(invalid)
}

fn parse_attributes(json: &str) -> Result<Map<String, Value>, String> {
    match parse_json(json)? {
        Value::Object(map) => Ok(map),
        _ => Err("link attributes must be a JSON object".into()),
    }
}

fn embed_json(resource: &mut Resource, rel: &str, json: &str) -> Result<(), String> {
    resource.embed(rel, parse_json(json)?).map(|_| ()).map_err(invalid)
}

fn json_text(resource: &Resource, indent: Option<&str>) -> Result<String, String> {
    match indent {
        None | Some("") => Ok(resource.to_json_string()),
        Some(unit) => resource.to_json_pretty(unit).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_document_reports_json_errors() {
        assert!(parse_document("not json").unwrap_err().starts_with("parse error"));
        assert!(parse_document(r#"{"_links":{"x":{}}}"#)
            .unwrap_err()
            .starts_with("validation error"));
    }

    #[test]
    fn build_uses_explicit_uri() {
        let res = build(r#"{"href":"/a","n":1}"#, Some("/b".into())).unwrap();
        assert_eq!(res.self_link().unwrap().href(), "/b");
        assert!(build("[]", None).is_err());
    }

    #[test]
    fn embed_json_accepts_arrays() {
        let mut res = Resource::new();
        embed_json(&mut res, "items", r#"[{"href":"/1"},{"href":"/2"}]"#).unwrap();
        embed_json(&mut res, "items", r#"{"href":"/3"}"#).unwrap();
        assert_eq!(res.embedded("items").len(), 3);
        assert!(embed_json(&mut res, "items", "3").is_err());
    }

    #[test]
    fn json_text_indents_on_request() {
        let res = build("{}", Some("/x".into())).unwrap();
        assert_eq!(json_text(&res, None).unwrap(), r#"{"_links":{"self":{"href":"/x"}}}"#);
        assert!(json_text(&res, Some("  ")).unwrap().contains("\n  \"_links\""));
    }

    #[test]
    fn attributes_must_be_an_object() {
        assert!(parse_attributes(r#"{"href":"/x","templated":true}"#).is_ok());
        assert!(parse_attributes(r#""/x""#).is_err());
    }
}
