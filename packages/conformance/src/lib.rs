//! Shared fixtures for the halberd conformance suite.
//!
//! [`orders_listing`] builds the canonical HAL example (an order listing with
//! two embedded orders) through the public API, and [`ORDERS_JSON`] /
//! [`ORDERS_XML`] hold the exact documents it must render to.

use halberd::{Link, Resource, ValidationError};
use serde_json::{json, Map, Value};

/// Compact HAL+JSON for [`orders_listing`]: links, then embedded, then
/// properties.
pub const ORDERS_JSON: &str = concat!(
    r#"{"_links":{"self":{"href":"/orders"},"next":{"href":"/orders?page=2"},"find":{"href":"/orders{?id}","templated":true}},"#,
    r#""_embedded":{"orders":["#,
    r#"{"_links":{"self":{"href":"/orders/123"},"basket":{"href":"/baskets/98712"},"customer":{"href":"/customers/7809"}},"total":30,"currency":"USD","status":"shipped"},"#,
    r#"{"_links":{"self":{"href":"/orders/124"},"basket":{"href":"/baskets/97213"},"customer":{"href":"/customers/12369"}},"total":20,"currency":"USD","status":"processing"}"#,
    r#"]}"#,
    r#","currentlyProcessing":14,"shippedToday":20}"#,
);

/// Single-line HAL+XML for [`orders_listing`].
pub const ORDERS_XML: &str = concat!(
    r#"<resource href="/orders">"#,
    r#"<link rel="next" href="/orders?page=2" /><link rel="find" href="/orders{?id}" templated="true" />"#,
    r#"<resource rel="order" href="/orders/123"><link rel="basket" href="/baskets/98712" /><link rel="customer" href="/customers/7809" /><total>30</total><currency>USD</currency><status>shipped</status></resource>"#,
    r#"<resource rel="order" href="/orders/124"><link rel="basket" href="/baskets/97213" /><link rel="customer" href="/customers/12369" /><total>20</total><currency>USD</currency><status>processing</status></resource>"#,
    r#"<currentlyProcessing>14</currentlyProcessing><shippedToday>20</shippedToday>"#,
    r#"</resource>"#,
);

/// Build the order listing, exercising every way of attaching a link.
///
/// # Errors
///
/// None in practice; every link here is valid. The `Result` lets callers use
/// `?` the way they would with their own data.
pub fn orders_listing() -> Result<Resource, ValidationError> {
    let mut listing = Resource::with_self(
        json!({"currentlyProcessing": 14, "shippedToday": 20}),
        "/orders",
    )?;
    listing.link("next", "/orders?page=2")?;
    listing.link("find", attributes(json!({"href": "/orders{?id}", "templated": true})))?;

    let mut order123 = Resource::with_self(
        json!({"total": 30, "currency": "USD", "status": "shipped"}),
        "/orders/123",
    )?;
    order123.add_link(Link::new("basket", "/baskets/98712")?);
    order123.add_link(Link::new("customer", attributes(json!({"href": "/customers/7809"})))?);

    let mut order124 = Resource::with_self(
        json!({"total": 20, "currency": "USD", "status": "processing"}),
        "/orders/124",
    )?;
    order124.link("basket", "/baskets/97213")?;
    order124.link("customer", "/customers/12369")?;

    listing.embed("orders", vec![order123, order124])?;
    Ok(listing)
}

/// Unwrap a `json!` object literal into an attribute map.
///
/// # Panics
///
/// Panics if `value` is not an object; fixtures only pass literals.
pub fn attributes(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture attributes must be an object, got {other}"),
    }
}
