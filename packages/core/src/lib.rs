//! HAL (Hypertext Application Language) resources for Rust.
//!
//! A [`Resource`] holds plain properties, [`Link`]s grouped by relation and
//! embedded sub-resources, and renders itself as HAL+JSON or HAL+XML. Raw
//! JSON with a `_links` block parses back into typed links.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`link`] | [`Link`], [`LinkValue`], [`LinkGroup`] and the recognized attribute set |
//! | [`resource`] | [`Resource`]: construction, link queries, embedding, JSON projection |
//! | [`xml`] | HAL+XML rendering, escaping, relation singularization |
//! | [`value`] | Truthiness and string coercion shared by both serializers |
//! | [`error`] | [`ValidationError`] |
//!
//! # Quick start
//!
//! ```rust
//! use halberd::Resource;
//! use serde_json::json;
//!
//! let mut orders = Resource::with_self(json!({"shippedToday": 20}), "/orders")?;
//! orders.link("next", "/orders?page=2")?;
//! orders.embed("orders", Resource::with_self(json!({"total": 30}), "/orders/123")?)?;
//!
//! assert_eq!(
//!     orders.to_json_string(),
//!     r#"{"_links":{"self":{"href":"/orders"},"next":{"href":"/orders?page=2"}},"_embedded":{"orders":[{"_links":{"self":{"href":"/orders/123"}},"total":30}]},"shippedToday":20}"#
//! );
//! assert!(orders.to_xml("").starts_with(r#"<resource href="/orders"><link rel="next""#));
//! # Ok::<(), halberd::ValidationError>(())
//! ```

pub mod error;
pub mod link;
pub mod resource;
pub mod value;
pub mod xml;

pub use error::ValidationError;
pub use link::{is_link_attribute, Link, LinkGroup, LinkValue, LINK_ATTRIBUTES};
pub use resource::{IntoEmbedded, IntoResource, Resource};
