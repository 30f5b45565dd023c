//! The HAL resource: properties, links by relation, embedded resources.
//!
//! A [`Resource`] is built from a JSON object, grown with [`Resource::link`]
//! and [`Resource::embed`], then rendered with [`Resource::to_json`] or
//! [`Resource::to_xml`].
//!
//! # Construction
//!
//! - `_links` in the input is parsed into typed [`Link`]s.
//! - Every other key, `_embedded` included, is kept as a plain property. Use
//!   [`Resource::from_hal`] to lift `_embedded` into typed resources as well.
//! - The self link comes from the explicit URI, or from an `href` property,
//!   which is then removed from the properties.
//!
//! # Divergence from strict HAL
//!
//! Embedded relations always serialize as arrays, even with one member.

use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{json_kind, ValidationError};
use crate::link::{Link, LinkGroup, LinkValue};
use crate::value::to_pretty_string;
use crate::xml::render_resource;

/// A hypermedia resource.
///
/// Owns its links and its embedded resources, so a resource graph is always
/// a tree. Properties, relations and embedded relations all keep insertion
/// order, which is the order they serialize in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    links: IndexMap<String, LinkGroup>,
    embedded: IndexMap<String, Vec<Resource>>,
    properties: Map<String, Value>,
}

impl Resource {
    /// An empty resource with no self link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resource from a property map and an optional self target.
    ///
    /// When `uri` is absent or empty the `href` property, if any, is used
    /// instead and removed from the properties. When `uri` is a string equal
    /// to the `href` property, the property is removed as well. A resource
    /// with neither gets no self link.
    ///
    /// # Errors
    ///
    /// Propagates [`ValidationError`] from parsing `_links` or building the
    /// self link.
    pub fn from_map(
        object: Map<String, Value>,
        uri: Option<LinkValue>,
    ) -> Result<Self, ValidationError> {
        let mut resource = Self::new();

        for (key, value) in object {
            if key == "_links" {
                resource.links = parse_links(value)?;
            } else {
                resource.properties.insert(key, value);
            }
        }

        let target = match uri.filter(LinkValue::is_present) {
            Some(uri) => {
                if let LinkValue::Href(href) = &uri {
                    let literal = resource.properties.get("href").and_then(Value::as_str);
                    if literal == Some(href.as_str()) {
                        resource.properties.shift_remove("href");
                    }
                }
                Some(uri)
            }
            None => resource.properties.shift_remove("href").map(LinkValue::from),
        };

        if let Some(target) = target.filter(LinkValue::is_present) {
            let link = Link::new("self", target)?;
            tracing::debug!(href = link.href(), "attaching self link");
            resource.add_link(link);
        }

        Ok(resource)
    }

    /// Build a resource from a JSON object, taking the self link from its
    /// `href` property.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NotAnObject`] if `value` is not an object, plus
    /// everything [`Resource::from_map`] returns.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        Self::from_map(into_object(value)?, None)
    }

    /// Build a resource from a JSON object with an explicit self target.
    ///
    /// ```
    /// use halberd::Resource;
    /// use serde_json::json;
    ///
    /// let order = Resource::with_self(json!({"total": 30}), "/orders/123").unwrap();
    /// assert_eq!(order.self_link().unwrap().href(), "/orders/123");
    /// ```
    pub fn with_self(value: Value, uri: impl Into<LinkValue>) -> Result<Self, ValidationError> {
        Self::from_map(into_object(value)?, Some(uri.into()))
    }

    /// Parse a full HAL+JSON document.
    ///
    /// Like [`Resource::from_value`], but `_embedded` is parsed too: each
    /// relation's members (an array, or a single object) become embedded
    /// resources, recursively.
    pub fn from_hal(value: Value) -> Result<Self, ValidationError> {
        let mut object = into_object(value)?;
        let embedded = object.shift_remove("_embedded");
        let mut resource = Self::from_map(object, None)?;

        match embedded {
            None | Some(Value::Null) => {}
            Some(Value::Object(groups)) => {
                for (rel, members) in groups {
                    let members = match members {
                        Value::Array(items) => items,
                        single => vec![single],
                    };
                    let parsed = members
                        .into_iter()
                        .map(Self::from_hal)
                        .collect::<Result<Vec<_>, _>>()?;
                    resource.embed(rel, parsed)?;
                }
            }
            Some(other) => return Err(ValidationError::InvalidEmbedded(json_kind(&other))),
        }

        Ok(resource)
    }

    // --- links ---------------------------------------------------------------

    /// Attach a link under its own relation.
    ///
    /// A second link for the same relation turns the entry into a sequence;
    /// later links are appended in order.
    pub fn add_link(&mut self, link: Link) -> &mut Self {
        match self.links.entry(link.rel().to_string()) {
            Entry::Occupied(mut entry) => {
                tracing::trace!(rel = link.rel(), "relation holds several links");
                entry.get_mut().push(link);
            }
            Entry::Vacant(entry) => {
                entry.insert(LinkGroup::One(link));
            }
        }
        self
    }

    /// Build a link from `rel` and an href or attribute map, then attach it.
    ///
    /// # Errors
    ///
    /// Whatever [`Link::new`] rejects.
    pub fn link(
        &mut self,
        rel: impl Into<String>,
        value: impl Into<LinkValue>,
    ) -> Result<&mut Self, ValidationError> {
        let link = Link::new(rel, value)?;
        Ok(self.add_link(link))
    }

    /// The first link attached for `rel`.
    pub fn get_link(&self, rel: &str) -> Option<&Link> {
        self.links.get(rel).and_then(LinkGroup::first)
    }

    pub fn self_link(&self) -> Option<&Link> {
        self.get_link("self")
    }

    /// Every link, relation by relation in insertion order.
    pub fn links(&self) -> Vec<&Link> {
        self.links.values().flat_map(LinkGroup::as_slice).collect()
    }

    /// The links for `rel`; empty when the relation is unknown.
    pub fn links_for(&self, rel: &str) -> Vec<&Link> {
        self.links
            .get(rel)
            .map(|group| group.as_slice().iter().collect())
            .unwrap_or_default()
    }

    /// [`Resource::links_for`] over each relation in turn, concatenated.
    /// Repeating a relation repeats its links.
    pub fn links_for_all<I>(&self, rels: I) -> Vec<&Link>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        rels.into_iter()
            .flat_map(|rel| self.links_for(rel.as_ref()))
            .collect()
    }

    pub fn link_groups(&self) -> impl Iterator<Item = (&str, &LinkGroup)> {
        self.links.iter().map(|(rel, group)| (rel.as_str(), group))
    }

    // --- embedded ------------------------------------------------------------

    /// Embed one resource or several under `rel`.
    ///
    /// Members are appended to whatever `rel` already holds; nothing is
    /// deduplicated. Raw JSON objects are wrapped with
    /// [`Resource::from_value`], so an `href` becomes their self link.
    ///
    /// # Errors
    ///
    /// Only raw JSON input can fail, with the errors of
    /// [`Resource::from_value`].
    pub fn embed(
        &mut self,
        rel: impl Into<String>,
        resources: impl IntoEmbedded,
    ) -> Result<&mut Self, ValidationError> {
        let members = resources.into_embedded()?;
        let rel = rel.into();
        tracing::trace!(rel = %rel, count = members.len(), "embedding resources");
        self.embedded.entry(rel).or_default().extend(members);
        Ok(self)
    }

    /// Resources embedded under `rel`.
    pub fn embedded(&self, rel: &str) -> &[Resource] {
        self.embedded.get(rel).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn embedded_groups(&self) -> impl Iterator<Item = (&str, &[Resource])> {
        self.embedded
            .iter()
            .map(|(rel, members)| (rel.as_str(), members.as_slice()))
    }

    // --- properties ----------------------------------------------------------

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Set a plain property. An existing key keeps its position.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.properties.shift_remove(key)
    }

    // --- rendering -----------------------------------------------------------

    /// The HAL+JSON tree: `_links`, then `_embedded`, then the properties.
    ///
    /// Empty link and embedded tables are left out. Links never carry `rel`.
    /// A raw `_embedded` property always lands in the `_embedded` slot,
    /// merged with whatever was embedded through [`Resource::embed`].
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();

        if !self.links.is_empty() {
            let links = self
                .links
                .iter()
                .map(|(rel, group)| (rel.clone(), group.to_json()))
                .collect();
            out.insert("_links".into(), Value::Object(links));
        }

        if let Some(embedded) = self.embedded_json() {
            out.insert("_embedded".into(), embedded);
        }

        for (key, value) in &self.properties {
            if key == "_links" || key == "_embedded" {
                continue;
            }
            out.insert(key.clone(), value.clone());
        }

        Value::Object(out)
    }

    /// The `_embedded` slot: a raw `_embedded` property with the typed
    /// relations merged into it. Members embedded under a relation the raw
    /// object already has are appended to it; a bare raw member becomes the
    /// first element of an array. A raw value that is not an object is
    /// emitted as-is only while nothing is embedded.
    fn embedded_json(&self) -> Option<Value> {
        let raw = self.properties.get("_embedded");
        if self.embedded.is_empty() {
            return match raw {
                None | Some(Value::Null) => None,
                Some(Value::Object(map)) if map.is_empty() => None,
                Some(other) => Some(other.clone()),
            };
        }

        let mut merged = match raw {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        for (rel, members) in &self.embedded {
            let projected = members.iter().map(Self::to_json);
            if let Some(existing) = merged.get_mut(rel.as_str()) {
                match existing {
                    Value::Array(items) => items.extend(projected),
                    single => {
                        let first = single.take();
                        *single = Value::Array(std::iter::once(first).chain(projected).collect());
                    }
                }
            } else {
                merged.insert(rel.clone(), Value::Array(projected.collect()));
            }
        }
        Some(Value::Object(merged))
    }

    /// Compact HAL+JSON text.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// HAL+JSON text indented with `indent` per level.
    pub fn to_json_pretty(&self, indent: &str) -> serde_json::Result<String> {
        to_pretty_string(&self.to_json(), indent)
    }

    /// HAL+XML text; see [`crate::xml`].
    pub fn to_xml(&self, indent: &str) -> String {
        render_resource(self, indent)
    }
}

/// Tab-indented HAL+JSON.
impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json_pretty("\t").map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Parses through [`Resource::from_hal`].
impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Resource::from_hal(value).map_err(de::Error::custom)
    }
}

// --- conversions -------------------------------------------------------------

/// Things that can stand in for a resource.
///
/// A [`Resource`] converts to itself unchanged; raw JSON is wrapped with
/// [`Resource::from_value`].
pub trait IntoResource {
    fn into_resource(self) -> Result<Resource, ValidationError>;
}

impl IntoResource for Resource {
    fn into_resource(self) -> Result<Resource, ValidationError> {
        Ok(self)
    }
}

impl IntoResource for Map<String, Value> {
    fn into_resource(self) -> Result<Resource, ValidationError> {
        Resource::from_map(self, None)
    }
}

impl IntoResource for Value {
    fn into_resource(self) -> Result<Resource, ValidationError> {
        Resource::from_value(self)
    }
}

/// Arguments accepted by [`Resource::embed`]: one resource or a list.
pub trait IntoEmbedded {
    fn into_embedded(self) -> Result<Vec<Resource>, ValidationError>;
}

impl IntoEmbedded for Resource {
    fn into_embedded(self) -> Result<Vec<Resource>, ValidationError> {
        Ok(vec![self])
    }
}

impl IntoEmbedded for Map<String, Value> {
    fn into_embedded(self) -> Result<Vec<Resource>, ValidationError> {
        Ok(vec![self.into_resource()?])
    }
}

/// A JSON array embeds each element; anything else embeds one resource.
impl IntoEmbedded for Value {
    fn into_embedded(self) -> Result<Vec<Resource>, ValidationError> {
        match self {
            Value::Array(items) => items.into_iter().map(IntoResource::into_resource).collect(),
            single => Ok(vec![single.into_resource()?]),
        }
    }
}

impl<T: IntoResource> IntoEmbedded for Vec<T> {
    fn into_embedded(self) -> Result<Vec<Resource>, ValidationError> {
        self.into_iter().map(IntoResource::into_resource).collect()
    }
}

// --- helpers -----------------------------------------------------------------

fn into_object(value: Value) -> Result<Map<String, Value>, ValidationError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::NotAnObject(json_kind(&other))),
    }
}

/// Turn a raw `_links` block into typed groups. Arrays stay sequences even
/// with a single element.
fn parse_links(raw: Value) -> Result<IndexMap<String, LinkGroup>, ValidationError> {
    let raw = match raw {
        Value::Object(map) => map,
        Value::Null => return Ok(IndexMap::new()),
        other => return Err(ValidationError::InvalidLinks(json_kind(&other))),
    };

    let mut parsed = IndexMap::with_capacity(raw.len());
    for (rel, value) in raw {
        let group = match value {
            Value::Array(items) => LinkGroup::Many(
                items
                    .into_iter()
                    .map(|item| Link::new(rel.as_str(), item))
                    .collect::<Result<_, _>>()?,
            ),
            single => LinkGroup::One(Link::new(rel.as_str(), single)?),
        };
        tracing::trace!(rel = %rel, many = group.is_many(), "parsed link relation");
        parsed.insert(rel, group);
    }
    Ok(parsed)
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hrefs(links: &[&Link]) -> Vec<String> {
        links.iter().map(|l| l.href().to_string()).collect()
    }

    #[test]
    fn copies_properties() {
        let res = Resource::from_value(json!({"hello": "world", "who": "am I"})).unwrap();
        assert_eq!(res.property("hello"), Some(&json!("world")));
        assert_eq!(res.property("who"), Some(&json!("am I")));
        assert!(res.self_link().is_none());
    }

    #[test]
    fn self_link_from_uri() {
        let res = Resource::with_self(json!({}), "href").unwrap();
        assert_eq!(res.self_link().unwrap().href(), "href");
    }

    #[test]
    fn self_link_from_attribute_map() {
        let attrs = match json!({"href": "href", "name": "name"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let res = Resource::with_self(json!({}), attrs).unwrap();
        let link = res.self_link().unwrap();
        assert_eq!(link.href(), "href");
        assert_eq!(link.name(), Some("name"));
    }

    #[test]
    fn href_property_is_promoted() {
        let res = Resource::from_value(json!({"a": 1, "href": "/x", "b": 2})).unwrap();
        assert_eq!(res.self_link().unwrap().href(), "/x");
        assert!(res.property("href").is_none());
        let keys: Vec<_> = res.properties().keys().cloned().collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn href_equal_to_uri_is_dropped() {
        let res = Resource::with_self(json!({"href": "/x"}), "/x").unwrap();
        assert!(res.property("href").is_none());
        assert_eq!(res.links().len(), 1);
    }

    #[test]
    fn href_different_from_uri_is_kept() {
        let res = Resource::with_self(json!({"href": "/a"}), "/b").unwrap();
        assert_eq!(res.property("href"), Some(&json!("/a")));
        assert_eq!(res.self_link().unwrap().href(), "/b");
    }

    #[test]
    fn empty_uri_falls_back_to_href() {
        let res = Resource::with_self(json!({"href": "/x"}), "").unwrap();
        assert_eq!(res.self_link().unwrap().href(), "/x");
        assert!(res.property("href").is_none());
    }

    #[test]
    fn empty_href_property_is_dropped_without_link() {
        let res = Resource::from_value(json!({"href": ""})).unwrap();
        assert!(res.property("href").is_none());
        assert!(res.links().is_empty());
    }

    #[test]
    fn non_object_is_rejected() {
        assert_eq!(Resource::from_value(json!(42)), Err(ValidationError::NotAnObject("a number")));
        assert_eq!(
            Resource::from_value(json!({"_links": "nope"})),
            Err(ValidationError::InvalidLinks("a string"))
        );
    }

    #[test]
    fn link_adds_under_relation() {
        let mut res = Resource::new();
        res.link("edit", "/edit").unwrap();
        assert_eq!(res.get_link("edit").unwrap().href(), "/edit");
        assert!(matches!(res.link_groups().next(), Some(("edit", LinkGroup::One(_)))));
    }

    #[test]
    fn add_link_instance() {
        let mut res = Resource::new();
        res.add_link(Link::new("edit", "/edit").unwrap());
        assert_eq!(res.get_link("edit").unwrap().href(), "/edit");
    }

    #[test]
    fn link_propagates_validation_errors() {
        let mut res = Resource::new();
        assert_eq!(res.link("", "/x").err(), Some(ValidationError::MissingRel));
        assert!(res.links().is_empty());
    }

    #[test]
    fn same_relation_upgrades_to_sequence() {
        let mut res = Resource::new();
        res.link("admin", "/user/john").unwrap();
        res.link("admin", "/user/jane").unwrap();

        let (_, group) = res.link_groups().next().unwrap();
        assert!(group.is_many());
        let links = res.links_for("admin");
        assert_eq!(hrefs(&links), ["/user/john", "/user/jane"]);
        assert!(links.iter().all(|l| l.rel() == "admin"));

        res.link("admin", "/user/joe").unwrap();
        assert_eq!(res.links_for("admin").len(), 3);
    }

    #[test]
    fn queries_always_return_sequences() {
        let mut res = Resource::with_self(json!({}), "/me").unwrap();
        res.link("a", "/a1").unwrap();
        res.link("b", "/b1").unwrap().link("b", "/b2").unwrap();

        assert!(res.links_for("missing").is_empty());
        assert_eq!(hrefs(&res.links_for("a")), ["/a1"]);
        assert_eq!(hrefs(&res.links()), ["/me", "/a1", "/b1", "/b2"]);
        assert_eq!(
            hrefs(&res.links_for_all(["b", "a", "b"])),
            ["/b1", "/b2", "/a1", "/b1", "/b2"]
        );
        assert_eq!(res.get_link("b").unwrap().href(), "/b1");
        assert!(res.get_link("missing").is_none());
    }

    #[test]
    fn parses_links_block() {
        let parsed = Resource::from_value(json!({
            "_links": {
                "self": {"href": "/j1", "rel": "self"},
                "mom": {"href": "/m", "rel": "mom"},
                "brother": [
                    {"href": "/j0", "rel": "brother"},
                    {"href": "/j2", "rel": "brother"},
                    {"href": "/j3", "rel": "brother"}
                ],
                "sister": [{"href": "/s"}],
                "home": "/h"
            }
        }))
        .unwrap();

        assert_eq!(parsed.self_link().unwrap().href(), "/j1");
        assert_eq!(parsed.get_link("mom").unwrap().rel(), "mom");
        assert_eq!(hrefs(&parsed.links_for("brother")), ["/j0", "/j2", "/j3"]);
        assert_eq!(parsed.get_link("home").unwrap().href(), "/h");
        let groups: IndexMap<_, _> = parsed.link_groups().collect();
        assert!(groups["brother"].is_many());
        assert!(groups["sister"].is_many());
        assert!(!groups["mom"].is_many());
        assert!(parsed.property("_links").is_none());
    }

    #[test]
    fn invalid_link_in_block_fails_construction() {
        let err = Resource::from_value(json!({"_links": {"next": {"title": "no href"}}}));
        assert_eq!(err, Err(ValidationError::MissingHref { rel: "next".into() }));
    }

    #[test]
    fn raw_embedded_stays_a_property() {
        let raw = json!({"_embedded": {"items": [{"a": 1}]}, "x": 1});
        let res = Resource::from_value(raw.clone()).unwrap();
        assert!(res.embedded("items").is_empty());
        assert_eq!(res.property("_embedded"), Some(&raw["_embedded"]));
        assert_eq!(res.to_json(), raw);
    }

    #[test]
    fn raw_embedded_projects_in_embedded_slot() {
        let res = Resource::from_value(json!({"x": 1, "_embedded": {"a": [{"k": 1}]}})).unwrap();
        assert_eq!(res.to_json_string(), r#"{"_embedded":{"a":[{"k":1}]},"x":1}"#);
    }

    #[test]
    fn raw_embedded_merges_with_embed() {
        let mut res = Resource::from_value(json!({
            "x": 1,
            "_embedded": {"a": [{"k": 1}], "c": {"k": 3}}
        }))
        .unwrap();
        res.embed("b", Resource::new()).unwrap();
        res.embed("a", Resource::with_self(json!({}), "/a/2").unwrap()).unwrap();
        res.embed("c", Resource::new()).unwrap();

        assert_eq!(
            res.to_json_string(),
            concat!(
                r#"{"_embedded":{"a":[{"k":1},{"_links":{"self":{"href":"/a/2"}}}],"#,
                r#""c":[{"k":3},{}],"b":[{}]},"x":1}"#
            )
        );
    }

    #[test]
    fn empty_raw_embedded_is_omitted() {
        let res = Resource::from_value(json!({"_embedded": {}, "x": 1})).unwrap();
        assert_eq!(res.to_json_string(), r#"{"x":1}"#);
    }

    #[test]
    fn from_hal_parses_embedded() {
        let res = Resource::from_hal(json!({
            "_links": {"self": {"href": "/orders"}},
            "_embedded": {
                "orders": [{"_links": {"self": {"href": "/orders/1"}}, "total": 1}],
                "owner": {"href": "/users/7", "name": "Ada"}
            },
            "count": 1
        }))
        .unwrap();

        assert_eq!(res.embedded("orders")[0].self_link().unwrap().href(), "/orders/1");
        assert_eq!(res.embedded("owner")[0].self_link().unwrap().href(), "/users/7");
        assert!(res.property("_embedded").is_none());
        assert_eq!(
            Resource::from_hal(json!({"_embedded": 3})),
            Err(ValidationError::InvalidEmbedded("a number"))
        );
    }

    #[test]
    fn embed_single_resource_is_a_sequence() {
        let mut res = Resource::with_self(json!({}), "href").unwrap();
        let sub = Resource::with_self(json!({}), "href2").unwrap();
        res.embed("subs", sub).unwrap();
        assert_eq!(res.embedded("subs").len(), 1);
        assert_eq!(res.to_json()["_embedded"]["subs"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn embed_accumulates_and_wraps_raw_json() {
        let mut res = Resource::new();
        res.embed("items", json!({"href": "/i/1"})).unwrap();
        res.embed("items", json!([{"href": "/i/2"}, {"href": "/i/3"}])).unwrap();
        res.embed("items", vec![json!({"href": "/i/1"})]).unwrap();

        let items: Vec<_> = res
            .embedded("items")
            .iter()
            .map(|r| r.self_link().unwrap().href().to_string())
            .collect();
        assert_eq!(items, ["/i/1", "/i/2", "/i/3", "/i/1"]);
        assert_eq!(
            res.embed("items", json!("text")).err(),
            Some(ValidationError::NotAnObject("a string"))
        );
    }

    #[test]
    fn embedding_a_resource_keeps_it_unchanged() {
        let mut sub = Resource::with_self(json!({"href": "/other", "k": "v"}), "/sub").unwrap();
        sub.link("up", "/").unwrap();
        let copy = sub.clone();

        let mut res = Resource::new();
        res.embed("subs", sub).unwrap();
        assert_eq!(res.embedded("subs")[0], copy);
        assert_eq!(copy.clone().into_resource().unwrap(), copy);
    }

    #[test]
    fn json_drops_rel_inside_links() {
        let res = Resource::with_self(json!({}), "/self/href").unwrap();
        assert_eq!(res.to_json()["_links"], json!({"self": {"href": "/self/href"}}));
    }

    #[test]
    fn json_several_links_same_relation() {
        let mut res = Resource::with_self(json!({}), "/self/href").unwrap();
        res.link("admin", "/user/john").unwrap();
        res.link("admin", "/user/jane").unwrap();
        res.link("admin", "/user/joe").unwrap();

        assert_eq!(
            res.to_json()["_links"],
            json!({
                "self": {"href": "/self/href"},
                "admin": [{"href": "/user/john"}, {"href": "/user/jane"}, {"href": "/user/joe"}]
            })
        );
    }

    #[test]
    fn json_round_trips_links_block() {
        let res = Resource::from_value(json!({"_links": {"self": {"href": "/x"}}})).unwrap();
        assert_eq!(res.self_link().unwrap().href(), "/x");
        assert_eq!(res.to_json_string(), r#"{"_links":{"self":{"href":"/x"}}}"#);
    }

    #[test]
    fn json_key_order_and_empty_tables() {
        let mut res = Resource::from_value(json!({"z": 1, "a": 2})).unwrap();
        assert_eq!(res.to_json_string(), r#"{"z":1,"a":2}"#);

        res.embed("kids", Resource::new()).unwrap();
        res.link("up", "/").unwrap();
        assert_eq!(
            serde_json::to_string(&res).unwrap(),
            r#"{"_links":{"up":{"href":"/"}},"_embedded":{"kids":[{}]},"z":1,"a":2}"#
        );
    }

    #[test]
    fn pretty_json_uses_indent_unit() {
        let res = Resource::with_self(json!({"n": 1}), "/x").unwrap();
        let pretty = res.to_json_pretty("  ").unwrap();
        assert!(pretty.starts_with("{\n  \"_links\""));
        assert!(res.to_string().contains("\n\t\"n\": 1"));
    }

    #[test]
    fn deserialize_goes_through_from_hal() {
        let res: Resource = serde_json::from_str(
            r#"{"_links":{"self":{"href":"/a"}},"_embedded":{"bs":[{"href":"/b"}]},"k":true}"#,
        )
        .unwrap();
        assert_eq!(res.embedded("bs")[0].self_link().unwrap().href(), "/b");
        assert_eq!(
            res.to_json_string(),
            r#"{"_links":{"self":{"href":"/a"}},"_embedded":{"bs":[{"_links":{"self":{"href":"/b"}}}]},"k":true}"#
        );
        assert!(serde_json::from_str::<Resource>("[1]").is_err());
    }

    #[test]
    fn set_and_remove_properties() {
        let mut res = Resource::new();
        res.set_property("a", 1).set_property("b", "two").set_property("a", 3);
        let keys: Vec<_> = res.properties().keys().cloned().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(res.property("a"), Some(&json!(3)));
        assert_eq!(res.remove_property("a"), Some(json!(3)));
        assert!(res.property("a").is_none());
    }
}
