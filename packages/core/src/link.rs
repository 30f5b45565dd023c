//! Hypermedia links.
//!
//! A [`Link`] is one relation plus its attributes. Links are immutable once
//! built; a [`Resource`](crate::Resource) groups them by relation in a
//! [`LinkGroup`].

use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::value::{coerce_to_string, is_truthy};
use crate::xml::escape_xml;

/// Attributes a link may carry, in projection order. Anything else in an
/// attribute map is dropped at construction.
pub const LINK_ATTRIBUTES: [&str; 8] = [
    "href",
    "templated",
    "type",
    "deprecation",
    "name",
    "profile",
    "title",
    "hreflang",
];

/// Whether `attr` belongs to [`LINK_ATTRIBUTES`].
pub fn is_link_attribute(attr: &str) -> bool {
    LINK_ATTRIBUTES.contains(&attr)
}

/// The second argument to [`Link::new`]: a bare href or a map of attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkValue {
    /// A target URI (or URI template).
    Href(String),
    /// An attribute map that must contain `href`.
    Attributes(Map<String, Value>),
}

impl LinkValue {
    /// Whether this value names a target at all. Empty hrefs do not.
    pub fn is_present(&self) -> bool {
        match self {
            LinkValue::Href(href) => !href.is_empty(),
            LinkValue::Attributes(_) => true,
        }
    }
}

impl From<&str> for LinkValue {
    fn from(href: &str) -> Self {
        LinkValue::Href(href.to_string())
    }
}

impl From<String> for LinkValue {
    fn from(href: String) -> Self {
        LinkValue::Href(href)
    }
}

impl From<&String> for LinkValue {
    fn from(href: &String) -> Self {
        LinkValue::Href(href.clone())
    }
}

impl From<Map<String, Value>> for LinkValue {
    fn from(attributes: Map<String, Value>) -> Self {
        LinkValue::Attributes(attributes)
    }
}

/// Raw JSON as found in a `_links` block.
///
/// Objects are attribute maps; arrays are attribute maps with no `href` (so
/// they fail construction); strings are hrefs; other scalars are coerced to
/// text when truthy and treated as empty otherwise.
impl From<Value> for LinkValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => LinkValue::Attributes(map),
            Value::Array(_) => LinkValue::Attributes(Map::new()),
            Value::String(s) => LinkValue::Href(s),
            other if is_truthy(&other) => LinkValue::Href(coerce_to_string(&other)),
            _ => LinkValue::Href(String::new()),
        }
    }
}

/// A link to another hypermedia resource.
///
/// `rel` and `href` are always non-empty. The other attributes are a subset
/// of [`LINK_ATTRIBUTES`], kept in the order they were supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    rel: String,
    attributes: Map<String, Value>,
}

impl Link {
    /// Build a link for `rel` from an href or an attribute map.
    ///
    /// ```
    /// use halberd::Link;
    ///
    /// let next = Link::new("next", "/orders?page=2").unwrap();
    /// assert_eq!(next.href(), "/orders?page=2");
    /// ```
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingRel`] if `rel` is empty,
    /// [`ValidationError::MissingHref`] if the href is empty or the map has no
    /// truthy `href`.
    pub fn new(
        rel: impl Into<String>,
        value: impl Into<LinkValue>,
    ) -> Result<Self, ValidationError> {
        let rel = rel.into();
        if rel.is_empty() {
            return Err(ValidationError::MissingRel);
        }

        let mut attributes = Map::new();
        match value.into() {
            LinkValue::Href(href) => {
                if href.is_empty() {
                    return Err(ValidationError::MissingHref { rel });
                }
                attributes.insert("href".into(), Value::String(href));
            }
            LinkValue::Attributes(map) => {
                if !map.get("href").is_some_and(is_truthy) {
                    return Err(ValidationError::MissingHref { rel });
                }
                // the explicit rel wins over one carried in the map
                for (attr, value) in map {
                    if is_link_attribute(&attr) {
                        attributes.insert(attr, value);
                    }
                }
            }
        }

        Ok(Self { rel, attributes })
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// The target as text. Empty when a map supplied a non-string `href`;
    /// [`Link::get`] returns the raw value in that case.
    pub fn href(&self) -> &str {
        self.attributes
            .get("href")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// A recognized attribute other than `rel`, if it was supplied.
    pub fn get(&self, attr: &str) -> Option<&Value> {
        self.attributes.get(attr)
    }

    /// Whether the href is a URI template.
    pub fn templated(&self) -> bool {
        self.get("templated").is_some_and(is_truthy)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    /// Attributes other than `rel`, in the order they were supplied.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// HAL+JSON projection.
    ///
    /// Only [`LINK_ATTRIBUTES`] are emitted, in that order, and falsy values
    /// are left out. `templated: false` therefore projects the same as an
    /// absent `templated`. `rel` is never part of the projection; it is
    /// implied by the key the link is nested under.
    pub fn to_json(&self) -> Map<String, Value> {
        LINK_ATTRIBUTES
            .iter()
            .filter_map(|attr| {
                self.attributes
                    .get(*attr)
                    .filter(|v| is_truthy(v))
                    .map(|v| ((*attr).to_string(), v.clone()))
            })
            .collect()
    }

    /// A self-closing `<link />` element with one attribute per own field.
    pub fn to_xml(&self) -> String {
        let mut xml = format!("<link rel=\"{}\"", escape_xml(&self.rel));
        for (attr, value) in &self.attributes {
            xml.push_str(&format!(" {}=\"{}\"", attr, escape_xml(&coerce_to_string(value))));
        }
        xml.push_str(" />");
        xml
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// The links a resource holds for one relation.
///
/// A relation with one link stores it bare; attaching a second upgrades the
/// group to an ordered sequence. Relations parsed from a JSON array stay
/// sequences even when the array has one element.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkGroup {
    One(Link),
    Many(Vec<Link>),
}

impl LinkGroup {
    /// Append `link`, upgrading a bare link to a sequence.
    pub fn push(&mut self, link: Link) {
        match self {
            LinkGroup::Many(links) => links.push(link),
            LinkGroup::One(_) => {
                let previous = std::mem::replace(self, LinkGroup::Many(Vec::new()));
                if let LinkGroup::One(existing) = previous {
                    *self = LinkGroup::Many(vec![existing, link]);
                }
            }
        }
    }

    /// Members in attachment order, regardless of storage shape.
    pub fn as_slice(&self) -> &[Link] {
        match self {
            LinkGroup::One(link) => std::slice::from_ref(link),
            LinkGroup::Many(links) => links,
        }
    }

    pub fn first(&self) -> Option<&Link> {
        self.as_slice().first()
    }

    pub fn is_many(&self) -> bool {
        matches!(self, LinkGroup::Many(_))
    }

    /// A bare object for `One`, an array of objects for `Many`.
    pub fn to_json(&self) -> Value {
        match self {
            LinkGroup::One(link) => Value::Object(link.to_json()),
            LinkGroup::Many(links) => {
                Value::Array(links.iter().map(|l| Value::Object(l.to_json())).collect())
            }
        }
    }
}

impl Serialize for LinkGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
