//! HAL+XML rendering of [`Resource`]s.
//!
//! The dialect is the one described by the HAL draft's XML variant:
//!
//! ```text
//! <resource href="/orders">
//!   <link rel="next" href="/orders?page=2" />
//!   <resource rel="order" href="/orders/123">
//!       <total>30</total>
//!   </resource>
//!   <currentlyProcessing>14</currentlyProcessing>
//! </resource>
//! ```
//!
//! Nothing here is schema-checked. Property keys become tag names verbatim.

use crate::resource::Resource;
use crate::value::{coerce_to_string, is_truthy};

/// Render `resource` as HAL+XML.
///
/// `indent` is the indentation unit. When it is empty the document is
/// rendered on a single line; otherwise each element sits on its own line.
/// An embedded resource opens at its parent's child indent, and the step
/// used for its own children grows by that same amount, so deeper levels
/// indent progressively further.
pub fn render_resource(resource: &Resource, indent: &str) -> String {
    let mut out = String::new();
    write_resource(&mut out, resource, None, "", indent);
    out
}

/// Escape double quotes and tag enclosures, in that order.
///
/// Ampersands are left alone, so already-escaped entities pass through.
pub fn escape_xml(s: &str) -> String {
    s.replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Strip one trailing `s` from an embedded relation name (`orders` → `order`).
///
/// This is deliberately naive: `statuses` becomes `statuse`.
pub fn singularize(rel: &str) -> &str {
    rel.strip_suffix('s').unwrap_or(rel)
}

// --- helpers -----------------------------------------------------------------

fn write_resource(
    out: &mut String,
    resource: &Resource,
    rel: Option<&str>,
    current: &str,
    unit: &str,
) {
    let lf = if current.is_empty() && unit.is_empty() { "" } else { "\n" };
    let child = format!("{current}{unit}");

    out.push_str(current);
    out.push_str("<resource");
    if let Some(rel) = rel.filter(|r| !r.is_empty()) {
        out.push_str(&format!(" rel=\"{}\"", escape_xml(rel)));
    }
    let literal_href = resource.property("href").filter(|v| is_truthy(v));
    let href = literal_href
        .or_else(|| resource.self_link().and_then(|l| l.get("href")))
        .map(coerce_to_string);
    if let Some(href) = href {
        out.push_str(&format!(" href=\"{}\"", escape_xml(&href)));
    }
    if let Some(name) = resource.property("name").filter(|v| is_truthy(v)) {
        out.push_str(&format!(" name=\"{}\"", escape_xml(&coerce_to_string(name))));
    }
    out.push('>');
    out.push_str(lf);

    // a self link already surfaced as the href attribute is not repeated
    for (rel, group) in resource.link_groups() {
        if literal_href.is_none() && rel == "self" {
            continue;
        }
        for link in group.as_slice() {
            out.push_str(&child);
            out.push_str(&link.to_xml());
            out.push_str(lf);
        }
    }

    let step = format!("{child}{unit}");
    for (rel, members) in resource.embedded_groups() {
        let singular = singularize(rel);
        for member in members {
            write_resource(out, member, Some(singular), &child, &step);
            out.push_str(lf);
        }
    }

    for (key, value) in resource.properties() {
        if key == "_links" || key == "_embedded" {
            continue;
        }
        out.push_str(&format!(
            "{child}<{key}>{}</{key}>{lf}",
            escape_xml(&coerce_to_string(value))
        ));
    }

    out.push_str(current);
    out.push_str("</resource>");
}

// --- tests -------------------------------------------------------------------
