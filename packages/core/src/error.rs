use thiserror::Error;

/// Errors raised while building [`Link`](crate::Link)s and
/// [`Resource`](crate::Resource)s.
///
/// Serialization never fails; every variant here surfaces at construction
/// time and is returned to the caller unchanged.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("required <link> attribute \"rel\" is missing or empty")]
    MissingRel,

    #[error("required <link> attribute \"href\" is missing or empty (rel {rel:?})")]
    MissingHref { rel: String },

    #[error("_links must be an object keyed by relation, got {0}")]
    InvalidLinks(&'static str),

    #[error("_embedded must be an object keyed by relation, got {0}")]
    InvalidEmbedded(&'static str),

    #[error("a resource must be built from a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Short name of a JSON value's kind, used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
