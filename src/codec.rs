use serde::de::IgnoredAny;
use serde_json::Value;

/// Why a piece of text could not be decoded as a JSON string literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid JSON: {detail}")]
    MalformedJson { detail: String },

    #[error("Expected a JSON string, found {found}")]
    NotAString { found: &'static str },
}

/// [`DecodeError`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    MalformedJson,
    NotAString,
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::MalformedJson { .. } => DecodeErrorKind::MalformedJson,
            DecodeError::NotAString { .. } => DecodeErrorKind::NotAString,
        }
    }
}

/// Decode a JSON string literal into the raw text it represents.
///
/// The whole input must be exactly one JSON value (surrounding whitespace is
/// allowed) and that value must be a string. Empty input is malformed here;
/// callers that want to treat it as "nothing typed yet" check for it first.
///
/// # Example
/// ```
/// let raw = escapify::codec::decode(r#""Hello\nWorld!""#).unwrap();
/// assert_eq!(raw, "Hello\nWorld!");
/// ```
pub fn decode(escaped: &str) -> Result<String, DecodeError> {
    match serde_json::from_str::<Value>(escaped) {
        Ok(Value::String(raw)) => Ok(raw),
        Ok(other) => Err(DecodeError::NotAString { found: json_type_name(&other) }),
        Err(e) => Err(classify_parse_failure(escaped, e)),
    }
}

// Building a Value enforces a number range and a nesting limit that the JSON
// grammar does not, so `1e400` or a deeply nested array can fail here while
// still being well-formed non-string JSON. IgnoredAny only checks the grammar.
fn classify_parse_failure(escaped: &str, err: serde_json::Error) -> DecodeError {
    let well_formed = serde_json::from_str::<IgnoredAny>(escaped).is_ok();
    match first_token_type(escaped) {
        Some(found) if well_formed => DecodeError::NotAString { found },
        _ => DecodeError::MalformedJson { detail: err.to_string() },
    }
}

/// JSON type named by the first token, `None` for strings and anything else.
fn first_token_type(escaped: &str) -> Option<&'static str> {
    let first = escaped
        .trim_start_matches([' ', '\t', '\n', '\r'])
        .bytes()
        .next()?;
    match first {
        b'[' => Some("array"),
        b'{' => Some("object"),
        b't' | b'f' => Some("boolean"),
        b'n' => Some("null"),
        b'-' | b'0'..=b'9' => Some("number"),
        _ => None,
    }
}

/// Encode raw text as a JSON string literal, quotes included.
///
/// Never fails: every string has exactly one encoding.
pub fn encode(raw: &str) -> String {
    // Display on Value goes through the serializer without an error path
    Value::from(raw).to_string()
}

pub fn is_valid(escaped: &str) -> bool {
    decode(escaped).is_ok()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
