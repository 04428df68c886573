//! Value normalization
//!
//! Maps every `TypedValue` into a JSON-safe `serde_json::Value`. The
//! match is exhaustive: a new `TypedValue` variant will not compile
//! until this function handles it.
//!
//! Mapping rules:
//! - null, boolean, integer and text pass through;
//! - floats pass through, except non-finite values which have no JSON
//!   representation and become null;
//! - blobs become standard base64 text (padded);
//! - timestamps become RFC 3339 UTC text with microsecond precision;
//! - geographic points become `{"lat": .., "lng": ..}`;
//! - references become their `"Kind:id/Kind:id"` path string;
//! - embedded entities and lists recurse, preserving order.
//!
//! Normalization never mutates its input and is idempotent on values
//! already in JSON-safe leaf form.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::SecondsFormat;
use serde_json::{json, Map, Value};

use crate::entity::TypedValue;

/// Normalizes one typed value into a JSON-safe value.
pub fn normalize(value: &TypedValue) -> Value {
    match value {
        TypedValue::Null => Value::Null,
        TypedValue::Boolean(b) => Value::Bool(*b),
        TypedValue::Integer(n) => Value::from(*n),
        TypedValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        TypedValue::Text(s) => Value::String(s.clone()),
        TypedValue::Blob(bytes) => Value::String(STANDARD.encode(bytes)),
        TypedValue::Timestamp(instant) => {
            Value::String(instant.to_rfc3339_opts(SecondsFormat::Micros, true))
        }
        TypedValue::GeoPoint { lat, lng } => json!({ "lat": lat, "lng": lng }),
        TypedValue::Reference(key) => Value::String(key.path_string()),
        TypedValue::Entity(properties) => Value::Object(normalize_properties(properties)),
        TypedValue::List(items) => Value::Array(items.iter().map(normalize).collect()),
    }
}

/// Normalizes an ordered property map, preserving property order.
pub fn normalize_properties(properties: &[(String, TypedValue)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, value) in properties {
        map.insert(name.clone(), normalize(value));
    }
    map
}
