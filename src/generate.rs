//! Reverse transform: config tree → flat environment map.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::case::to_screaming_snake;

/// Flatten a config tree into SCREAMING_SNAKE_CASE environment keys.
///
/// Nested objects join their converted segments with the delimiter; an
/// optional prefix (trailing delimiter tolerated) prepends every key.
/// Booleans render as `true`/`false`, numbers in display form, strings
/// verbatim; arrays and nulls serialize as compact JSON text. Output order
/// is sorted, so the result is deterministic.
pub fn config_to_env(config: &Value, prefix: Option<&str>, delimiter: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    let Some(map) = config.as_object() else {
        return out;
    };

    let prefix = match prefix {
        Some(p) if !p.is_empty() => {
            let trimmed = if delimiter.is_empty() {
                p
            } else {
                p.strip_suffix(delimiter).unwrap_or(p)
            };
            // Prefixes are conventionally SCREAMING already; only convert
            // ones that carry lowercase.
            if trimmed.chars().any(|c| c.is_lowercase()) {
                Some(to_screaming_snake(trimmed))
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    };

    for (key, value) in map {
        let name = match &prefix {
            Some(p) => format!("{}{}{}", p, delimiter, to_screaming_snake(key)),
            None => to_screaming_snake(key),
        };
        flatten_value(&name, value, delimiter, &mut out);
    }
    out
}

fn flatten_value(name: &str, value: &Value, delimiter: &str, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_name = format!("{}{}{}", name, delimiter, to_screaming_snake(key));
                flatten_value(&child_name, child, delimiter, out);
            }
        }
        Value::String(s) => {
            out.insert(name.to_string(), s.clone());
        }
        Value::Bool(b) => {
            out.insert(name.to_string(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(name.to_string(), n.to_string());
        }
        Value::Array(_) | Value::Null => {
            out.insert(name.to_string(), value.to_string());
        }
    }
}
