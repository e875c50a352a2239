//! Nested object construction.

use serde_json::{Map, Value};

/// Write `value` into `root` at `path`, creating intermediate objects.
///
/// Any non-object value found at an intermediate position is overwritten
/// with a fresh object. An empty path is a no-op. Never fails.
pub fn set_nested_value(root: &mut Value, path: &[String], value: Value) {
    let Some((last, intermediates)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for segment in intermediates {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Some(map) = current.as_object_mut() else {
            return;
        };
        let child = map.entry(segment.clone()).or_insert(Value::Null);
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        current = child;
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Some(map) = current.as_object_mut() {
        map.insert(last.clone(), value);
    }
}
