//! Deep merge with configurable array combination.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How array-valued leaves combine when both sides carry an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrayMergeStrategy {
    /// Overlay's array entirely replaces base's.
    #[default]
    Replace,
    /// Base array followed by overlay array, duplicates retained.
    Concat,
    /// Concatenation with duplicates removed, first occurrence order kept.
    ConcatUnique,
}

/// Options for [`merge`] and [`override_config`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    pub array_merge_strategy: ArrayMergeStrategy,
}

/// Deep-merge `overlay` onto `base`, returning a new tree.
///
/// Objects recurse key-by-key over the union of keys; arrays combine per the
/// configured strategy; for scalars, mismatched types, or keys present on
/// only one side, the overlay's value wins when present. Neither input is
/// mutated.
pub fn merge(base: &Value, overlay: &Value, options: &MergeOptions) -> Value {
    match overlay {
        Value::Array(overlay_items) => match (base, options.array_merge_strategy) {
            (Value::Array(base_items), ArrayMergeStrategy::Concat) => {
                Value::Array(base_items.iter().chain(overlay_items).cloned().collect())
            }
            (Value::Array(base_items), ArrayMergeStrategy::ConcatUnique) => {
                let mut merged: Vec<Value> = Vec::with_capacity(base_items.len() + overlay_items.len());
                for item in base_items.iter().chain(overlay_items) {
                    if !merged.contains(item) {
                        merged.push(item.clone());
                    }
                }
                Value::Array(merged)
            }
            _ => overlay.clone(),
        },

        Value::Object(overlay_map) => {
            let mut result = match base {
                Value::Object(base_map) => base_map.clone(),
                _ => Map::new(),
            };
            for (key, value) in overlay_map {
                let merged = match result.get(key) {
                    Some(base_value) => merge(base_value, value, options),
                    None => value.clone(),
                };
                result.insert(key.clone(), merged);
            }
            Value::Object(result)
        }

        _ => overlay.clone(),
    }
}

/// Apply `overrides` on top of `defaults`.
///
/// Defaults-first argument order for call sites that read naturally that
/// way; the recursion is identical to [`merge`] and the second argument's
/// scalars always win.
pub fn override_config(defaults: &Value, overrides: &Value, options: &MergeOptions) -> Value {
    merge(defaults, overrides, options)
}
