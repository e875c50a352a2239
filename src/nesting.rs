//! Nesting inference for schema-less parsing.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::builder::set_nested_value;
use crate::case::{group_to_camel_case, to_camel_case};
use crate::coerce::coerce_value;
use crate::key::{split_key, strip_prefix};
use crate::parse::{passes_filters, ParseOptions};

struct ParsedEntry {
    segments: Vec<String>,
    raw_value: String,
}

/// Build a config tree from an env map without a schema.
///
/// A first segment becomes an object node only when more than one key shares
/// it (compared lower-cased). Groups whose first segment is in the
/// non-nesting list always flatten, as do groups containing a bare
/// single-segment key: the bare key would otherwise collide with the node,
/// so the bare key wins and nesting is suppressed for the whole group.
pub fn build_without_schema(env: &HashMap<String, String>, options: &ParseOptions) -> Value {
    let mut entries: Vec<ParsedEntry> = Vec::new();
    let mut group_counts: HashMap<String, usize> = HashMap::new();
    let mut bare_groups: HashSet<String> = HashSet::new();

    let mut keys: Vec<&String> = env.keys().collect();
    keys.sort();

    for key in keys {
        let Some(stripped) = strip_prefix(key, options.prefix.as_deref(), &options.delimiter) else {
            continue;
        };
        let segments = split_key(&stripped, &options.delimiter);
        if segments.is_empty() {
            continue;
        }
        let head = segments[0].to_lowercase();
        *group_counts.entry(head.clone()).or_insert(0) += 1;
        if segments.len() == 1 {
            bare_groups.insert(head);
        }
        entries.push(ParsedEntry {
            segments,
            raw_value: env[key].clone(),
        });
    }

    let mut root = Value::Object(Map::new());
    for entry in &entries {
        let head = entry.segments[0].to_lowercase();
        let count = group_counts.get(&head).copied().unwrap_or(1);
        let flatten = count == 1
            || bare_groups.contains(&head)
            || options
                .non_nesting_prefixes
                .iter()
                .any(|prefix| prefix.eq_ignore_ascii_case(&head));

        let flat_name = group_to_camel_case(&entry.segments);
        if !passes_filters(&flat_name, &options.include, &options.exclude) {
            continue;
        }
        let value = if options.coerce {
            coerce_value(&entry.raw_value)
        } else {
            Value::String(entry.raw_value.clone())
        };

        if flatten {
            set_nested_value(&mut root, &[flat_name], value);
        } else {
            let path: Vec<String> = entry.segments.iter().map(|s| to_camel_case(s)).collect();
            set_nested_value(&mut root, &path, value);
        }
    }
    root
}
