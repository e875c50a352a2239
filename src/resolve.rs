//! Schema-guided key resolution via consecutive segment grouping.

use std::collections::HashMap;

use crate::case::group_to_camel_case;

/// Grouping enumeration is `2^(n-1)` per key; keys deeper than this are not
/// searched and fall back to a flat name.
const MAX_GROUPABLE_SEGMENTS: usize = 16;

/// Find the schema path a segmented key resolves to, if any.
///
/// Enumerates every way of grouping the ordered segments into consecutive
/// runs (each inter-segment boundary is a binary choice), fewest groups
/// first with earlier boundaries breaking ties, converts each grouping to a
/// dotted camelCase path, and returns the first one present in `lookup`.
pub fn resolve_against_paths(segments: &[String], lookup: &HashMap<String, Vec<String>>) -> Option<Vec<String>> {
    let n = segments.len();
    if n == 0 || n > MAX_GROUPABLE_SEGMENTS || lookup.is_empty() {
        return None;
    }

    let mut masks: Vec<u32> = (0..(1u32 << (n - 1))).collect();
    masks.sort_by_key(|mask| (mask.count_ones(), *mask));

    for mask in masks {
        let grouped = group_segments(segments, mask);
        if let Some(path) = lookup.get(&grouped.join(".")) {
            return Some(path.clone());
        }
    }
    None
}

/// Bit `i` of `mask` set means segment `i + 1` starts a new group.
fn group_segments(segments: &[String], mask: u32) -> Vec<String> {
    let mut groups: Vec<Vec<&str>> = vec![vec![segments[0].as_str()]];
    for (i, segment) in segments.iter().enumerate().skip(1) {
        if mask & (1 << (i - 1)) != 0 {
            groups.push(vec![segment.as_str()]);
        } else if let Some(last) = groups.last_mut() {
            last.push(segment.as_str());
        }
    }
    groups.iter().map(|group| group_to_camel_case(group)).collect()
}
