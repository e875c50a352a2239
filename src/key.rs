//! Environment key segmentation and prefix handling.

/// Strip a configured prefix (plus the delimiter that follows it) from a key.
///
/// Returns `None` when a prefix is configured and the key does not start
/// with `prefix + delimiter`; such keys do not participate in the parse. A
/// trailing delimiter on the prefix option itself is tolerated, so `"APP"`
/// and `"APP_"` behave the same with delimiter `"_"`. With no prefix
/// configured the key passes through unchanged. Matching is
/// case-insensitive, like every other key comparison in this crate.
pub fn strip_prefix(key: &str, prefix: Option<&str>, delimiter: &str) -> Option<String> {
    let prefix = match prefix {
        Some(p) if !p.is_empty() => p,
        _ => return Some(key.to_string()),
    };

    let full = if delimiter.is_empty() || prefix.ends_with(delimiter) {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, delimiter)
    };

    match key.get(..full.len()) {
        Some(head) if head.eq_ignore_ascii_case(&full) => Some(key[full.len()..].to_string()),
        _ => None,
    }
}

/// Split a key into segments on the delimiter, dropping empty segments.
///
/// Leading, trailing, and doubled delimiters therefore cannot produce empty
/// segments. An empty delimiter degenerates to a single whole-key segment.
/// Callers discard keys that split to zero segments.
pub fn split_key(key: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        if key.is_empty() {
            return Vec::new();
        }
        return vec![key.to_string()];
    }
    key.split(delimiter)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
