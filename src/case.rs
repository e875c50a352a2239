//! Case conversion between SCREAMING_SNAKE_CASE and camelCase.

/// Convert a SCREAMING_SNAKE_CASE (or snake_case) name to camelCase.
///
/// Lower-cases the whole input, then upper-cases the letter following every
/// underscore, removing the underscore. Works at whole-key granularity and
/// at single-segment granularity (a delimiter-split segment may still carry
/// inner underscores when the configured delimiter is multi-character, e.g.
/// `FILE_PATH` inside `LOG__FILE_PATH`).
pub fn to_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = false;
    for ch in input.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Convert a camelCase name to SCREAMING_SNAKE_CASE.
///
/// Inserts `_` before every uppercase letter, upper-cases the result, and
/// strips a leading underscore if one was produced.
pub fn to_screaming_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for ch in input.chars() {
        if ch.is_uppercase() {
            out.push('_');
            out.push(ch);
        } else {
            out.extend(ch.to_uppercase());
        }
    }
    if out.starts_with('_') {
        out.remove(0);
    }
    out
}

/// Collapse a run of raw segments into a single camelCase identifier.
///
/// The first segment converts with a lower-case initial; every subsequent
/// segment is capitalized and concatenated. `["LOG", "FILE_PATH"]` becomes
/// `logFilePath`.
pub fn group_to_camel_case<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for segment in segments {
        let camel = to_camel_case(segment.as_ref());
        if out.is_empty() {
            out.push_str(&camel);
        } else {
            out.push_str(&capitalize_first(&camel));
        }
    }
    out
}

/// Normalize a schema property name to camelCase.
///
/// Schema documents derived from Rust structs carry snake_case field names;
/// hand-written documents usually carry camelCase already. Names containing
/// underscores or written in all-caps convert; anything else passes through.
pub fn field_to_camel_case(name: &str) -> String {
    if name.contains('_') || !name.chars().any(|c| c.is_lowercase()) {
        to_camel_case(name)
    } else {
        name.to_string()
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
