//! Parse entry points and options.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::builder::set_nested_value;
use crate::case::group_to_camel_case;
use crate::coerce::coerce_value;
use crate::error::EnvyError;
use crate::key::{split_key, strip_prefix};
use crate::nesting::build_without_schema;
use crate::resolve::resolve_against_paths;
use crate::schema::EnvSchema;

const DEFAULT_DELIMITER: &str = "_";
const DEFAULT_NON_NESTING_PREFIXES: &[&str] = &["max", "min", "is", "enable", "disable"];

/// Options for one parse call. Builder-style construction:
///
/// ```
/// use config_envy::ParseOptions;
///
/// let options = ParseOptions::new()
///     .with_prefix("APP")
///     .with_delimiter("__");
/// ```
pub struct ParseOptions {
    pub(crate) prefix: Option<String>,
    pub(crate) delimiter: String,
    pub(crate) coerce: bool,
    pub(crate) schema: Option<Box<dyn EnvSchema>>,
    pub(crate) non_nesting_prefixes: Vec<String>,
    pub(crate) include: Vec<String>,
    pub(crate) exclude: Vec<String>,
    pub(crate) env_override: Option<HashMap<String, String>>,
}

impl ParseOptions {
    /// Create options with default settings: delimiter `_`, coercion on,
    /// no prefix, no schema, default non-nesting prefixes.
    pub fn new() -> Self {
        Self {
            prefix: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
            coerce: true,
            schema: None,
            non_nesting_prefixes: DEFAULT_NON_NESTING_PREFIXES.iter().map(|s| s.to_string()).collect(),
            include: Vec::new(),
            exclude: Vec::new(),
            env_override: None,
        }
    }

    /// Only keys beginning with `prefix + delimiter` participate.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Set the segment delimiter (default `_`).
    pub fn with_delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = delimiter.to_string();
        self
    }

    /// Enable or disable scalar coercion (default enabled). When disabled,
    /// every leaf stays a raw string.
    pub fn with_coercion(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    /// Resolve keys against a schema and validate the result against it.
    /// The non-nesting prefix list is ignored when a schema is set.
    pub fn with_schema(mut self, schema: impl EnvSchema + 'static) -> Self {
        self.schema = Some(Box::new(schema));
        self
    }

    /// Replace the non-nesting prefix list (first segments that never
    /// become object nodes).
    pub fn with_non_nesting_prefixes(mut self, prefixes: &[&str]) -> Self {
        self.non_nesting_prefixes = prefixes.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Only emit fields whose flat camelCase name contains one of these
    /// substrings. Takes precedence over the exclude list.
    pub fn with_include(mut self, substrings: &[&str]) -> Self {
        self.include = substrings.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Skip fields whose flat camelCase name contains one of these
    /// substrings.
    pub fn with_exclude(mut self, substrings: &[&str]) -> Self {
        self.exclude = substrings.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Parse this map instead of the ambient process environment.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env_override = Some(env);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the process environment (or the map set via
/// [`ParseOptions::with_env`]) into a config tree.
///
/// This outermost entry point is the crate's only ambient-state touchpoint:
/// when no explicit map was supplied it snapshots `std::env::vars()` and
/// hands the snapshot to [`parse_with_env`].
pub fn parse(options: &ParseOptions) -> Result<Value, EnvyError> {
    match &options.env_override {
        Some(env) => parse_with_env(options, env),
        None => {
            let env: HashMap<String, String> = std::env::vars().collect();
            parse_with_env(options, &env)
        }
    }
}

/// Parse an explicit env map into a config tree.
///
/// Without a schema, nesting follows the shared-first-segment heuristic;
/// with one, keys resolve against the schema's leaf paths and the final
/// tree is validated (failing atomically on mismatch).
pub fn parse_with_env(options: &ParseOptions, env: &HashMap<String, String>) -> Result<Value, EnvyError> {
    match &options.schema {
        Some(schema) => build_with_schema(env, options, schema.as_ref()),
        None => Ok(build_without_schema(env, options)),
    }
}

fn build_with_schema(
    env: &HashMap<String, String>,
    options: &ParseOptions,
    schema: &dyn EnvSchema,
) -> Result<Value, EnvyError> {
    let lookup: HashMap<String, Vec<String>> = schema
        .leaf_paths()
        .into_iter()
        .map(|leaf| (leaf.dotted, leaf.segments))
        .collect();

    let mut keys: Vec<&String> = env.keys().collect();
    keys.sort();

    let mut root = Value::Object(Map::new());
    for key in keys {
        let Some(stripped) = strip_prefix(key, options.prefix.as_deref(), &options.delimiter) else {
            continue;
        };
        let segments = split_key(&stripped, &options.delimiter);
        if segments.is_empty() {
            continue;
        }

        let flat_name = group_to_camel_case(&segments);
        if !passes_filters(&flat_name, &options.include, &options.exclude) {
            continue;
        }
        let value = if options.coerce {
            coerce_value(&env[key])
        } else {
            Value::String(env[key].clone())
        };

        match resolve_against_paths(&segments, &lookup) {
            Some(path) => set_nested_value(&mut root, &path, value),
            // Unknown keys land flat at the root so validation surfaces
            // them instead of silently dropping them.
            None => set_nested_value(&mut root, &[flat_name], value),
        }
    }

    schema.validate(&root)
}

/// Substring filtering on the flat camelCase collapse of a key.
///
/// An include match always emits; a non-empty include list with no match
/// skips; otherwise an exclude match skips. Case-insensitive.
pub(crate) fn passes_filters(name: &str, include: &[String], exclude: &[String]) -> bool {
    let lower = name.to_lowercase();
    if include.iter().any(|s| lower.contains(&s.to_lowercase())) {
        return true;
    }
    if !include.is_empty() {
        return false;
    }
    !exclude.iter().any(|s| lower.contains(&s.to_lowercase()))
}
