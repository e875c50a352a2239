//! Schema abstraction for schema-guided resolution and validation.
//!
//! The resolver and parse entry points only ever see the [`EnvSchema`]
//! capability trait: a set of leaf paths plus a validate operation. The
//! bundled [`JsonSchemaDoc`] adapter speaks JSON Schema (hand-written
//! documents or ones derived from Rust types via `schemars`); any other
//! validation library can plug in by implementing the trait.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde_json::{Map, Value};

use crate::case::field_to_camel_case;
use crate::error::{EnvyError, ValidationIssue};

const MAX_SCHEMA_DEPTH: usize = 32;

/// One terminal (non-object) field position inside a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafPath {
    /// camelCase property names from the root down to the leaf.
    pub segments: Vec<String>,
    /// The dot-joined lookup key, e.g. `database.connection.host`.
    pub dotted: String,
}

/// Capability interface the schema-guided resolver works against.
pub trait EnvSchema {
    /// Every valid leaf position in the schema.
    fn leaf_paths(&self) -> Vec<LeafPath>;

    /// Validate a resolved config tree, returning the validated tree with
    /// declared defaults filled in. All failures are collected into one
    /// error; no partial tree is returned alongside it.
    fn validate(&self, value: &Value) -> Result<Value, EnvyError>;
}

/// [`EnvSchema`] adapter over a JSON Schema document.
///
/// Understands the document subset `schemars` derives from plain structs:
/// `properties`/`required`/`type`/`enum`/`default`, numeric and string
/// bounds, local `$ref` into `definitions` or `$defs`, and the
/// optional/nullable wrappers (`anyOf` with a null arm, single-arm `allOf`).
pub struct JsonSchemaDoc {
    doc: Value,
}

impl JsonSchemaDoc {
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }

    /// Derive the document from a Rust type.
    pub fn from_type<T: JsonSchema>() -> Self {
        let schema = schemars::schema_for!(T);
        Self {
            doc: serde_json::to_value(&schema).unwrap_or_default(),
        }
    }

    /// Report JSON Schema keywords this adapter does not interpret.
    ///
    /// Advisory only; [`EnvSchema::validate`] ignores unknown keywords
    /// rather than failing on them.
    pub fn unsupported_features(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        collect_unsupported(&self.doc, "#", &mut issues, 0);
        issues
    }
}

impl EnvSchema for JsonSchemaDoc {
    fn leaf_paths(&self) -> Vec<LeafPath> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        collect_leaf_paths(&self.doc, &self.doc, &mut path, &mut out, 0);
        out
    }

    fn validate(&self, value: &Value) -> Result<Value, EnvyError> {
        let mut issues = Vec::new();
        let validated = validate_node(&self.doc, &self.doc, value, "", &mut issues, 0);
        if issues.is_empty() {
            Ok(validated)
        } else {
            Err(EnvyError::Validation { issues })
        }
    }
}

/// Follow `$ref`, single-arm `allOf`, and nullable `anyOf`/`oneOf` wrappers
/// down to the schema node that describes the actual shape.
fn resolve_node<'a>(node: &'a Value, root: &'a Value) -> &'a Value {
    let mut current = node;
    for _ in 0..MAX_SCHEMA_DEPTH {
        if let Some(target) = current.get("$ref").and_then(Value::as_str) {
            match resolve_ref(target, root) {
                Some(resolved) => {
                    current = resolved;
                    continue;
                }
                None => return current,
            }
        }

        if let Some(arms) = current.get("allOf").and_then(Value::as_array) {
            if arms.len() == 1 {
                current = &arms[0];
                continue;
            }
        }

        let mut inner = None;
        for key in ["anyOf", "oneOf"] {
            if let Some(arms) = current.get(key).and_then(Value::as_array) {
                let non_null: Vec<&Value> = arms.iter().filter(|arm| !is_null_schema(arm)).collect();
                if non_null.len() == 1 {
                    inner = Some(non_null[0]);
                }
            }
        }
        match inner {
            Some(node) => current = node,
            None => break,
        }
    }
    current
}

fn is_null_schema(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("null")
}

fn resolve_ref<'a>(target: &str, root: &'a Value) -> Option<&'a Value> {
    let name = target
        .strip_prefix("#/definitions/")
        .or_else(|| target.strip_prefix("#/$defs/"))?;
    root.get("definitions")
        .and_then(|defs| defs.get(name))
        .or_else(|| root.get("$defs").and_then(|defs| defs.get(name)))
}

fn collect_leaf_paths(node: &Value, root: &Value, path: &mut Vec<String>, out: &mut Vec<LeafPath>, depth: usize) {
    if depth > MAX_SCHEMA_DEPTH {
        return;
    }
    let node = resolve_node(node, root);
    match node.get("properties").and_then(Value::as_object) {
        Some(props) => {
            for (name, child) in props {
                path.push(field_to_camel_case(name));
                collect_leaf_paths(child, root, path, out, depth + 1);
                path.pop();
            }
        }
        None => {
            if !path.is_empty() {
                out.push(LeafPath {
                    dotted: path.join("."),
                    segments: path.clone(),
                });
            }
        }
    }
}

fn validate_node(
    schema: &Value,
    root: &Value,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
    depth: usize,
) -> Value {
    if depth > MAX_SCHEMA_DEPTH {
        return value.clone();
    }
    let schema = resolve_node(schema, root);

    if let Some(expected) = schema.get("type") {
        let allowed = type_names(expected);
        if !allowed.is_empty() && !allowed.iter().any(|t| value_matches_type(value, t)) {
            issues.push(ValidationIssue::new(
                path,
                format!("expected {}, got {}", allowed.join(" or "), type_name(value)),
            ));
            return value.clone();
        }
    }

    if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            issues.push(ValidationIssue::new(
                path,
                format!("{} is not one of the allowed values", value),
            ));
        }
    }

    if let Some(n) = value.as_f64() {
        check_numeric_bounds(schema, n, path, issues);
    }

    if let Some(s) = value.as_str() {
        check_string_bounds(schema, s, path, issues);
    }

    if let (Some(props), Some(obj)) = (schema.get("properties").and_then(Value::as_object), value.as_object()) {
        return validate_object(schema, props, root, obj, path, issues, depth);
    }

    value.clone()
}

fn validate_object(
    schema: &Value,
    props: &Map<String, Value>,
    root: &Value,
    obj: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
    depth: usize,
) -> Value {
    let mut result = Map::new();
    let mut known: HashSet<String> = HashSet::new();

    for (name, child_schema) in props {
        let field = field_to_camel_case(name);
        let child_path = join_path(path, &field);
        match obj.get(&field) {
            Some(child) => {
                let validated = validate_node(child_schema, root, child, &child_path, issues, depth + 1);
                result.insert(field.clone(), validated);
            }
            None => {
                if let Some(default) = resolve_node(child_schema, root).get("default") {
                    result.insert(field.clone(), default.clone());
                }
            }
        }
        known.insert(field);
    }

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            let field = field_to_camel_case(name);
            if !result.contains_key(&field) {
                issues.push(ValidationIssue::new(path, format!("missing required field \"{}\"", field)));
            }
        }
    }

    // Unknown keys are violations unless additionalProperties admits them;
    // this is how unresolvable env keys surface instead of being dropped.
    let additional_allowed = matches!(
        schema.get("additionalProperties"),
        Some(Value::Bool(true)) | Some(Value::Object(_))
    );
    for (key, child) in obj {
        if !known.contains(key) {
            if additional_allowed {
                result.insert(key.clone(), child.clone());
            } else {
                issues.push(ValidationIssue::new(&join_path(path, key), "unknown field"));
            }
        }
    }

    Value::Object(result)
}

fn check_numeric_bounds(schema: &Value, n: f64, path: &str, issues: &mut Vec<ValidationIssue>) {
    if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
        if n < min {
            issues.push(ValidationIssue::new(path, format!("{} is below minimum {}", n, min)));
        }
    }
    if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
        if n > max {
            issues.push(ValidationIssue::new(path, format!("{} is above maximum {}", n, max)));
        }
    }
    if let Some(min) = schema.get("exclusiveMinimum").and_then(Value::as_f64) {
        if n <= min {
            issues.push(ValidationIssue::new(path, format!("{} must be greater than {}", n, min)));
        }
    }
    if let Some(max) = schema.get("exclusiveMaximum").and_then(Value::as_f64) {
        if n >= max {
            issues.push(ValidationIssue::new(path, format!("{} must be less than {}", n, max)));
        }
    }
}

fn check_string_bounds(schema: &Value, s: &str, path: &str, issues: &mut Vec<ValidationIssue>) {
    let len = s.chars().count() as u64;
    if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
        if len < min {
            issues.push(ValidationIssue::new(path, format!("length {} is below minLength {}", len, min)));
        }
    }
    if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
        if len > max {
            issues.push(ValidationIssue::new(path, format!("length {} is above maxLength {}", len, max)));
        }
    }
}

fn type_names(expected: &Value) -> Vec<String> {
    match expected {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).map(String::from).collect(),
        _ => Vec::new(),
    }
}

fn value_matches_type(value: &Value, type_name: &str) -> bool {
    match type_name {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

const UNINTERPRETED_KEYWORDS: &[&str] = &[
    "if",
    "then",
    "else",
    "not",
    "pattern",
    "patternProperties",
    "propertyNames",
    "dependencies",
    "dependentSchemas",
    "contains",
    "prefixItems",
    "unevaluatedProperties",
    "unevaluatedItems",
];

fn collect_unsupported(node: &Value, path: &str, issues: &mut Vec<ValidationIssue>, depth: usize) {
    if depth > MAX_SCHEMA_DEPTH {
        return;
    }
    let Some(obj) = node.as_object() else {
        return;
    };

    for key in obj.keys() {
        if UNINTERPRETED_KEYWORDS.contains(&key.as_str()) {
            issues.push(ValidationIssue::new(path, format!("keyword \"{}\" is not interpreted", key)));
        }
    }

    if let Some(props) = obj.get("properties").and_then(Value::as_object) {
        for (name, child) in props {
            collect_unsupported(child, &format!("{}/properties/{}", path, name), issues, depth + 1);
        }
    }
    if let Some(items) = obj.get("items") {
        collect_unsupported(items, &format!("{}/items", path), issues, depth + 1);
    }
    for comp in ["anyOf", "oneOf", "allOf"] {
        if let Some(arms) = obj.get(comp).and_then(Value::as_array) {
            for (i, arm) in arms.iter().enumerate() {
                collect_unsupported(arm, &format!("{}/{}/{}", path, comp, i), issues, depth + 1);
            }
        }
    }
    for defs_key in ["definitions", "$defs"] {
        if let Some(defs) = obj.get(defs_key).and_then(Value::as_object) {
            for (name, child) in defs {
                collect_unsupported(child, &format!("{}/{}/{}", path, defs_key, name), issues, depth + 1);
            }
        }
    }
}
