//! Environment variable to nested configuration mapping.
//!
//! Parses flat SCREAMING_SNAKE_CASE env maps into nested camelCase config
//! trees, with smart nesting inference, optional schema-guided resolution
//! and validation, scalar coercion, deep merge, and the reverse transform
//! back to flat env keys.

pub mod builder;
pub mod case;
pub mod coerce;
pub mod error;
pub mod generate;
pub mod key;
pub mod merge;
pub mod nesting;
pub mod parse;
pub mod resolve;
pub mod schema;

pub use builder::set_nested_value;
pub use case::{field_to_camel_case, group_to_camel_case, to_camel_case, to_screaming_snake};
pub use coerce::coerce_value;
pub use error::{EnvyError, ValidationIssue};
pub use generate::config_to_env;
pub use merge::{merge, override_config, ArrayMergeStrategy, MergeOptions};
pub use parse::{parse, parse_with_env, ParseOptions};
pub use resolve::resolve_against_paths;
pub use schema::{EnvSchema, JsonSchemaDoc, LeafPath};
