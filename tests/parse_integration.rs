//! End-to-end tests for the no-schema parse path, merge, and the reverse
//! transform.

use std::collections::HashMap;

use config_envy::{
    config_to_env, merge, override_config, parse_with_env, ArrayMergeStrategy, MergeOptions, ParseOptions,
};
use serde_json::json;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_single_key_round_trip() {
    let result = parse_with_env(&ParseOptions::new(), &env(&[("REQUEST_TIMEOUT", "30")]));
    assert_eq!(result.ok(), Some(json!({"requestTimeout": 30})));
}

#[test]
fn test_nesting_threshold() {
    let alone = parse_with_env(&ParseOptions::new(), &env(&[("LOG_LEVEL", "debug")]));
    assert_eq!(alone.ok(), Some(json!({"logLevel": "debug"})));

    let shared = parse_with_env(
        &ParseOptions::new(),
        &env(&[("LOG_LEVEL", "debug"), ("LOG_PATH", "/var/log")]),
    );
    assert_eq!(shared.ok(), Some(json!({"log": {"level": "debug", "path": "/var/log"}})));
}

#[test]
fn test_non_nesting_prefix_exception() {
    let result = parse_with_env(
        &ParseOptions::new(),
        &env(&[("MAX_CONNECTIONS", "100"), ("MAX_TIMEOUT", "30")]),
    );
    assert_eq!(result.ok(), Some(json!({"maxConnections": 100, "maxTimeout": 30})));
}

#[test]
fn test_prefix_filtering() {
    let options = ParseOptions::new().with_prefix("APP");
    let result = parse_with_env(&options, &env(&[("APP_PORT", "3000"), ("OTHER", "x")]));
    assert_eq!(result.ok(), Some(json!({"port": 3000})));
}

#[test]
fn test_custom_delimiter_inner_hump() {
    let options = ParseOptions::new().with_delimiter("__");
    let result = parse_with_env(
        &options,
        &env(&[("LOG__FILE_PATH", "/var/log"), ("LOG__MAX_SIZE", "1024")]),
    );
    assert_eq!(result.ok(), Some(json!({"log": {"filePath": "/var/log", "maxSize": 1024}})));
}

#[test]
fn test_empty_input() {
    let result = parse_with_env(&ParseOptions::new(), &env(&[]));
    assert_eq!(result.ok(), Some(json!({})));
}

#[test]
fn test_coercion_across_leaf_types() {
    let result = parse_with_env(
        &ParseOptions::new(),
        &env(&[
            ("RETRY_ENABLED", "yes"),
            ("RETRY_COUNT", "5"),
            ("RETRY_BACKOFF", "1.5"),
            ("RETRY_LABEL", "primary"),
        ]),
    );
    assert_eq!(
        result.ok(),
        Some(json!({
            "retry": {"enabled": true, "count": 5, "backoff": 1.5, "label": "primary"}
        }))
    );
}

#[test]
fn test_bare_key_policy_regression() {
    let result = parse_with_env(&ParseOptions::new(), &env(&[("LOG", "on"), ("LOG_LEVEL", "debug")]));
    assert_eq!(result.ok(), Some(json!({"log": "on", "logLevel": "debug"})));
}

#[test]
fn test_defaults_plus_env_overrides_flow() {
    let defaults = json!({
        "server": {"host": "localhost", "port": 8080},
        "tags": ["base"]
    });
    let from_env = parse_with_env(
        &ParseOptions::new(),
        &env(&[("SERVER_HOST", "prod.example.com"), ("SERVER_TLS", "true")]),
    )
    .expect("no-schema parse cannot fail");

    let merged = override_config(&defaults, &from_env, &MergeOptions::default());
    assert_eq!(
        merged,
        json!({
            "server": {"host": "prod.example.com", "port": 8080, "tls": true},
            "tags": ["base"]
        })
    );
}

#[test]
fn test_merge_array_strategies() {
    let replace = MergeOptions::default();
    assert_eq!(
        merge(&json!({"tags": ["a"]}), &json!({"tags": ["b"]}), &replace),
        json!({"tags": ["b"]})
    );

    let concat = MergeOptions {
        array_merge_strategy: ArrayMergeStrategy::Concat,
    };
    assert_eq!(
        merge(&json!({"tags": ["a"]}), &json!({"tags": ["b"]}), &concat),
        json!({"tags": ["a", "b"]})
    );

    let unique = MergeOptions {
        array_merge_strategy: ArrayMergeStrategy::ConcatUnique,
    };
    assert_eq!(
        merge(&json!({"tags": ["a", "b"]}), &json!({"tags": ["a", "c"]}), &unique),
        json!({"tags": ["a", "b", "c"]})
    );
}

#[test]
fn test_reverse_transform_round_trip() {
    let config = json!({"log": {"filePath": "/var/log", "level": "debug"}});
    let flat = config_to_env(&config, None, "__");
    assert_eq!(flat.get("LOG__FILE_PATH"), Some(&"/var/log".to_string()));
    assert_eq!(flat.get("LOG__LEVEL"), Some(&"debug".to_string()));

    let as_map: HashMap<String, String> = flat.into_iter().collect();
    let reparsed = parse_with_env(&ParseOptions::new().with_delimiter("__"), &as_map);
    assert_eq!(reparsed.ok(), Some(config));
}

#[test]
fn test_parse_is_deterministic() {
    let map = env(&[("LOG_LEVEL", "debug"), ("LOG_PATH", "/var/log"), ("PORT", "3000")]);
    let first = parse_with_env(&ParseOptions::new(), &map).ok();
    for _ in 0..5 {
        assert_eq!(parse_with_env(&ParseOptions::new(), &map).ok(), first);
    }
}
