use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use mdsnips_server::config::{Config, ConfigError};

fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|var| vars.get(var).cloned())
}

#[test]
fn defaults_apply_when_unset() {
    let config = load(&[]).unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.index_dir, Some(PathBuf::from("./data/index")));
    assert_eq!(config.store_timeout, Duration::from_secs(5));
    assert_eq!(config.rate_limit.max_requests, 5);
    assert_eq!(config.rate_limit.window, Duration::from_secs(60));
    assert!(config.basic_auth.is_none());
    assert!(!config.force_https);
}

#[test]
fn overrides_are_parsed() {
    let config = load(&[
        ("MDSNIPS_PORT", "8080"),
        ("MDSNIPS_INDEX_DIR", ""),
        ("MDSNIPS_STORE_TIMEOUT_SECS", "2"),
        ("MDSNIPS_USER", "admin"),
        ("MDSNIPS_PASS", "secret"),
        ("MDSNIPS_RATE_LIMIT", "50"),
        ("ENV", "PROD"),
    ])
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.index_dir, None);
    assert_eq!(config.store_timeout, Duration::from_secs(2));
    assert_eq!(config.basic_auth.unwrap().user, "admin");
    assert_eq!(config.rate_limit.max_requests, 50);
    assert!(config.force_https);
}

#[test]
fn invalid_number_names_the_variable() {
    let err = load(&[("MDSNIPS_PORT", "eighty")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { var: "MDSNIPS_PORT", .. }));
}

#[test]
fn half_configured_basic_auth_is_rejected() {
    let err = load(&[("MDSNIPS_USER", "admin")]).unwrap_err();
    assert!(matches!(err, ConfigError::IncompleteBasicAuth));
}
