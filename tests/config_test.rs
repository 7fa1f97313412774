use chatmark::config::{ChatmarkConfig, load_from, validate};
use std::path::PathBuf;

fn tmp_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "chatmark-{name}-{}.toml",
        std::process::id()
    ));
    std::fs::write(&path, content).expect("write temp config");
    path
}

#[test]
fn default_config_has_sensible_values() {
    let config = ChatmarkConfig::default();
    assert_eq!(config.gateway.port, 7300);
    assert_eq!(config.gateway.bind, "127.0.0.1");
    assert_eq!(config.gateway.max_content_length, 1024 * 1024);
    assert_eq!(config.gateway.cors_origins, vec!["*"]);
    assert!(config.rate_limit.enabled);
    assert_eq!(config.rate_limit.requests_per_minute, 30);
    assert!(!config.markdown.ordered_list_container);
    assert!(!config.markdown.merge_blockquotes);
    assert!(validate(&config).is_ok());
}

#[test]
fn valid_toml_parses_successfully() {
    let toml_str = r#"
[gateway]
port = 8080
bind = "0.0.0.0"
max_content_length = 4096
cors_origins = ["https://chat.example.com"]

[rate_limit]
enabled = false
requests_per_minute = 5

[markdown]
ordered_list_container = true
merge_blockquotes = true
"#;

    let config: ChatmarkConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.gateway.bind, "0.0.0.0");
    assert_eq!(config.gateway.max_content_length, 4096);
    assert_eq!(config.gateway.cors_origins, vec!["https://chat.example.com"]);
    assert!(!config.rate_limit.enabled);
    assert_eq!(config.rate_limit.requests_per_minute, 5);
    assert!(config.markdown.ordered_list_container);
    assert!(config.markdown.merge_blockquotes);
}

#[test]
fn partial_config_uses_defaults_for_missing_fields() {
    let toml_str = r#"
[gateway]
port = 9000

[markdown]
merge_blockquotes = true
"#;

    let config: ChatmarkConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.gateway.bind, "127.0.0.1");
    assert_eq!(config.rate_limit.requests_per_minute, 30);
    assert!(config.markdown.merge_blockquotes);
    assert!(!config.markdown.ordered_list_container);
}

#[test]
fn empty_toml_uses_all_defaults() {
    let config: ChatmarkConfig = toml::from_str("").unwrap();
    assert_eq!(config.gateway.port, 7300);
    assert!(config.rate_limit.enabled);
}

#[test]
fn malformed_toml_returns_parse_error() {
    let result = toml::from_str::<ChatmarkConfig>("this is not valid toml {{{");
    assert!(result.is_err());
    let err = result.unwrap_err().to_string();
    assert!(
        err.contains("expected") || err.contains("invalid"),
        "error should be descriptive: {err}"
    );
}

#[test]
fn missing_config_file_uses_defaults() {
    let path = std::env::temp_dir().join("chatmark-nonexistent-config.toml");
    let config = load_from(&path).unwrap();
    assert_eq!(config.gateway.port, 7300);
}

#[test]
fn config_file_is_loaded() {
    let path = tmp_config(
        "load",
        r#"
[gateway]
port = 9999

[rate_limit]
requests_per_minute = 120
"#,
    );

    let result = load_from(&path);
    std::fs::remove_file(&path).ok();

    let config = result.unwrap();
    assert_eq!(config.gateway.port, 9999);
    assert_eq!(config.rate_limit.requests_per_minute, 120);
}

#[test]
fn invalid_config_file_is_rejected() {
    let path = tmp_config(
        "invalid",
        r#"
[rate_limit]
enabled = true
requests_per_minute = 0
"#,
    );

    let result = load_from(&path);
    std::fs::remove_file(&path).ok();

    let err = result.expect_err("zero rpm must fail validation");
    assert!(err.to_string().contains("requests_per_minute"));
}

#[test]
fn unparsable_config_file_names_the_path() {
    let path = tmp_config("broken", "[gateway\nport = ");

    let result = load_from(&path);
    std::fs::remove_file(&path).ok();

    let err = result.expect_err("broken toml must fail");
    assert!(err.to_string().contains("invalid config at"));
}
