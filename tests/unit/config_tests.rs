//! Unit tests for configuration parsing and validation.

use std::path::PathBuf;

use taskbuddy::config::GlobalConfig;
use taskbuddy::AppError;

#[test]
fn empty_toml_yields_defaults() {
    let config = GlobalConfig::from_toml_str("").expect("valid config");

    assert_eq!(config.http_port, 8080);
    assert_eq!(config.db_path, PathBuf::from("data/tasks.db"));
    assert!(config.authorized_user_ids.is_empty());
    assert_eq!(config.upload.dir, PathBuf::from("data/uploads"));
    assert_eq!(config.upload.max_upload_bytes, 5 * 1024 * 1024);
}

#[test]
fn full_toml_round_trips() {
    let toml = r#"
db_path = "/var/lib/taskbuddy/tasks.db"
http_port = 9000
authorized_user_ids = ["u1", "u2"]

[upload]
dir = "/var/lib/taskbuddy/uploads"
public_base_url = "https://tasks.example.com/api/uploads"
max_upload_bytes = 1048576
"#;
    let config = GlobalConfig::from_toml_str(toml).expect("valid config");

    assert_eq!(config.http_port, 9000);
    assert_eq!(config.db_path, PathBuf::from("/var/lib/taskbuddy/tasks.db"));
    assert_eq!(config.authorized_user_ids, vec!["u1", "u2"]);
    assert_eq!(
        config.upload.public_base_url,
        "https://tasks.example.com/api/uploads"
    );
    assert_eq!(config.upload.max_upload_bytes, 1_048_576);
}

#[test]
fn trailing_slashes_are_trimmed_from_base_url() {
    let toml = r#"
[upload]
public_base_url = "https://tasks.example.com/api/uploads///"
"#;
    let config = GlobalConfig::from_toml_str(toml).expect("valid config");
    assert_eq!(
        config.upload.public_base_url,
        "https://tasks.example.com/api/uploads"
    );
}

#[test]
fn zero_upload_cap_is_rejected() {
    let toml = r"
[upload]
max_upload_bytes = 0
";
    let err = GlobalConfig::from_toml_str(toml).expect_err("invalid config");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn empty_base_url_is_rejected() {
    let toml = r#"
[upload]
public_base_url = ""
"#;
    let err = GlobalConfig::from_toml_str(toml).expect_err("invalid config");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn invalid_toml_is_a_config_error() {
    let err = GlobalConfig::from_toml_str("http_port = ").expect_err("invalid toml");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn empty_allowlist_accepts_any_user() {
    let config = GlobalConfig::from_toml_str("").expect("valid config");
    assert!(config.ensure_authorized("anyone").is_ok());
}

#[test]
fn allowlist_rejects_unknown_user() {
    let toml = r#"authorized_user_ids = ["u1"]"#;
    let config = GlobalConfig::from_toml_str(toml).expect("valid config");

    assert!(config.ensure_authorized("u1").is_ok());
    let err = config.ensure_authorized("u2").expect_err("unauthorized");
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn missing_config_file_is_a_config_error() {
    let err = GlobalConfig::load_from_path("/nonexistent/config.toml").expect_err("missing file");
    assert!(matches!(err, AppError::Config(_)));
}
