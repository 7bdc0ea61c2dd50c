//! Unit tests for error display and conversions.

use taskbuddy::AppError;

#[test]
fn display_prefixes_each_variant() {
    assert_eq!(
        AppError::NotFound("task not found".into()).to_string(),
        "not found: task not found"
    );
    assert_eq!(
        AppError::Validation("title is required".into()).to_string(),
        "validation: title is required"
    );
    assert_eq!(
        AppError::Unauthorized("nope".into()).to_string(),
        "unauthorized: nope"
    );
    assert_eq!(AppError::Db("locked".into()).to_string(), "db: locked");
    assert_eq!(
        AppError::Upload("too big".into()).to_string(),
        "upload: too big"
    );
    assert_eq!(AppError::Io("enospc".into()).to_string(), "io: enospc");
    assert_eq!(
        AppError::Config("bad port".into()).to_string(),
        "config: bad port"
    );
}

#[test]
fn sqlx_errors_convert_to_db() {
    let err = AppError::from(sqlx::Error::RowNotFound);
    assert!(matches!(err, AppError::Db(_)));
}

#[test]
fn toml_errors_convert_to_config() {
    let toml_err = toml::from_str::<toml::Value>("= nonsense").expect_err("invalid toml");
    let err = AppError::from(toml_err);
    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().starts_with("config: invalid config"));
}

#[test]
fn serde_json_errors_convert_to_db() {
    let json_err = serde_json::from_str::<Vec<i32>>("not json").expect_err("invalid json");
    let err = AppError::from(json_err);
    assert!(matches!(err, AppError::Db(_)));
    assert!(err.to_string().contains("invalid stored json"));
}
