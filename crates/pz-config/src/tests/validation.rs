use crate::tests::{setup_config_dir, write_config};
use crate::{ConfigError, ConfigErrorKind, LauncherConfig};

use googletest::assert_that;
use googletest::prelude::{anything, err};
use serial_test::serial;

fn load_err(content: &str) -> ConfigError {
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, content);
    LauncherConfig::load().unwrap_err()
}

// =========================================================================
// Required fields
// =========================================================================

#[test]
#[serial]
fn given_missing_gradio_port_when_load_then_missing_names_field() {
    // When
    let err = load_err(r#"{"pdf2zh_path": "pdf2zh"}"#);

    // Then
    assert_eq!(err.kind(), ConfigErrorKind::Missing);
    assert_eq!(err.missing_field_name(), Some("gradio_port"));
}

#[test]
#[serial]
fn given_null_gradio_port_when_load_then_missing_names_field() {
    // When
    let err = load_err(r#"{"gradio_port": null, "pdf2zh_path": "pdf2zh"}"#);

    // Then
    assert_eq!(err.missing_field_name(), Some("gradio_port"));
}

#[test]
#[serial]
fn given_missing_pdf2zh_path_when_load_then_missing_names_field() {
    // When
    let err = load_err(r#"{"gradio_port": 7860}"#);

    // Then
    assert_eq!(err.kind(), ConfigErrorKind::Missing);
    assert_eq!(err.missing_field_name(), Some("pdf2zh_path"));
}

#[test]
#[serial]
fn given_blank_pdf2zh_path_when_load_then_missing_names_field() {
    // When
    let err = load_err(r#"{"gradio_port": 7860, "pdf2zh_path": "   "}"#);

    // Then
    assert_eq!(err.missing_field_name(), Some("pdf2zh_path"));
}

#[test]
#[serial]
fn given_both_fields_missing_when_load_then_port_reported_first() {
    // When
    let err = load_err("{}");

    // Then
    assert_eq!(err.missing_field_name(), Some("gradio_port"));
}

// =========================================================================
// Malformed values
// =========================================================================

#[test]
#[serial]
fn given_invalid_json_when_load_then_malformed() {
    // When
    let err = load_err("{ gradio_port: 7860 ");

    // Then
    assert_eq!(err.kind(), ConfigErrorKind::Malformed);
}

#[test]
#[serial]
fn given_json_array_when_load_then_malformed() {
    // When
    let err = load_err("[7860]");

    // Then
    assert_eq!(err.kind(), ConfigErrorKind::Malformed);
}

#[test]
#[serial]
fn given_port_as_string_when_load_then_malformed() {
    // When
    let err = load_err(r#"{"gradio_port": "7860", "pdf2zh_path": "pdf2zh"}"#);

    // Then
    assert_eq!(err.kind(), ConfigErrorKind::Malformed);
}

#[test]
#[serial]
fn given_port_zero_when_load_then_malformed() {
    // When
    let err = load_err(r#"{"gradio_port": 0, "pdf2zh_path": "pdf2zh"}"#);

    // Then
    assert_eq!(err.kind(), ConfigErrorKind::Malformed);
    assert!(err.to_string().contains("gradio_port"));
}

#[test]
#[serial]
fn given_port_above_range_when_load_then_malformed() {
    // When
    let err = load_err(r#"{"gradio_port": 65536, "pdf2zh_path": "pdf2zh"}"#);

    // Then
    assert_eq!(err.kind(), ConfigErrorKind::Malformed);
}

#[test]
#[serial]
fn given_port_at_upper_bound_when_load_then_ok() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, r#"{"gradio_port": 65535, "pdf2zh_path": "pdf2zh"}"#);

    // When
    let config = LauncherConfig::load().unwrap();

    // Then
    assert_eq!(config.gradio_port, 65535);
}

#[test]
#[serial]
fn given_negative_port_when_load_then_malformed() {
    // When
    let err = load_err(r#"{"gradio_port": -1, "pdf2zh_path": "pdf2zh"}"#);

    // Then
    assert_eq!(err.kind(), ConfigErrorKind::Malformed);
}

#[test]
#[serial]
fn given_zero_max_attempts_when_load_then_malformed() {
    // When
    let err = load_err(
        r#"{"gradio_port": 7860, "pdf2zh_path": "pdf2zh", "startup": {"max_attempts": 0}}"#,
    );

    // Then
    assert_eq!(err.kind(), ConfigErrorKind::Malformed);
    assert!(err.to_string().contains("startup.max_attempts"));
}

#[test]
#[serial]
fn given_zero_interval_when_load_then_malformed() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"{"gradio_port": 7860, "pdf2zh_path": "pdf2zh", "startup": {"interval_ms": 0}}"#,
    );

    // When
    let result = LauncherConfig::load();

    // Then
    assert_that!(result, err(anything()));
}

// =========================================================================
// Hints
// =========================================================================

#[test]
fn given_each_kind_when_recovery_hint_then_non_empty() {
    let errors = [
        ConfigError::missing_field("gradio_port"),
        ConfigError::missing_file("config.json".into()),
        ConfigError::no_data_dir(),
        ConfigError::malformed("config.json".into(), "bad"),
        ConfigError::unreadable("config.json".into(), std::io::Error::other("denied")),
    ];

    for e in &errors {
        assert!(!e.recovery_hint().is_empty());
    }
}
