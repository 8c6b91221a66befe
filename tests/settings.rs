use defaultbox::{Brackets, DefaultBoxError, Settings};

#[test]
fn defaults_when_nothing_is_configured() {
    let settings = Settings::default();
    assert_eq!(settings.tag_key, "default");
    assert_eq!(settings.brackets, Brackets::Positional);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn toml_overrides_individual_keys() {
    let settings = Settings::from_toml("tag_key = \"env\"\nbrackets = \"strict\"").unwrap();
    assert_eq!(settings.tag_key, "env");
    assert_eq!(settings.brackets, Brackets::Strict);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn unknown_bracket_policy_is_a_config_error() {
    let err = Settings::from_toml("brackets = \"curly\"").unwrap_err();
    assert!(matches!(err, DefaultBoxError::Config(_)));
    assert!(err.to_string().starts_with("Config error"));
}

#[test]
fn settings_file_is_read_by_extension() {
    let path = std::env::temp_dir().join("defaultbox_settings_test.toml");
    std::fs::write(&path, "log_filter = \"debug\"\n").unwrap();
    let settings = Settings::load(path.to_str()).unwrap();
    assert_eq!(settings.log_filter, "debug");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_settings_file_falls_back_to_defaults() {
    let settings = Settings::load(Some("definitely/not/here.toml")).unwrap();
    assert_eq!(settings.tag_key, "default");
}
