/*!
 * Tests for configuration loading and validation
 */

use babelcache::app_config::{Config, LogLevel, ProviderConfig, ProviderKind};

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.source_language, "ru");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.max_input_chars, 500);
    let kinds: Vec<ProviderKind> = config.providers.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![ProviderKind::MyMemory, ProviderKind::LibreTranslate]);

    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["providers"][0]["type"], "mymemory");
    assert_eq!(written["providers"][0]["connect_timeout_secs"], 30);
}

#[test]
fn test_loadOrCreate_withExistingFile_shouldReadIt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{"source_language":"en","target_language":"de","log_level":"debug",
            "providers":[{"type":"libretranslate","endpoint":"http://localhost:5000/"}]}"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.target_language, "de");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.providers.len(), 1);
    assert_eq!(config.providers[0].effective_endpoint(), "http://localhost:5000");
    assert!(config.validate().is_ok());
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_or_create(&path).is_err());
}

#[test]
fn test_validate_shouldRejectBadValues() {
    let mut bad_language = Config::default();
    bad_language.target_language = "xx".to_string();
    assert!(bad_language.validate().is_err());

    let mut zero_timeout = Config::default();
    zero_timeout.providers[0].read_timeout_secs = 0;
    assert!(zero_timeout.validate().is_err());

    let mut bad_endpoint = Config::default();
    bad_endpoint.providers = vec![ProviderConfig {
        endpoint: "not a url".to_string(),
        ..ProviderConfig::new(ProviderKind::MyMemory)
    }];
    assert!(bad_endpoint.validate().is_err());

    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_resolvedDatabasePath_withExplicitPath_shouldUseIt() {
    let config = Config {
        database_path: Some("/tmp/custom.db".into()),
        ..Config::default()
    };

    assert_eq!(config.resolved_database_path().unwrap(), std::path::PathBuf::from("/tmp/custom.db"));
}
