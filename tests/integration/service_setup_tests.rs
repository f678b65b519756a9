/*!
 * Tests for building the service from configuration
 */

use babelcache::app_config::{Config, ProviderConfig, ProviderKind};
use babelcache::TranslationService;

use crate::common::{init_logging, TestServer};

fn local_config(endpoint: &str, database: std::path::PathBuf) -> Config {
    let mut provider = ProviderConfig::new(ProviderKind::LibreTranslate);
    provider.endpoint = endpoint.to_string();
    provider.connect_timeout_secs = 1;
    provider.read_timeout_secs = 1;

    Config {
        source_language: "en".to_string(),
        target_language: "es".to_string(),
        database_path: Some(database),
        providers: vec![provider],
        ..Config::default()
    }
}

#[tokio::test]
async fn test_fromConfig_withSqlite_shouldPersistAcrossInstances() {
    init_logging();
    let server = TestServer::respond(200, r#"{"translatedText":"Hola"}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(&server.url(), dir.path().join("data").join("history.db"));

    {
        let service = TranslationService::from_config(&config, false).unwrap();
        let pair = service.default_pair().clone();
        let translation = service.translate_text("Hello", &pair.source, &pair.target).await.unwrap();
        assert_eq!(translation.text, "Hola");
    }

    let reopened = TranslationService::from_config(&config, false).unwrap();
    let records = reopened.get_history().snapshot().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_language, "en");
    assert_eq!(records[0].target_language, "es");

    let stats = reopened.stats().await.unwrap();
    assert_eq!(stats.record_count, 1);
    assert_eq!(stats.total_uses, 1);
}

#[tokio::test]
async fn test_fromConfig_ephemeral_shouldNotCreateDatabase() {
    init_logging();
    let server = TestServer::respond(200, r#"{"translatedText":"Hola"}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("history.db");
    let config = local_config(&server.url(), db_path.clone());

    let service = TranslationService::from_config(&config, true).unwrap();
    service.translate_text("Hello", "en", "es").await.unwrap();

    assert!(!db_path.exists());
    assert_eq!(service.stats().await.unwrap().record_count, 1);
}

#[tokio::test]
async fn test_fromConfig_withInputOverLimit_shouldRejectBeforeNetwork() {
    init_logging();
    let server = TestServer::respond(200, r#"{"translatedText":"Hola"}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = local_config(&server.url(), dir.path().join("history.db"));
    config.max_input_chars = 10;

    let service = TranslationService::from_config(&config, true).unwrap();
    let result = service.translate_text("This sentence is too long", "en", "es").await;

    assert!(matches!(
        result,
        Err(babelcache::TranslationError::InputTooLong { max: 10, .. })
    ));
    assert!(server.requests().is_empty());
}

#[test]
fn test_fromConfig_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.providers.clear();

    assert!(TranslationService::from_config(&config, true).is_err());
}
