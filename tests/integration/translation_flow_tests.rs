/*!
 * End-to-end tests of the translation service: fallback, validation,
 * history bookkeeping and concurrency
 */

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

use babelcache::database::HistoryOrder;
use babelcache::errors::TranslationError;
use babelcache::providers::mock::MockProvider;
use babelcache::providers::{ProviderChain, TranslationProvider};
use babelcache::translation::HistoryEvent;

use crate::common::{memory_service, sqlite_service};

#[tokio::test]
async fn test_translateText_repeatedNTimes_shouldKeepOneRecordWithUsageN() {
    let service = memory_service(&[MockProvider::working()]);

    for _ in 0..5 {
        service.translate_text("Good morning", "en", "de").await.unwrap();
    }

    let records = service.get_history().snapshot().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].usage_count, 5);
    assert_eq!(records[0].translated_text, "[de] Good morning");
}

#[tokio::test]
async fn test_translateText_withFailingPrimary_shouldReturnFallbackResult() {
    let primary = MockProvider::failing().named("primary");
    let fallback = MockProvider::replying("Bonjour").named("fallback");
    let service = memory_service(&[primary.clone(), fallback.clone()]);

    let translation = service.translate_text("Hello!", "en", "fr").await.unwrap();

    assert_eq!(translation.text, "Bonjour!");
    assert_eq!(translation.provider, "fallback");
    assert_eq!(primary.calls(), 1);

    let records = service.get_history().snapshot().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].translated_text, "Bonjour!");
}

#[tokio::test]
async fn test_translateText_withEchoingPrimary_shouldSkipIt() {
    let echo = MockProvider::echo().named("echo");
    let service = memory_service(&[echo.clone(), MockProvider::replying("Hallo").named("real")]);

    let translation = service.translate_text("hello", "en", "de").await.unwrap();

    assert_eq!(translation.text, "Hallo");
    assert_eq!(translation.provider, "real");
    assert_eq!(echo.calls(), 1);
}

#[tokio::test]
async fn test_translateText_withOnlyEchoesAndErrors_shouldFailAsOne() {
    let service = memory_service(&[
        MockProvider::echo(),
        MockProvider::empty(),
        MockProvider::failing(),
        MockProvider::intermittent(1),
    ]);

    let error = service.translate_text("Hello", "en", "es").await.unwrap_err();

    assert_eq!(error, TranslationError::AllProvidersFailed { attempts: 4 });
    assert_eq!(error.user_message(), "Translation services are temporarily unavailable");
    assert!(service.get_history().snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_translateText_withBlankInput_shouldNotReachProviders() {
    let provider = MockProvider::working();
    let service = memory_service(&[provider.clone()]);

    assert_eq!(
        service.translate_text(" \n\t ", "en", "es").await,
        Err(TranslationError::EmptyInput)
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_toggleFavorite_shouldNotChangeUsageOrTimestamp() {
    let service = memory_service(&[MockProvider::working()]);
    service.translate_text("Hello", "en", "es").await.unwrap();
    let before = service.translate_text("Hello", "en", "es").await.unwrap().record.unwrap();

    let after = service.toggle_favorite(before.id).await.unwrap();

    assert!(after.is_favorite);
    assert_eq!(after.usage_count, before.usage_count);
    assert_eq!(after.timestamp, before.timestamp);
    let favorites = service.get_favorites().snapshot().await.unwrap();
    assert_eq!(favorites, vec![after]);
}

#[tokio::test]
async fn test_clearAllData_shouldEmptyAllThreeViews() {
    let dir = tempfile::tempdir().unwrap();
    let service = sqlite_service(&[MockProvider::working()], &dir);
    for text in ["one", "two", "three"] {
        let translation = service.translate_text(text, "en", "it").await.unwrap();
        service.toggle_favorite(translation.record.unwrap().id).await.unwrap();
    }

    assert_eq!(service.clear_all_data().await.unwrap(), 3);

    assert!(service.get_history().snapshot().await.unwrap().is_empty());
    assert!(service.get_history_by_usage().snapshot().await.unwrap().is_empty());
    assert!(service.get_favorites().snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleteTranslation_withUnknownId_shouldReturnFalse() {
    let service = memory_service(&[MockProvider::working()]);

    assert!(!service.delete_translation(404).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrentTranslations_ofSameKey_shouldCountEveryUse() {
    const N: usize = 25;
    let dir = tempfile::tempdir().unwrap();

    for service in [
        memory_service(&[MockProvider::slow(2)]),
        sqlite_service(&[MockProvider::slow(2)], &dir),
    ] {
        let results = join_all((0..N).map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.translate_text("Same text", "en", "ja").await })
        }))
        .await;
        for result in results {
            result.unwrap().unwrap();
        }

        let records = service.get_history().snapshot().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].usage_count, N as i64);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrentTranslations_ofDifferentKeys_shouldCreateOneRecordEach() {
    let service = memory_service(&[MockProvider::working()]);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move { service.translate_text(&format!("text {}", i), "en", "ko").await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let records = service.get_history_by_usage().snapshot().await.unwrap();
    assert_eq!(records.len(), 10);
    assert!(records.iter().all(|r| r.usage_count == 1));
}

#[tokio::test]
async fn test_droppedCaller_shouldStillRecordTranslation() {
    let service = memory_service(&[MockProvider::slow(50)]);
    let mut feed = service.get_history();

    let pending = service.translate_text("Walk away", "en", "fr");
    // The caller gives up long before the provider answers
    assert!(tokio::time::timeout(Duration::from_millis(5), pending).await.is_err());

    let event = tokio::time::timeout(Duration::from_secs(2), feed.changed())
        .await
        .expect("history write should still happen");
    assert!(matches!(event, Some(HistoryEvent::Upserted(_))));

    let records = feed.snapshot().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].original_text, "Walk away");
}

#[tokio::test]
async fn test_historyFeed_shouldReflectUsageRanking() {
    let service = memory_service(&[MockProvider::working()]);
    let mut feed = service.get_history_by_usage();

    service.translate_text("rare", "en", "es").await.unwrap();
    service.translate_text("common", "en", "es").await.unwrap();
    service.translate_text("common", "en", "es").await.unwrap();

    let mut wakeups = 0;
    while wakeups < 3 {
        feed.changed().await.unwrap();
        wakeups += 1;
    }

    let ranked: Vec<String> = feed
        .snapshot()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.original_text)
        .collect();
    assert_eq!(ranked, vec!["common", "rare"]);
    assert_eq!(feed.order(), HistoryOrder::Usage);
}

#[tokio::test]
async fn test_service_withSharedChain_shouldKeepPriorityOrder() {
    let first = MockProvider::failing().named("first");
    let second = MockProvider::failing().named("second");
    let third = MockProvider::working().named("third");
    let chain: ProviderChain = [first.clone(), second.clone(), third.clone()]
        .into_iter()
        .map(|p| Arc::new(p) as Arc<dyn TranslationProvider>)
        .collect();
    let service = babelcache::TranslationService::new(chain, Arc::new(babelcache::database::MemoryStore::new()));

    let translation = service.translate_text("Hi", "en", "ar").await.unwrap();

    assert_eq!(translation.provider, "third");
    assert_eq!(service.provider_names(), vec!["first", "second", "third"]);
    assert_eq!((first.calls(), second.calls(), third.calls()), (1, 1, 1));
}
