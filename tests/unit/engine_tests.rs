/*!
 * Tests for the batch translation engine
 */

use std::sync::{Arc, Mutex};
use tslate::errors::TranslationError;
use tslate::providers::Provider;
use tslate::providers::mock::MockProvider;
use tslate::translation::BatchEngine;
use tslate::ts_catalog::{TranslationStatus, TranslationUnit};

const TARGET: &str = "de_DE";

fn unit(text: &str, status: TranslationStatus) -> TranslationUnit {
    let translation = match status {
        TranslationStatus::Finished => Some(format!("fertig: {}", text)),
        _ => None,
    };
    TranslationUnit {
        context_name: "MainWindow".to_string(),
        source_text: text.to_string(),
        comment: None,
        location: None,
        translation,
        status,
    }
}

fn pending_units(count: usize) -> Vec<TranslationUnit> {
    (0..count)
        .map(|i| unit(&format!("text {}", i), TranslationStatus::Absent))
        .collect()
}

fn engine(provider: Arc<dyn Provider>, batch_size: usize, max_retries: u32) -> BatchEngine {
    BatchEngine::new(provider, "en_US", TARGET, batch_size, max_retries)
        .expect("engine construction should succeed")
}

/// Test that a working provider translates every pending unit
#[tokio::test]
async fn test_run_withWorkingProvider_shouldTranslateAllPending() {
    let mock = Arc::new(MockProvider::working());
    let engine = engine(mock.clone(), 2, 3);
    let mut units = pending_units(5);

    let report = engine.run(&mut units).await.expect("run should succeed");

    assert_eq!(report.total_units, 5);
    assert_eq!(report.translated, 5);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.errors, 0);

    for unit in &units {
        assert_eq!(unit.status, TranslationStatus::Finished);
        assert_eq!(
            unit.translation.as_deref(),
            Some(MockProvider::translated(&unit.source_text, TARGET).as_str())
        );
    }

    // 5 units at batch size 2 means batches of 2, 2 and 1
    assert_eq!(mock.call_count(), 3);
    assert_eq!(mock.dispatched_batches(), vec![
        vec!["text 0".to_string(), "text 1".to_string()],
        vec!["text 2".to_string(), "text 3".to_string()],
        vec!["text 4".to_string()],
    ]);
}

/// Test that only pending units are batched and finished ones are untouched
#[tokio::test]
async fn test_run_withInterleavedFinished_shouldBatchOnlyPending() {
    let mock = Arc::new(MockProvider::working());
    let engine = engine(mock.clone(), 2, 3);

    let mut units = vec![
        unit("alpha", TranslationStatus::Absent),
        unit("bravo", TranslationStatus::Finished),
        unit("charlie", TranslationStatus::Unfinished),
        unit("delta", TranslationStatus::Finished),
        unit("echo", TranslationStatus::Absent),
    ];

    let report = engine.run(&mut units).await.expect("run should succeed");

    assert_eq!(report.total_units, 5);
    assert_eq!(report.translated, 3);

    // Pending units pack into contiguous batches regardless of their gaps
    assert_eq!(mock.dispatched_batches(), vec![
        vec!["alpha".to_string(), "charlie".to_string()],
        vec!["echo".to_string()],
    ]);

    // Finished units keep their existing translations
    assert_eq!(units[1].translation.as_deref(), Some("fertig: bravo"));
    assert_eq!(units[3].translation.as_deref(), Some("fertig: delta"));

    // Results land on the originating positions
    assert_eq!(units[0].translation.as_deref(), Some("[de_DE] alpha"));
    assert_eq!(units[2].translation.as_deref(), Some("[de_DE] charlie"));
    assert_eq!(units[4].translation.as_deref(), Some("[de_DE] echo"));
}

/// Test that a fully translated catalog produces no provider calls
#[tokio::test]
async fn test_run_withNoPending_shouldMakeNoCalls() {
    let mock = Arc::new(MockProvider::working());
    let engine = engine(mock.clone(), 2, 3);

    let mut units = vec![
        unit("alpha", TranslationStatus::Finished),
        unit("bravo", TranslationStatus::Finished),
    ];

    let report = engine.run(&mut units).await.expect("run should succeed");

    assert_eq!(report.total_units, 2);
    assert_eq!(report.translated, 0);
    assert_eq!(mock.call_count(), 0);
}

/// Test that a second run after success is a no-op
#[tokio::test]
async fn test_run_withAlreadyTranslatedUnits_shouldBeIdempotent() {
    let mock = Arc::new(MockProvider::working());
    let engine = engine(mock.clone(), 2, 3);
    let mut units = pending_units(3);

    engine.run(&mut units).await.expect("first run should succeed");
    assert_eq!(mock.call_count(), 2);

    let report = engine.run(&mut units).await.expect("second run should succeed");
    assert_eq!(report.translated, 0);
    assert_eq!(mock.call_count(), 2);
}

/// Test that a persistently failing provider aborts after max_retries attempts
#[tokio::test]
async fn test_run_withFailingProvider_shouldExhaustRetries() {
    let mock = Arc::new(MockProvider::failing());
    let engine = engine(mock.clone(), 10, 3);
    let mut units = pending_units(2);

    let error = engine.run(&mut units).await.expect_err("run should abort");

    match error {
        TranslationError::RetriesExhausted { attempts, batch_index, report } => {
            assert_eq!(attempts, 3);
            assert_eq!(batch_index, 0);
            assert_eq!(report.translated, 0);
            assert_eq!(report.skipped, 2);
            assert_eq!(report.errors, 1);
        },
        other => panic!("unexpected error: {:?}", other),
    }

    // Exactly max_retries attempts, no more
    assert_eq!(mock.call_count(), 3);
    assert_eq!(units[0].status, TranslationStatus::Absent);
}

/// Test that a transient failure recovers within the retry budget
#[tokio::test]
async fn test_run_withTransientFailure_shouldRecover() {
    let mock = Arc::new(MockProvider::fail_first(2));
    let engine = engine(mock.clone(), 10, 3);
    let mut units = pending_units(2);

    let report = engine.run(&mut units).await.expect("run should recover");

    assert_eq!(report.translated, 2);
    assert_eq!(mock.call_count(), 3);
    assert_eq!(units[0].status, TranslationStatus::Finished);
}

/// Test that a response with too few entries consumes the retry budget
#[tokio::test]
async fn test_run_withWrongCountResponse_shouldAbort() {
    let mock = Arc::new(MockProvider::wrong_count());
    let engine = engine(mock.clone(), 10, 2);
    let mut units = pending_units(3);

    let error = engine.run(&mut units).await.expect_err("run should abort");

    match error {
        TranslationError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 2),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(mock.call_count(), 2);
}

/// Test that a blank entry in the response is treated like a failed attempt
#[tokio::test]
async fn test_run_withBlankEntryResponse_shouldAbort() {
    let mock = Arc::new(MockProvider::blank_entry());
    let engine = engine(mock.clone(), 10, 2);
    let mut units = pending_units(2);

    let error = engine.run(&mut units).await.expect_err("run should abort");
    assert!(matches!(error, TranslationError::RetriesExhausted { .. }));
    assert_eq!(mock.call_count(), 2);
}

/// Test that unnumbered plain-line responses decode via the fallback
#[tokio::test]
async fn test_run_withUnnumberedResponse_shouldUseFallback() {
    let mock = Arc::new(MockProvider::unnumbered());
    let engine = engine(mock.clone(), 10, 3);
    let mut units = pending_units(3);

    let report = engine.run(&mut units).await.expect("run should succeed");

    assert_eq!(report.translated, 3);
    assert_eq!(mock.call_count(), 1);
    assert_eq!(units[1].translation.as_deref(), Some("[de_DE] text 1"));
}

/// Test that progress fires after every completed batch
#[tokio::test]
async fn test_run_withProgressCallback_shouldReportPerBatch() {
    let mock = Arc::new(MockProvider::working());
    let engine = engine(mock, 2, 3);
    let mut units = pending_units(5);

    let calls: Mutex<Vec<(usize, usize)>> = Mutex::new(Vec::new());
    engine
        .run_with_progress(&mut units, |completed, total| {
            calls.lock().unwrap().push((completed, total));
        })
        .await
        .expect("run should succeed");

    assert_eq!(*calls.lock().unwrap(), vec![(2, 5), (4, 5), (5, 5)]);
}

/// Test that invalid engine parameters are rejected at construction
#[test]
fn test_new_withZeroParameters_shouldFail() {
    let provider: Arc<dyn Provider> = Arc::new(MockProvider::working());
    assert!(BatchEngine::new(provider.clone(), "en_US", TARGET, 0, 3).is_err());
    assert!(BatchEngine::new(provider, "en_US", TARGET, 10, 0).is_err());
}
