/*!
 * End-to-end catalog translation tests
 *
 * These tests drive the full pipeline against the mock backend: parse a
 * catalog from disk, run the batch engine over its units, apply the results
 * back by position and verify the written output file.
 */

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tslate::app_controller::Controller;
use tslate::providers::mock::MockProvider;
use tslate::translation::BatchEngine;
use tslate::ts_catalog::{TranslationStatus, TsCatalog};

use crate::common;

/// Test the full parse, translate, apply, write, re-read pipeline
#[tokio::test]
async fn test_workflow_withMockProvider_shouldProduceCompletedCatalog() {
    let temp_dir = common::create_temp_dir().expect("temp dir should be created");
    let root = temp_dir.path().to_path_buf();
    let input = common::create_test_catalog(&root, "app_de.ts")
        .expect("catalog fixture should be created");

    let mut catalog = TsCatalog::parse(&input).expect("catalog should parse");
    let mut units = catalog.units();
    let pending_positions: Vec<usize> = units.iter()
        .enumerate()
        .filter(|(_, unit)| unit.needs_translation())
        .map(|(position, _)| position)
        .collect();
    assert_eq!(pending_positions, vec![0, 2, 3]);

    let mock = Arc::new(MockProvider::working());
    let engine = BatchEngine::new(mock.clone(), "en_US", "de_DE", 2, 3)
        .expect("engine should build");
    let report = engine.run(&mut units).await.expect("run should succeed");
    assert_eq!(report.translated, 3);

    let mut translations = BTreeMap::new();
    for position in pending_positions {
        if let Some(text) = &units[position].translation {
            translations.insert(position, text.clone());
        }
    }
    catalog.apply_translations(&translations);

    let output = root.join("app_de_translated.ts");
    catalog.write_to_file(&output).expect("catalog should be written");

    // The written catalog is fully translated and the finished entry is untouched
    let written = TsCatalog::parse(&output).expect("output catalog should parse");
    let written_units = written.units();
    assert_eq!(written_units.len(), 4);
    assert!(written_units.iter().all(|u| u.status == TranslationStatus::Finished));
    assert_eq!(written_units[0].translation.as_deref(), Some("[de_DE] Open File"));
    assert_eq!(written_units[1].translation.as_deref(), Some("Speichern"));
    assert_eq!(written_units[2].translation.as_deref(), Some("[de_DE] Close"));
    assert_eq!(written_units[3].translation.as_deref(), Some("[de_DE] Cancel"));
}

/// Test that a failed run leaves no output file behind
#[tokio::test]
async fn test_workflow_withFailingProvider_shouldNotWriteOutput() {
    let temp_dir = common::create_temp_dir().expect("temp dir should be created");
    let root = temp_dir.path().to_path_buf();
    let input = common::create_test_catalog(&root, "app_de.ts")
        .expect("catalog fixture should be created");

    let catalog = TsCatalog::parse(&input).expect("catalog should parse");
    let mut units = catalog.units();

    let mock = Arc::new(MockProvider::failing());
    let engine = BatchEngine::new(mock, "en_US", "de_DE", 2, 2)
        .expect("engine should build");
    let result = engine.run(&mut units).await;
    assert!(result.is_err());

    // Persistence is skipped on a fatal run error
    let output = root.join("app_de_translated.ts");
    assert!(!output.exists());
}

/// Test controller construction and input validation
#[tokio::test]
async fn test_controller_withMissingInput_shouldFail() {
    let controller = Controller::new_for_test().expect("controller should build");
    assert!(controller.is_initialized());

    let result = controller
        .run(PathBuf::from("/nonexistent/app.ts"), None, false)
        .await;
    assert!(result.is_err());
}

/// Test that controller folder mode rejects an empty directory
#[tokio::test]
async fn test_controller_runFolder_withNoCatalogs_shouldFail() {
    let temp_dir = common::create_temp_dir().expect("temp dir should be created");
    let controller = Controller::new_for_test().expect("controller should build");

    let result = controller
        .run_folder(temp_dir.path().to_path_buf(), false)
        .await;
    assert!(result.is_err());
}
