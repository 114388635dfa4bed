/*!
 * Tests for file utility functions
 */

use std::path::{Path, PathBuf};
use tslate::file_utils::FileManager;

use crate::common;

/// Test catalog extension detection
#[test]
fn test_is_catalog_file_withVariousPaths_shouldDetectExtension() {
    assert!(FileManager::is_catalog_file("app_de.ts"));
    assert!(FileManager::is_catalog_file("translations/app.TS"));
    assert!(!FileManager::is_catalog_file("app.xml"));
    assert!(!FileManager::is_catalog_file("app"));
}

/// Test output path generation with the configured suffix
#[test]
fn test_generate_output_path_withSuffix_shouldAppendBeforeExtension() {
    let output = FileManager::generate_output_path("translations/app_de.ts", "_translated");
    assert_eq!(output, Path::new("translations/app_de_translated.ts"));

    let output = FileManager::generate_output_path("app.ts", "_out");
    assert_eq!(output, PathBuf::from("app_out.ts"));
}

/// Test recursive catalog discovery
#[test]
fn test_find_catalog_files_withNestedDirs_shouldFindSorted() {
    let temp_dir = common::create_temp_dir().expect("temp dir should be created");
    let root = temp_dir.path().to_path_buf();

    FileManager::ensure_dir(root.join("nested")).expect("dir should be created");
    common::create_test_catalog(&root, "b.ts").expect("fixture should be created");
    common::create_test_catalog(&root.join("nested"), "a.ts").expect("fixture should be created");
    common::create_test_file(&root, "notes.txt", "ignored").expect("fixture should be created");

    let found = FileManager::find_catalog_files(&root).expect("discovery should succeed");
    let names: Vec<String> = found.iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(found.len(), 2);
    assert!(names.contains(&"a.ts".to_string()));
    assert!(names.contains(&"b.ts".to_string()));
    // Paths come back sorted
    let mut sorted = found.clone();
    sorted.sort();
    assert_eq!(found, sorted);
}

/// Test directory creation and file round-trip helpers
#[test]
fn test_write_and_read_withNestedPath_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().expect("temp dir should be created");
    let path = temp_dir.path().join("deep").join("nested").join("file.txt");

    FileManager::write_to_file(&path, "payload").expect("write should succeed");
    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(path.parent().unwrap()));

    let content = FileManager::read_to_string(&path).expect("read should succeed");
    assert_eq!(content, "payload");
}
