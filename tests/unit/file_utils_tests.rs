/*!
 * Tests for file utility functions
 */

use std::fs;
use anyhow::Result;
use beatsplit::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that find_beat_files only returns visible files with the extension, sorted
#[test]
fn test_find_beat_files_withMixedTree_shouldReturnMatchingFilesSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "02_A/01_B.fountain", "b")?;
    common::create_test_file(root, "01_A/01_A.fountain", "a")?;
    common::create_test_file(root, "01_A/notes.txt", "n")?;
    common::create_test_file(root, ".trash/01_Old.fountain", "old")?;
    common::create_test_file(root, "01_A/.01_Draft.fountain", "draft")?;

    let files = FileManager::find_beat_files(root, ".fountain")?;

    assert_eq!(files, vec![root.join("01_A/01_A.fountain"), root.join("02_A/01_B.fountain")]);

    Ok(())
}

/// Test that read_lines drops line terminators
#[test]
fn test_read_lines_withCrlf_shouldStripTerminators() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "beat.fountain", "one\r\ntwo\n\nthree")?;

    assert_eq!(FileManager::read_lines(&file)?, vec!["one", "two", "", "three"]);

    Ok(())
}

/// Test that write_lines terminates every line
#[test]
fn test_write_lines_shouldTerminateEachLine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = temp_dir.path().join("beat.fountain");

    FileManager::write_lines(&file, &["one".to_string(), String::new(), "two".to_string()])?;

    assert_eq!(fs::read_to_string(&file)?, "one\n\ntwo\n");

    Ok(())
}

/// Test that write_atomically replaces existing content
#[test]
fn test_write_atomically_withExistingFile_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "master.fountain", "old")?;

    FileManager::write_atomically(&file, "new content\n")?;

    assert_eq!(fs::read_to_string(&file)?, "new content\n");
    // No temporary files are left behind
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 1);

    Ok(())
}

/// Test that rename_entry refuses to overwrite
#[test]
fn test_rename_entry_withExistingTarget_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let from = common::create_test_file(temp_dir.path(), "a.txt", "a")?;
    let to = common::create_test_file(temp_dir.path(), "b.txt", "b")?;

    assert!(FileManager::rename_entry(&from, &to).is_err());
    assert_eq!(fs::read_to_string(&to)?, "b");

    Ok(())
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("a/b/c");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(test_subdir.is_dir());

    Ok(())
}
