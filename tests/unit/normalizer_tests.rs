/*!
 * Tests for the prep and reformat passes over a split tree
 */

use std::fs;
use anyhow::Result;
use beatsplit::normalizer::Normalizer;
use crate::common;

/// Test that reformat uses spaces, spaces out paragraphs and shortens prefixes
#[test]
fn test_reformat_withFlatNumberedTree_shouldProduceEditingLayout() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "0100_Act_One/0200_Big_Scene/01_First_Beat.fountain", "Line A\nLine B\n\nLine C\n")?;

    let report = Normalizer::new("fountain").reformat_for_editing(root)?;

    let beat = root.join("01 Act One/02 Big Scene/01 First Beat.fountain");
    assert!(beat.is_file());
    assert_eq!(fs::read_to_string(&beat)?, "Line A\n\nLine B\n\nLine C\n");
    assert_eq!(report.files_rewritten, 1);
    assert_eq!(report.renamed.len(), 3);

    Ok(())
}

/// Test that prep strips blank lines and restores underscores
#[test]
fn test_prep_withEditingLayout_shouldRestoreStoredNames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "01 Act One/02 Big Scene/01 First Beat.fountain", "Line A\n\nLine B\n\n\nLine C\n")?;
    common::create_test_file(root, "01 Act One/02 Big Scene/notes.txt", "keep\n\nme\n")?;

    let report = Normalizer::new("fountain").prep_for_merge(root)?;

    let beat = root.join("01_Act_One/02_Big_Scene/01_First_Beat.fountain");
    assert_eq!(fs::read_to_string(&beat)?, "Line A\nLine B\nLine C\n");
    assert_eq!(report.files_rewritten, 1);

    // Only beat files are rewritten
    let notes = root.join("01_Act_One/02_Big_Scene/notes.txt");
    assert_eq!(fs::read_to_string(&notes)?, "keep\n\nme\n");

    Ok(())
}

/// Test that an already prepared tree is left untouched
#[test]
fn test_prep_withCleanTree_shouldChangeNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "01_Act/01_Scene/01_Beat.fountain", "A\nB\n")?;

    let report = Normalizer::new("fountain").prep_for_merge(root)?;

    assert_eq!(report.files_rewritten, 0);
    assert!(report.renamed.is_empty());

    Ok(())
}

/// Test that a rename colliding with an existing entry is skipped
#[test]
fn test_prep_withNameCollision_shouldSkipRename() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "01_Act/01 Scene/01_Beat.fountain", "A\n")?;
    common::create_test_file(root, "01_Act/01_Scene/01_Beat.fountain", "B\n")?;

    let report = Normalizer::new("fountain").prep_for_merge(root)?;

    assert!(report.renamed.is_empty());
    assert!(root.join("01_Act/01 Scene").is_dir());

    Ok(())
}

/// Test that a missing directory is an error
#[test]
fn test_reformat_withMissingDir_shouldFail() {
    let result = Normalizer::new("fountain").reformat_for_editing(std::path::Path::new("./no_such_split_dir_12345"));
    assert!(result.is_err());
}
