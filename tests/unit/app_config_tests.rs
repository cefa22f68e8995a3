/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use beatsplit::app_config::{Config, LogLevel};
use beatsplit::{Delimiter, NumberingMode, NumberingScheme, SplitError};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.master_file, "master.fountain");
    assert_eq!(config.split_dir, "split_files");
    assert_eq!(config.markers.act, '#');
    assert_eq!(config.markers.scene_marker(), "##");
    assert_eq!(config.markers.beat, '.');
    assert_eq!(config.markers.comment_prefix, "/*");
    assert_eq!(config.layout.extension, "fountain");
    assert_eq!(config.layout.delimiter, Delimiter::Underscore);
    assert_eq!(config.layout.numbering, NumberingScheme { width: 2, increment: 1 });
    assert!(!config.strict);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    // Same act and beat marker
    config.markers.beat = '#';
    assert!(config.validate().is_err());
    config.markers.beat = '.';

    // Whitespace marker
    config.markers.act = ' ';
    assert!(config.validate().is_err());
    config.markers.act = '#';

    // Extension with a dot
    config.layout.extension = ".fountain".to_string();
    assert!(config.validate().is_err());
    config.layout.extension = "fountain".to_string();

    // Zero width numbering
    config.layout.numbering.width = 0;
    assert!(config.validate().is_err());
    config.layout.numbering = NumberingScheme::from_mode(NumberingMode::Flat);

    assert!(config.validate().is_ok());
}

/// Test that validation failures are typed configuration errors
#[test]
fn test_config_validation_withHugeNumbering_shouldReturnInvalidConfig() {
    let mut config = Config::default();
    config.layout.numbering.increment = u64::MAX;
    assert!(matches!(config.validate(), Err(SplitError::InvalidConfig(_))));

    config.layout.numbering = NumberingScheme { width: 64, increment: 1 };
    assert!(matches!(config.validate(), Err(SplitError::InvalidConfig(_))));

    config.layout.numbering = NumberingScheme { width: 12, increment: 1_000_000 };
    assert!(config.validate().is_ok());
}

/// Test that a partial JSON file falls back to defaults for missing fields
#[test]
fn test_config_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "beatsplit.json",
        r#"{ "split_dir": "beats", "layout": { "delimiter": "space", "numbering": { "width": 4, "increment": 100 } }, "log_level": "debug" }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.split_dir, "beats");
    assert_eq!(config.master_file, "master.fountain");
    assert_eq!(config.layout.delimiter, Delimiter::Space);
    assert_eq!(config.layout.extension, "fountain");
    assert_eq!(config.layout.numbering, NumberingScheme::from_mode(NumberingMode::Flat));
    assert_eq!(config.log_level, LogLevel::Debug);

    Ok(())
}

/// Test that a saved configuration loads back unchanged
#[test]
fn test_config_save_shouldLoadBackSameValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.strict = true;
    config.markers.comment_prefix = "//".to_string();
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert!(loaded.strict);
    assert_eq!(loaded.markers, config.markers);
    assert_eq!(loaded.layout, config.layout);

    Ok(())
}

/// Test that malformed JSON is reported
#[test]
fn test_config_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.json", "{ not json")?;

    assert!(Config::from_file(&path).is_err());

    Ok(())
}
