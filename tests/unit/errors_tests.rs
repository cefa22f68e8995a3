/*!
 * Tests for error types and conversions
 */

use std::io;
use std::path::PathBuf;
use beatsplit::errors::{AppError, MalformedKind, SplitError};

#[test]
fn test_splitError_missingInput_shouldDisplayPath() {
    let error = SplitError::MissingInput { path: PathBuf::from("master.fountain") };
    let display = format!("{}", error);
    assert!(display.contains("Input not found"));
    assert!(display.contains("master.fountain"));
}

#[test]
fn test_splitError_malformedStructure_shouldDisplayLineAndKind() {
    let error = SplitError::MalformedStructure { line: 7, kind: MalformedKind::OrphanScene };
    let display = format!("{}", error);
    assert!(display.contains("line 7"));
    assert!(display.contains("scene marker outside of any act"));
}

#[test]
fn test_splitError_filesystem_shouldKeepSource() {
    let error = SplitError::io("split_files/01_Act", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
    let display = format!("{}", error);
    assert!(display.contains("01_Act"));
    assert!(display.contains("denied"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_appError_fromSplitError_shouldWrapCorrectly() {
    let split_error = SplitError::InvalidConfig("bad marker".to_string());
    let app_error: AppError = split_error.into();
    match app_error {
        AppError::Split(_) => {}
        _ => panic!("Expected AppError::Split variant"),
    }
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let app_error: AppError = io_error.into();
    match app_error {
        AppError::File(msg) => assert!(msg.contains("file not found")),
        _ => panic!("Expected AppError::File variant"),
    }
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(format!("{}", app_error).contains("something odd"));
}

#[test]
fn test_splitError_outputContainsProtected_shouldNameBothPaths() {
    let error = SplitError::OutputContainsProtected {
        output: PathBuf::from("."),
        protected: PathBuf::from("master.fountain"),
    };
    let display = format!("{}", error);
    assert!(display.contains("master.fountain"));
    assert!(display.contains("would delete"));
}
