/*!
 * # beatsplit - screenplay master file splitter
 *
 * Converts a single screenplay master document into a directory hierarchy of
 * Acts -> Scenes -> Beats, and merges such a hierarchy back into a master.
 *
 * ## Markup
 *
 * - `# Name` starts an act
 * - `## Name` starts a scene
 * - `.Name` starts a beat; the following lines are its content
 * - a final line starting with the comment prefix is a trailing comment, kept out of the tree
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Master document model and parser
 * - `materializer`: Writes a tree to numbered directories and removes stale entries
 * - `merger`: Rebuilds a flat document from numbered directories
 * - `sanitizer`: Label <-> file name conversion and blank-line transforms
 * - `numbering`: Zero-padded sibling prefixes
 * - `normalizer`: Cosmetic passes over a split tree
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod materializer;
pub mod merger;
pub mod normalizer;
pub mod numbering;
pub mod sanitizer;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use document::{parse, Act, Beat, MasterDocument, Parser, Scene};
pub use errors::{AppError, MalformedKind, SplitError};
pub use materializer::{MaterializeReport, Materializer};
pub use merger::Merger;
pub use numbering::{NumberingMode, NumberingScheme};
pub use sanitizer::{Delimiter, Sanitizer};
