/*!
 * Document modeling for screenplay master files.
 *
 * This module provides the in-memory form of a master document:
 * - The flat line sequence with its header and trailing comment
 * - The Act > Scene > Beat tree built from marker lines
 * - The parser turning the former into the latter
 */

pub mod model;
pub mod parser;

// Re-export types used by other modules
pub use model::{Act, Beat, MasterDocument, Scene};
pub use parser::{parse, ParseOutcome, ParseWarning, Parser};
