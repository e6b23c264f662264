//! Fatal errors.

use gostd_ir::QualifiedName;
use thiserror::Error;

/// Malformed input or a violated internal invariant.
///
/// Unlike sentinels these stop the batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("type {name} has no defining shape (declared in {file})")]
    MissingShape { name: QualifiedName, file: String },

    #[error("type {name} defined twice in file {file}")]
    TypeDefinedTwice { name: QualifiedName, file: String },

    #[error("declaration `{name}` in {file} has an empty package path or name")]
    MalformedName { name: String, file: String },

    #[error(
        "generated artifact for {name} disagrees with its translation \
         (usable: {usable}, sentinel text present: {sentinel_text})"
    )]
    InconsistentArtifact {
        name: QualifiedName,
        usable: bool,
        sentinel_text: bool,
    },
}
