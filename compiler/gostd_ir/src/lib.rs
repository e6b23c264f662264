//! Intermediate representation for the gostd binding generator.
//!
//! The discovery collaborator walks host (Go) packages and hands the code
//! generator an already-filtered list of declarations. This crate defines
//! the records it hands over:
//!
//! - [`TypeShape`]: the structural description of a host type
//! - [`QualifiedName`]: `package/path.Name` identity of a declaration
//! - [`FunctionDecl`] / [`TypeDecl`]: per-declaration input records
//! - [`Declarations`]: one batch, as decoded from a manifest
//!
//! Shapes are immutable once built. Everything that changes during code
//! generation (visitation state, memoized translations) lives outside them,
//! in the code generator's registry.

mod decl;
mod name;
mod shape;

pub use decl::{Declarations, FunctionDecl, Param, ResultField, TypeDecl};
pub use name::{InvalidQualifiedName, QualifiedName};
pub use shape::{FieldShape, IntKind, PrimitiveKind, TypeShape, UnknownPrimitive, Visibility};
