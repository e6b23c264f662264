//! Code generation core of the gostd binding generator.
//!
//! Turns host (Go) function declarations into pairs of text artifacts: a
//! `defn` stub for the dynamic runtime and a Go shim that performs the call
//! and converts the results into runtime objects.
//!
//! # Pipeline
//!
//! ```text
//! Declarations ──▶ PackageAssembler ──▶ generate_function (per function, sorted)
//!                        │                    │
//!                   TypeRegistry ◀── Translator ──▶ flatten (result list)
//!                        │
//!                        ▼
//!                      Batch { PackageBucket.., BatchReport }
//! ```
//!
//! Translation never aborts on an unsupported shape. Failures travel as
//! typed sentinels, are embedded as `ABENDnnn(...)` tokens in the text, and
//! the affected artifacts are emitted commented out.

mod assemble;
mod emit;
mod flatten;
mod function;
mod registry;
mod report;
mod symbols;
mod translate;

pub use assemble::{Batch, DeclKind, DuplicateNote, PackageAssembler, PackageBucket};
pub use emit::{comment_out, quote, ABSENT, SHIM_COMMENT, STUB_COMMENT};
pub use flatten::{flatten, FlattenedResults};
pub use function::{generate_function, FunctionArtifact};
pub use registry::{EntryState, Registration, ResolvedType, TypeRegistry};
pub use report::BatchReport;
pub use symbols::SymbolAllocator;
pub use translate::{Guard, Translation, Translator, ValueHandle};
