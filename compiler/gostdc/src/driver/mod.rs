//! One generator run: declarations in, printable output out.

use gostd_codegen::{Batch, PackageAssembler};
use gostd_ir::Declarations;

use crate::{DriverError, Options};

/// Text a run produces. The binary routes `notes` to stderr and the rest
/// to stdout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Type list and generated functions, when verbose.
    pub listing: String,
    /// Duplicate-declaration notes.
    pub notes: Vec<String>,
    pub summary: Option<String>,
}

/// Assemble `declarations` and render the run's output.
pub fn run(options: &Options, declarations: Declarations) -> Result<RunOutput, DriverError> {
    let mut assembler = PackageAssembler::new();
    assembler.add_declarations(declarations)?;
    let batch = assembler.assemble()?;

    let report = batch.report();
    tracing::debug!(
        types = report.types,
        functions = report.functions,
        generated = report.generated,
        "batch assembled"
    );

    Ok(RunOutput {
        listing: if options.verbose {
            listing(&batch, options.generate_empty)
        } else {
            String::new()
        },
        notes: report.duplicates.clone(),
        summary: (options.summary || options.verbose).then(|| report.to_string()),
    })
}

/// Dry-run rendering of what the writer would receive: every type, then
/// every stub, then every shim, each in sorted order.
fn listing(batch: &Batch, include_empty: bool) -> String {
    let mut out = String::new();
    for bucket in batch.packages() {
        for (name, file) in &bucket.types {
            out.push_str(&format!("TYPE {name}:\n  {file}\n"));
        }
    }
    for bucket in batch.packages_to_emit(include_empty) {
        for artifact in &bucket.artifacts {
            out.push_str(&format!(
                "JOKER FUNC {}.{} has:{}\n",
                artifact.name.package_base(),
                artifact.name.name(),
                artifact.dynamic_stub
            ));
        }
    }
    for bucket in batch.packages_to_emit(include_empty) {
        for artifact in &bucket.artifacts {
            out.push_str(&format!(
                "GO FUNC {}.{} has:{}\n",
                artifact.name.package_base(),
                artifact.name.name(),
                artifact.host_shim
            ));
        }
    }
    out
}
