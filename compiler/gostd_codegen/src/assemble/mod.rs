//! Batch assembly: declarations in, per-package artifact sets out.
//!
//! Declarations may arrive in any order. Functions are generated sorted by
//! qualified name, so identical input always yields identical buckets.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use gostd_diagnostic::{scan, BindError};
use gostd_ir::{Declarations, FunctionDecl, QualifiedName, TypeDecl};

use crate::function::{generate_function, FunctionArtifact};
use crate::registry::{Registration, TypeRegistry};
use crate::report::BatchReport;
use crate::symbols::SymbolAllocator;

/// Which kind of declaration was seen twice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeclKind {
    Function,
    Type,
}

impl DeclKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Function => "function",
            DeclKind::Type => "type",
        }
    }
}

/// A declaration seen again after its first definition. Non-fatal; the
/// first definition is the one generated.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DuplicateNote {
    pub kind: DeclKind,
    pub name: QualifiedName,
    pub first_file: String,
    pub again_file: String,
}

impl fmt::Display for DuplicateNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NOTE: Already seen {} {} in {}, yet again in {}",
            self.kind.as_str(),
            self.name,
            self.first_file,
            self.again_file
        )
    }
}

/// Everything generated for one host package.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageBucket {
    pub package: String,
    /// Sorted by function name.
    pub artifacts: Vec<FunctionArtifact>,
    /// Named types declared in this package, with their defining files.
    pub types: BTreeMap<QualifiedName, String>,
    /// Host import paths referenced by usable shims.
    pub imports: BTreeSet<String>,
    /// Whether any artifact is usable.
    pub non_empty: bool,
}

impl PackageBucket {
    fn new(package: &str) -> Self {
        PackageBucket {
            package: package.to_string(),
            ..PackageBucket::default()
        }
    }

    fn push(&mut self, artifact: FunctionArtifact) {
        if artifact.usable {
            self.non_empty = true;
            self.imports.insert(artifact.import_path().to_string());
        }
        self.artifacts.push(artifact);
    }

    /// All stubs, in artifact order.
    pub fn stub_body(&self) -> String {
        self.artifacts.iter().map(|a| a.dynamic_stub.as_str()).collect()
    }

    /// All shims, in artifact order.
    pub fn shim_body(&self) -> String {
        self.artifacts.iter().map(|a| a.host_shim.as_str()).collect()
    }
}

/// The assembled output of one batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Batch {
    packages: BTreeMap<String, PackageBucket>,
    report: BatchReport,
}

impl Batch {
    /// Every package seen, sorted by import path.
    pub fn packages(&self) -> impl Iterator<Item = &PackageBucket> {
        self.packages.values()
    }

    /// Packages handed to the writer. Packages without a usable artifact
    /// are included only when `include_empty` is set.
    pub fn packages_to_emit(&self, include_empty: bool) -> impl Iterator<Item = &PackageBucket> {
        self.packages
            .values()
            .filter(move |bucket| bucket.non_empty || include_empty)
    }

    pub fn bucket(&self, package: &str) -> Option<&PackageBucket> {
        self.packages.get(package)
    }

    pub fn report(&self) -> &BatchReport {
        &self.report
    }
}

/// Collects declarations, then generates and groups every function.
#[derive(Debug, Default)]
pub struct PackageAssembler {
    registry: TypeRegistry,
    functions: BTreeMap<QualifiedName, FunctionDecl>,
    duplicates: Vec<DuplicateNote>,
}

fn check_name(name: &QualifiedName, file: &str) -> Result<(), BindError> {
    if name.package().is_empty() || name.name().is_empty() {
        return Err(BindError::MalformedName {
            name: name.to_string(),
            file: file.to_string(),
        });
    }
    Ok(())
}

impl PackageAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_declarations(&mut self, declarations: Declarations) -> Result<(), BindError> {
        for decl in &declarations.types {
            self.add_type(decl)?;
        }
        for decl in declarations.functions {
            self.add_function(decl)?;
        }
        Ok(())
    }

    pub fn add_type(&mut self, decl: &TypeDecl) -> Result<(), BindError> {
        check_name(&decl.name, &decl.file)?;
        if let Registration::Duplicate { first_file } = self.registry.register(decl)? {
            tracing::warn!(name = %decl.name, %first_file, again = %decl.file, "duplicate type");
            self.duplicates.push(DuplicateNote {
                kind: DeclKind::Type,
                name: decl.name.clone(),
                first_file,
                again_file: decl.file.clone(),
            });
        }
        Ok(())
    }

    pub fn add_function(&mut self, decl: FunctionDecl) -> Result<(), BindError> {
        check_name(&decl.name, &decl.file)?;
        if let Some(first) = self.functions.get(&decl.name) {
            tracing::warn!(name = %decl.name, first_file = %first.file, again = %decl.file, "duplicate function");
            self.duplicates.push(DuplicateNote {
                kind: DeclKind::Function,
                name: decl.name.clone(),
                first_file: first.file.clone(),
                again_file: decl.file,
            });
            return Ok(());
        }
        self.functions.insert(decl.name.clone(), decl);
        Ok(())
    }

    /// Generate every function and group the results by package.
    pub fn assemble(mut self) -> Result<Batch, BindError> {
        let mut packages: BTreeMap<String, PackageBucket> = BTreeMap::new();
        let mut report = BatchReport {
            types: self.registry.len(),
            functions: self.functions.len(),
            ..BatchReport::default()
        };

        for name in self.registry.names() {
            let file = self.registry.file(name).unwrap_or_default().to_string();
            packages
                .entry(name.package().to_string())
                .or_insert_with(|| PackageBucket::new(name.package()))
                .types
                .insert(name.clone(), file);
        }

        let mut symbols = SymbolAllocator::new();
        for decl in self.functions.values() {
            let artifact = generate_function(decl, &mut self.registry, &mut symbols)?;
            if artifact.usable {
                report.generated += 1;
            } else {
                report.sentinels.merge(&scan(&artifact.dynamic_stub));
                report.sentinels.merge(&scan(&artifact.host_shim));
            }
            packages
                .entry(decl.name.package().to_string())
                .or_insert_with(|| PackageBucket::new(decl.name.package()))
                .push(artifact);
        }

        for bucket in packages.values() {
            if !bucket.non_empty {
                tracing::debug!(package = %bucket.package, "package has no usable artifact");
            }
        }

        self.duplicates.sort();
        report.duplicates = self.duplicates.iter().map(ToString::to_string).collect();
        Ok(Batch { packages, report })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
