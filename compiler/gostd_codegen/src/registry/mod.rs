//! Registry of named host types.
//!
//! Each name carries an explicit visitation state:
//!
//! ```text
//! Unvisited ──resolve──▶ Building ──done──▶ Built(cached)
//!                           │
//!                           └── re-entered while Building: recursive reference
//! ```
//!
//! Re-entering a name that is still `Building` means the type graph loops
//! back on itself (`A` contains `B` contains `A`). That site gets a
//! recursive-reference sentinel instead of an unbounded walk; the outer
//! resolution still completes and caches its (failure-bearing) result.

use std::rc::Rc;

use gostd_diagnostic::{BindError, Sentinel, SentinelCode};
use gostd_ir::{QualifiedName, TypeDecl, TypeShape};
use rustc_hash::FxHashMap;

use crate::symbols::SymbolAllocator;
use crate::translate::{Guard, Translator};

/// Access path used for shape-level (documentation) translations. The code
/// produced against it is discarded.
const DOC_PATH: &str = "_doc";

/// Memoized shape-level translation of a named type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedType {
    pub dynamic_doc: String,
    pub host_sig: String,
    pub failures: Vec<Sentinel>,
    shape: Rc<TypeShape>,
}

impl ResolvedType {
    /// The underlying shape the name stands for.
    pub fn shape(&self) -> Rc<TypeShape> {
        Rc::clone(&self.shape)
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// First recursive-reference failure reachable from this type, if any.
    pub fn recursive_failure(&self) -> Option<&Sentinel> {
        self.failures
            .iter()
            .find(|sentinel| sentinel.code() == SentinelCode::RecursiveType)
    }
}

/// Visitation state of one name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryState {
    Unvisited,
    Building,
    Built(ResolvedType),
}

#[derive(Clone, Debug)]
struct NamedTypeEntry {
    shape: Rc<TypeShape>,
    file: String,
    state: EntryState,
}

/// Outcome of registering a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// The name was already registered from `first_file`; the earlier
    /// definition is kept.
    Duplicate { first_file: String },
}

/// Named-type definitions plus their per-name translation state.
///
/// Shapes are shared through `Rc`, which keeps the registry on one thread:
/// `Building`/`Built` transitions are not safe under concurrent mutation.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    entries: FxHashMap<QualifiedName, NamedTypeEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type declaration. The first definition of a name wins.
    ///
    /// A declaration without a shape, or a name defined twice in the same
    /// file, is malformed input.
    pub fn register(&mut self, decl: &TypeDecl) -> Result<Registration, BindError> {
        let Some(shape) = &decl.shape else {
            return Err(BindError::MissingShape {
                name: decl.name.clone(),
                file: decl.file.clone(),
            });
        };
        if let Some(existing) = self.entries.get(&decl.name) {
            if existing.file == decl.file {
                return Err(BindError::TypeDefinedTwice {
                    name: decl.name.clone(),
                    file: decl.file.clone(),
                });
            }
            return Ok(Registration::Duplicate {
                first_file: existing.file.clone(),
            });
        }
        self.entries.insert(
            decl.name.clone(),
            NamedTypeEntry {
                shape: Rc::new(shape.clone()),
                file: decl.file.clone(),
                state: EntryState::Unvisited,
            },
        );
        Ok(Registration::Added)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.entries.contains_key(name)
    }

    /// File that defined `name` first.
    pub fn file(&self, name: &QualifiedName) -> Option<&str> {
        self.entries.get(name).map(|entry| entry.file.as_str())
    }

    pub fn state(&self, name: &QualifiedName) -> Option<&EntryState> {
        self.entries.get(name).map(|entry| &entry.state)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&QualifiedName> {
        let mut names: Vec<&QualifiedName> = self.entries.keys().collect();
        names.sort();
        names
    }

    /// Shape-level translation of `name`, memoized.
    ///
    /// Unknown names and names re-entered while still `Building` come back
    /// as sentinels. A re-entered name is not marked `Built` here; the
    /// resolution that first entered it finishes and caches it.
    pub fn resolve(&mut self, name: &QualifiedName) -> Result<ResolvedType, Sentinel> {
        let Some(entry) = self.entries.get_mut(name) else {
            tracing::debug!(%name, "unknown type name");
            return Err(Sentinel::new(
                SentinelCode::UnknownType,
                format!("cannot find typename {name}"),
            ));
        };
        let shape = match &entry.state {
            EntryState::Built(resolved) => return Ok(resolved.clone()),
            EntryState::Building => {
                tracing::debug!(%name, "recursive type reference");
                return Err(Sentinel::new(
                    SentinelCode::RecursiveType,
                    format!("recursive type reference involving {name}"),
                ));
            }
            EntryState::Unvisited => Rc::clone(&entry.shape),
        };
        entry.state = EntryState::Building;

        // Temporaries allocated for the discarded documentation code must
        // not leak into the calling function's names.
        let mut scratch = SymbolAllocator::new();
        let translation = Translator::new(self, &mut scratch).translate(&shape, DOC_PATH, &Guard::always());

        let resolved = ResolvedType {
            dynamic_doc: translation.dynamic_doc,
            host_sig: translation.host_sig,
            failures: translation.failures,
            shape,
        };
        if let Some(entry) = self.entries.get_mut(name) {
            entry.state = EntryState::Built(resolved.clone());
        }
        tracing::trace!(%name, clean = resolved.is_clean(), "resolved named type");
        Ok(resolved)
    }
}
