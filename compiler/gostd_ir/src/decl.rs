//! Declaration records handed over by the discovery collaborator.
//!
//! Visibility filtering has already happened upstream: every declaration
//! seen here is intended for translation.

use serde::{Deserialize, Serialize};

use crate::{QualifiedName, TypeShape};

/// A function parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub shape: TypeShape,
}

/// A function result. Host results may be unnamed.
///
/// A host field list that declares several names for one type
/// (`(a, b string)`) arrives already split into one entry per name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultField {
    #[serde(default)]
    pub name: Option<String>,
    pub shape: TypeShape,
}

impl ResultField {
    pub fn unnamed(shape: TypeShape) -> Self {
        ResultField { name: None, shape }
    }

    pub fn named(name: impl Into<String>, shape: TypeShape) -> Self {
        ResultField {
            name: Some(name.into()),
            shape,
        }
    }
}

/// A standalone (non-method) function declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: QualifiedName,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub results: Vec<ResultField>,
    #[serde(default)]
    pub doc: Option<String>,
    /// Unix-style path of the defining file, relative to the source root.
    #[serde(default)]
    pub file: String,
}

impl FunctionDecl {
    pub fn new(name: QualifiedName) -> Self {
        FunctionDecl {
            name,
            params: Vec::new(),
            results: Vec::new(),
            doc: None,
            file: String::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, shape: TypeShape) -> Self {
        self.params.push(Param {
            name: name.into(),
            shape,
        });
        self
    }

    #[must_use]
    pub fn with_result(mut self, result: ResultField) -> Self {
        self.results.push(result);
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }
}

/// A named type declaration.
///
/// `shape` is optional only so that a malformed manifest can be decoded and
/// then rejected with a precise error by the registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: QualifiedName,
    #[serde(default)]
    pub shape: Option<TypeShape>,
    #[serde(default)]
    pub file: String,
}

impl TypeDecl {
    pub fn new(name: QualifiedName, shape: TypeShape) -> Self {
        TypeDecl {
            name,
            shape: Some(shape),
            file: String::new(),
        }
    }

    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }
}

/// One batch of declarations, in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarations {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
}
