//! Structural type shapes.
//!
//! A [`TypeShape`] describes a host type independently of how it is spelled
//! in source. Shapes are structurally recursive and immutable; references to
//! other declarations go through [`TypeShape::Named`] so that recursive type
//! graphs stay finite as values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QualifiedName;

/// Host integer kinds. All of them convert to the runtime's single `Int`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntKind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint16,
    Uint32,
    Uint64,
}

impl IntKind {
    pub fn host_name(self) -> &'static str {
        match self {
            IntKind::Int => "int",
            IntKind::Int8 => "int8",
            IntKind::Int16 => "int16",
            IntKind::Int32 => "int32",
            IntKind::Int64 => "int64",
            IntKind::Uint => "uint",
            IntKind::Uint16 => "uint16",
            IntKind::Uint32 => "uint32",
            IntKind::Uint64 => "uint64",
        }
    }
}

/// Primitive leaf kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PrimitiveKind {
    String,
    Integer(IntKind),
    Byte,
    Bool,
    /// The host's error interface. Absent (nil) errors convert to the
    /// runtime's absence marker.
    Error,
}

impl PrimitiveKind {
    /// Spelling of this kind in host source.
    pub fn host_name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer(kind) => kind.host_name(),
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Error => "error",
        }
    }

    /// Look a kind up by its host spelling.
    pub fn from_host_name(name: &str) -> Option<Self> {
        let kind = match name {
            "string" => PrimitiveKind::String,
            "int" => PrimitiveKind::Integer(IntKind::Int),
            "int8" => PrimitiveKind::Integer(IntKind::Int8),
            "int16" => PrimitiveKind::Integer(IntKind::Int16),
            "int32" => PrimitiveKind::Integer(IntKind::Int32),
            "int64" => PrimitiveKind::Integer(IntKind::Int64),
            "uint" => PrimitiveKind::Integer(IntKind::Uint),
            "uint16" => PrimitiveKind::Integer(IntKind::Uint16),
            "uint32" => PrimitiveKind::Integer(IntKind::Uint32),
            "uint64" => PrimitiveKind::Integer(IntKind::Uint64),
            "byte" | "uint8" => PrimitiveKind::Byte,
            "bool" => PrimitiveKind::Bool,
            "error" => PrimitiveKind::Error,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

impl TryFrom<String> for PrimitiveKind {
    type Error = UnknownPrimitive;

    fn try_from(name: String) -> Result<Self, UnknownPrimitive> {
        PrimitiveKind::from_host_name(&name).ok_or(UnknownPrimitive(name))
    }
}

impl From<PrimitiveKind> for String {
    fn from(kind: PrimitiveKind) -> Self {
        kind.host_name().to_string()
    }
}

/// A host spelling that is not one of the supported primitive kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPrimitive(pub String);

impl fmt::Display for UnknownPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown primitive type `{}`", self.0)
    }
}

impl std::error::Error for UnknownPrimitive {}

/// Visibility of a struct field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Exported,
    Private,
}

impl Visibility {
    /// Host rule: identifiers starting with an upper-case letter are exported.
    pub fn of_identifier(name: &str) -> Self {
        if name.chars().next().is_some_and(char::is_uppercase) {
            Visibility::Exported
        } else {
            Visibility::Private
        }
    }
}

/// One field of a struct shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldShape {
    pub name: String,
    pub visibility: Visibility,
    pub shape: TypeShape,
}

impl FieldShape {
    /// Build a field whose visibility follows the host identifier rule.
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        let name = name.into();
        FieldShape {
            visibility: Visibility::of_identifier(&name),
            name,
            shape,
        }
    }

    pub fn is_exported(&self) -> bool {
        self.visibility == Visibility::Exported
    }
}

/// The structural description of a host type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeShape {
    Primitive(PrimitiveKind),
    /// Reference to a declaration held by the type registry.
    Named(QualifiedName),
    /// Optional (nil-able) indirection.
    Pointer(Box<TypeShape>),
    /// Homogeneous ordered collection.
    Sequence(Box<TypeShape>),
    /// Fields in declaration order.
    Struct(Vec<FieldShape>),
    /// Function, channel, interface and map types, or anything else the
    /// generator does not translate. Carries a human-readable description.
    Unsupported(String),
}

impl TypeShape {
    pub fn string() -> Self {
        TypeShape::Primitive(PrimitiveKind::String)
    }

    pub fn int() -> Self {
        TypeShape::Primitive(PrimitiveKind::Integer(IntKind::Int))
    }

    pub fn bool() -> Self {
        TypeShape::Primitive(PrimitiveKind::Bool)
    }

    pub fn error() -> Self {
        TypeShape::Primitive(PrimitiveKind::Error)
    }

    pub fn named(name: QualifiedName) -> Self {
        TypeShape::Named(name)
    }

    pub fn pointer(inner: TypeShape) -> Self {
        TypeShape::Pointer(Box::new(inner))
    }

    pub fn sequence(element: TypeShape) -> Self {
        TypeShape::Sequence(Box::new(element))
    }

    pub fn unsupported(description: impl Into<String>) -> Self {
        TypeShape::Unsupported(description.into())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
