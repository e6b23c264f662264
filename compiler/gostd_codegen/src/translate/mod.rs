//! Type-directed expression translation.
//!
//! [`Translator::translate`] walks a [`TypeShape`] together with an access
//! path (where the value lives in host code) and a [`Guard`] (when it is
//! present), and produces four coupled outputs at once:
//!
//! - the dynamic type description (`(vector-of {:Host ^String})`)
//! - the host type signature (`[]struct {Host string}`)
//! - host statements that must run before the value exists
//! - a handle for the converted value (an expression, the absence marker,
//!   or a failure)
//!
//! Unsupported shapes never abort: they become [`Sentinel`] failures that
//! travel upward inside the [`Translation`] while sibling fields and
//! elements keep translating.

mod guard;

use std::fmt;
use std::rc::Rc;

use gostd_diagnostic::{Sentinel, SentinelCode};
use gostd_ir::{FieldShape, IntKind, PrimitiveKind, QualifiedName, TypeShape};

use crate::emit::{indent, ABSENT};
use crate::registry::TypeRegistry;
use crate::symbols::SymbolAllocator;

pub use guard::Guard;

/// Where a translated value ends up.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueHandle {
    /// Host expression producing the converted runtime object.
    Expr(String),
    /// Nothing useful to convert; binds the absence marker.
    Absent,
    /// Translation failed here.
    Failed(Sentinel),
}

impl ValueHandle {
    pub fn is_useful(&self) -> bool {
        matches!(self, ValueHandle::Expr(_))
    }
}

impl fmt::Display for ValueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueHandle::Expr(expr) => f.write_str(expr),
            ValueHandle::Absent => f.write_str(ABSENT),
            ValueHandle::Failed(sentinel) => write!(f, "{sentinel}"),
        }
    }
}

/// The four outputs of translating one shape at one site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    pub dynamic_doc: String,
    pub host_sig: String,
    /// Statements to run before `value` is available. Empty for
    /// expression-only conversions.
    pub code: String,
    pub value: ValueHandle,
    /// Every failure inside this translation, in walk order.
    pub failures: Vec<Sentinel>,
}

impl Translation {
    fn failed(sentinel: Sentinel, host_sig: impl Into<String>) -> Self {
        Translation {
            dynamic_doc: sentinel.token(),
            host_sig: host_sig.into(),
            code: String::new(),
            value: ValueHandle::Failed(sentinel.clone()),
            failures: vec![sentinel],
        }
    }

    pub fn is_useful(&self) -> bool {
        self.value.is_useful()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Recursive shape translator.
///
/// Borrows the batch's type registry (for `Named` shapes) and the current
/// function's symbol allocator (for temporaries).
pub struct Translator<'a> {
    registry: &'a mut TypeRegistry,
    symbols: &'a mut SymbolAllocator,
    /// Host indentation depth of emitted statements.
    depth: usize,
}

impl<'a> Translator<'a> {
    pub fn new(registry: &'a mut TypeRegistry, symbols: &'a mut SymbolAllocator) -> Self {
        Translator {
            registry,
            symbols,
            depth: 1,
        }
    }

    pub fn symbols(&mut self) -> &mut SymbolAllocator {
        &mut *self.symbols
    }

    pub fn translate(&mut self, shape: &TypeShape, path: &str, guard: &Guard) -> Translation {
        match shape {
            TypeShape::Primitive(kind) => self.translate_primitive(*kind, path, guard, false),
            TypeShape::Named(name) => self.translate_named(name, path, guard),
            TypeShape::Pointer(inner) => self.translate_pointer(inner, path, guard),
            TypeShape::Sequence(element) => self.translate_sequence(element, path, guard),
            TypeShape::Struct(fields) => self.translate_struct(fields, path, guard),
            TypeShape::Unsupported(description) => {
                tracing::trace!(%description, "unsupported shape");
                Translation::failed(
                    Sentinel::new(
                        SentinelCode::UnsupportedShape,
                        format!("unsupported type {description}"),
                    ),
                    description.as_str(),
                )
            }
        }
    }

    /// Whether `shape` converts as a pure expression of its access path,
    /// referencing the path exactly once and emitting no statements.
    ///
    /// Such values can be converted around the call expression itself,
    /// without binding the result first.
    pub fn is_inline_convertible(&mut self, shape: &TypeShape) -> bool {
        match shape {
            TypeShape::Primitive(kind) => *kind != PrimitiveKind::Error,
            TypeShape::Named(name) => match self.registry.resolve(name) {
                Ok(resolved) if resolved.is_clean() => {
                    let underlying = resolved.shape();
                    self.is_inline_convertible(&underlying)
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// `converting` is set when the value's static host type is a named
    /// type over the primitive, so the constructor needs an explicit
    /// conversion to the primitive first.
    fn translate_primitive(
        &mut self,
        kind: PrimitiveKind,
        path: &str,
        guard: &Guard,
        converting: bool,
    ) -> Translation {
        let (dynamic_doc, expr) = match kind {
            PrimitiveKind::String if converting => ("String", format!("MakeString(string({path}))")),
            PrimitiveKind::String => ("String", format!("MakeString({path})")),
            PrimitiveKind::Integer(IntKind::Int) if !converting => ("Int", format!("MakeInt({path})")),
            PrimitiveKind::Integer(_) | PrimitiveKind::Byte => ("Int", format!("MakeInt(int({path}))")),
            PrimitiveKind::Bool if converting => ("Bool", format!("MakeBool(bool({path}))")),
            PrimitiveKind::Bool => ("Bool", format!("MakeBool({path})")),
            PrimitiveKind::Error => ("Error", format!("MakeError({path})")),
        };
        // A nil error is absence, exactly like a nil pointer.
        let guard = if kind == PrimitiveKind::Error {
            guard.and(format!("{path} != nil"))
        } else {
            guard.clone()
        };
        Translation {
            dynamic_doc: dynamic_doc.to_string(),
            host_sig: kind.host_name().to_string(),
            code: String::new(),
            value: ValueHandle::Expr(guard.wrap_expr(&expr)),
            failures: Vec::new(),
        }
    }

    /// The registry memoizes the shape-level description of a name; the
    /// conversion code is instantiated here, against this site's access
    /// path, guard and temporaries.
    ///
    /// Instantiation only descends into names whose resolution carries no
    /// recursive-reference failure. Every name that can reach a cycle
    /// inherits such a failure, so instantiation always terminates.
    fn translate_named(&mut self, name: &QualifiedName, path: &str, guard: &Guard) -> Translation {
        let resolved = match self.registry.resolve(name) {
            Ok(resolved) => resolved,
            Err(sentinel) => return Translation::failed(sentinel, name.host_spelling()),
        };
        if let Some(cycle) = resolved.recursive_failure() {
            return Translation {
                dynamic_doc: resolved.dynamic_doc.clone(),
                host_sig: name.host_spelling(),
                code: String::new(),
                value: ValueHandle::Failed(cycle.clone()),
                failures: resolved.failures.clone(),
            };
        }
        let underlying: Rc<TypeShape> = resolved.shape();
        let mut translation = match underlying.as_ref() {
            TypeShape::Primitive(kind) => self.translate_primitive(*kind, path, guard, true),
            shape => self.translate(shape, path, guard),
        };
        translation.host_sig = name.host_spelling();
        translation
    }

    fn translate_pointer(&mut self, inner: &TypeShape, path: &str, guard: &Guard) -> Translation {
        let guard = guard.and(format!("{path} != nil"));
        let mut translation = self.translate(inner, &format!("(*{path})"), &guard);
        translation.host_sig = format!("*{}", translation.host_sig);
        translation
    }

    fn translate_sequence(&mut self, element: &TypeShape, path: &str, guard: &Guard) -> Translation {
        let vec = self.symbols.next("_vec");
        let elem = self.symbols.next("_elem");

        self.depth += 1;
        let inner = self.translate(element, &elem, &Guard::always());
        self.depth -= 1;

        let dynamic_doc = format!("(vector-of {})", inner.dynamic_doc);
        let host_sig = format!("[]{}", inner.host_sig);
        if !inner.is_useful() {
            let value = match inner.value {
                ValueHandle::Failed(sentinel) => ValueHandle::Failed(sentinel),
                _ => ValueHandle::Absent,
            };
            return Translation {
                dynamic_doc,
                host_sig,
                code: String::new(),
                value,
                failures: inner.failures,
            };
        }

        let ind = indent(self.depth);
        let body = format!(
            "{ind}for _, {elem} := range {path} {{\n\
             {code}\
             {ind}\t{vec} = {vec}.Conjoin({value})\n\
             {ind}}}\n",
            code = inner.code,
            value = inner.value,
        );
        let (code, out) = guard.wrap_statements(self.depth, &vec, "EmptyVector", &body);
        Translation {
            dynamic_doc,
            host_sig,
            code,
            value: ValueHandle::Expr(out),
            failures: inner.failures,
        }
    }

    /// Only exported fields are converted; private fields do not appear in
    /// any output. A struct with no useful field emits no code and binds
    /// the absence marker, or its first failure when a field failed.
    ///
    /// Fields are walked in declaration order, not sorted by name, unlike
    /// every other level of the batch. Declaration order is already
    /// deterministic and keeps the generated map in the host's field order.
    fn translate_struct(&mut self, fields: &[FieldShape], path: &str, guard: &Guard) -> Translation {
        let map = self.symbols.next("_map");
        let ind = indent(self.depth);

        let mut doc_fields = Vec::with_capacity(fields.len());
        let mut sig_fields = Vec::with_capacity(fields.len());
        let mut body = String::new();
        let mut failures = Vec::new();
        let mut useful = false;

        for field in fields.iter().filter(|field| field.is_exported()) {
            let converted = self.translate(
                &field.shape,
                &format!("{path}.{}", field.name),
                &Guard::always(),
            );
            useful |= converted.is_useful();
            body.push_str(&converted.code);
            body.push_str(&format!(
                "{ind}{map}.Add(MakeKeyword(\"{}\"), {})\n",
                field.name, converted.value
            ));
            doc_fields.push(format!(":{} ^{}", field.name, converted.dynamic_doc));
            sig_fields.push(format!("{} {}", field.name, converted.host_sig));
            failures.extend(converted.failures);
        }

        let dynamic_doc = format!("{{{}}}", doc_fields.join(", "));
        let host_sig = format!("struct {{{}}}", sig_fields.join("; "));
        if !useful {
            // Nothing converted: a failure if any field failed, else absence.
            let value = failures
                .first()
                .cloned()
                .map_or(ValueHandle::Absent, ValueHandle::Failed);
            return Translation {
                dynamic_doc,
                host_sig,
                code: String::new(),
                value,
                failures,
            };
        }

        let (code, out) = guard.wrap_statements(self.depth, &map, "EmptyArrayMap()", &body);
        Translation {
            dynamic_doc,
            host_sig,
            code,
            value: ValueHandle::Expr(out),
            failures,
        }
    }
}
