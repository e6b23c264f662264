//! Per-function stub and shim generation.
//!
//! Each exported host function becomes a pair of coupled text blocks:
//!
//! ```text
//! (defn Parse                               func parse(rawurl string) Object {
//!   "...Joker return type: ..."               _res1, _res2 := _url.Parse(rawurl)
//!   {:added "1.0"                             ...
//!    :go "parse(_rawurl)"}                  }
//!   [^String _rawurl])
//! ```
//!
//! A pair that carries any sentinel is kept, but commented out line by line.

use gostd_diagnostic::{contains_sentinel, BindError, Sentinel, SentinelCode};
use gostd_ir::{FunctionDecl, IntKind, Param, PrimitiveKind, QualifiedName, TypeShape};

use crate::emit::{comment_out, private_name, quote, SHIM_COMMENT, STUB_COMMENT};
use crate::flatten::flatten;
use crate::registry::TypeRegistry;
use crate::symbols::SymbolAllocator;
use crate::translate::Translator;

/// Generated output for one function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionArtifact {
    pub name: QualifiedName,
    /// `defn` form for the dynamic runtime.
    pub dynamic_stub: String,
    /// Host function the stub calls through.
    pub host_shim: String,
    /// Host entry-point name referenced from the stub.
    pub host_entry: String,
    pub usable: bool,
    /// Every failure, parameters first, then results.
    pub failures: Vec<Sentinel>,
}

impl FunctionArtifact {
    /// Host import path the shim calls into.
    pub fn import_path(&self) -> &str {
        self.name.package()
    }
}

/// One translated parameter.
struct ParamText {
    stub: String,
    shim: String,
    dynamic_arg: String,
    host_arg: String,
}

fn translate_param(param: &Param) -> Result<ParamText, Sentinel> {
    if param.name.is_empty() || param.name == "_" {
        return Err(Sentinel::new(SentinelCode::UnnamedParam, "unnamed parameter"));
    }
    let dynamic_type = match &param.shape {
        TypeShape::Primitive(PrimitiveKind::String) => "String",
        TypeShape::Primitive(PrimitiveKind::Integer(IntKind::Int)) => "Int",
        TypeShape::Primitive(PrimitiveKind::Byte) => "Byte",
        TypeShape::Primitive(PrimitiveKind::Bool) => "Bool",
        other => {
            return Err(Sentinel::new(
                SentinelCode::UnsupportedParam,
                format!("unsupported parameter type {} for {}", describe(other), param.name),
            ))
        }
    };
    let host_type = match &param.shape {
        TypeShape::Primitive(kind) => kind.host_name(),
        _ => dynamic_type,
    };
    let dynamic_arg = format!("_{}", param.name);
    Ok(ParamText {
        stub: format!("^{dynamic_type} {dynamic_arg}"),
        shim: format!("{} {host_type}", param.name),
        dynamic_arg,
        host_arg: param.name.clone(),
    })
}

/// Short host-ish spelling of a parameter shape for messages.
fn describe(shape: &TypeShape) -> String {
    match shape {
        TypeShape::Primitive(kind) => kind.host_name().to_string(),
        TypeShape::Named(name) => name.host_spelling(),
        TypeShape::Pointer(inner) => format!("*{}", describe(inner)),
        TypeShape::Sequence(element) => format!("[]{}", describe(element)),
        TypeShape::Struct(_) => "struct".to_string(),
        TypeShape::Unsupported(description) => description.clone(),
    }
}

/// The stub docstring: doc comment, then both return-type descriptions.
fn docstring(doc: Option<&str>, host_sig: &str, dynamic_doc: &str) -> String {
    let mut text = doc.map(|doc| doc.trim_matches(&[' ', '\t', '\n'][..])).unwrap_or_default().to_string();
    for (label, value) in [("Go return type", host_sig), ("Joker return type", dynamic_doc)] {
        if value.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(&format!("{label}: {value}"));
    }
    quote(&text)
}

/// Generate the stub/shim pair for `decl`.
///
/// Resets `symbols` first so the function's temporaries depend only on its
/// own signature. Fails only when the generated text and the typed failures
/// disagree about whether a sentinel is present.
pub fn generate_function(
    decl: &FunctionDecl,
    registry: &mut TypeRegistry,
    symbols: &mut SymbolAllocator,
) -> Result<FunctionArtifact, BindError> {
    symbols.reset();
    let name = &decl.name;
    let host_entry = private_name(name.name());

    let mut failures = Vec::new();
    let mut stub_params = Vec::with_capacity(decl.params.len());
    let mut shim_params = Vec::with_capacity(decl.params.len());
    let mut dynamic_args = Vec::with_capacity(decl.params.len());
    let mut host_args = Vec::with_capacity(decl.params.len());
    for param in &decl.params {
        match translate_param(param) {
            Ok(text) => {
                stub_params.push(text.stub);
                shim_params.push(text.shim);
                dynamic_args.push(text.dynamic_arg);
                host_args.push(text.host_arg);
            }
            Err(sentinel) => {
                let token = sentinel.token();
                stub_params.push(token.clone());
                shim_params.push(token.clone());
                dynamic_args.push(token.clone());
                host_args.push(token);
                failures.push(sentinel);
            }
        }
    }

    let call = format!(
        "_{}.{}({})",
        name.package_base(),
        name.name(),
        host_args.join(", ")
    );
    let flattened = {
        let mut translator = Translator::new(registry, symbols);
        flatten(&mut translator, &decl.results, &call)
    };
    failures.extend(flattened.failures.iter().cloned());

    let stub_params = stub_params.join(" ");
    let shim_params = shim_params.join(", ");
    let dynamic_call = format!("{host_entry}({})", dynamic_args.join(", "));
    let body = flattened.body();

    let mut dynamic_stub = format!(
        "\n(defn {}\n  {}\n  {{:added \"1.0\"\n   :go \"{dynamic_call}\"}}\n  [{stub_params}])\n",
        name.name(),
        docstring(decl.doc.as_deref(), &flattened.host_sig, &flattened.dynamic_doc),
    );
    let mut host_shim = format!("\nfunc {host_entry}({shim_params}) Object {{\n{body}}}\n");

    // The doc comment is free text from the host source and is left out of
    // the cross-check.
    let usable = failures.is_empty();
    let sentinel_text = [
        stub_params.as_str(),
        dynamic_call.as_str(),
        flattened.host_sig.as_str(),
        flattened.dynamic_doc.as_str(),
        host_shim.as_str(),
    ]
    .iter()
    .any(|text| contains_sentinel(text));
    if usable == sentinel_text {
        return Err(BindError::InconsistentArtifact {
            name: name.clone(),
            usable,
            sentinel_text,
        });
    }

    if usable {
        tracing::trace!(%name, "generated function");
    } else {
        tracing::debug!(%name, failures = failures.len(), "function not usable");
        for sentinel in &failures {
            tracing::trace!(%name, code = %sentinel.code(), message = sentinel.message(), "translation failure");
        }
        dynamic_stub = comment_out(&dynamic_stub, STUB_COMMENT);
        host_shim = comment_out(&host_shim, SHIM_COMMENT);
    }

    Ok(FunctionArtifact {
        name: name.clone(),
        dynamic_stub,
        host_shim,
        host_entry,
        usable,
        failures,
    })
}
