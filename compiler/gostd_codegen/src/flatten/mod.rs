//! Result-list flattening.
//!
//! A host call may return zero, one, or several values; the runtime side
//! always receives exactly one object. Several results are conjoined, in
//! declaration order, into one ordered vector.

use gostd_diagnostic::{Sentinel, SentinelCode};
use gostd_ir::ResultField;

use crate::emit::ABSENT;
use crate::translate::{Guard, Translator, ValueHandle};

/// Accumulator bound for multi-result vectors, and the capture for a
/// single result that needs statements before it can be returned.
const RESULT_VAR: &str = "_res";

/// Dynamic description of a function that returns nothing.
const NO_RESULT_DOC: &str = "Nil";

const NO_INFORMATION: &str = "no public information returned";

/// Flattened view of a function's result list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlattenedResults {
    pub dynamic_doc: String,
    pub host_sig: String,
    /// Shim statements up to (not including) the final `return`. Includes
    /// the call itself.
    pub code: String,
    /// Expression the shim returns.
    pub final_expr: String,
    pub failures: Vec<Sentinel>,
    /// Whether any result carries usable information.
    pub useful: bool,
}

impl FlattenedResults {
    /// Complete shim body: the statements followed by the return.
    pub fn body(&self) -> String {
        format!("{}\treturn {}\n", self.code, self.final_expr)
    }
}

/// Flatten `results` around the host call expression `call`.
///
/// The translator's symbol allocator must already be reset for the
/// function being generated.
pub fn flatten(translator: &mut Translator<'_>, results: &[ResultField], call: &str) -> FlattenedResults {
    match results {
        [] => FlattenedResults {
            dynamic_doc: NO_RESULT_DOC.to_string(),
            host_sig: String::new(),
            code: format!("\t{call}\n"),
            final_expr: ABSENT.to_string(),
            failures: Vec::new(),
            useful: true,
        },
        [single] => flatten_single(translator, single, call),
        _ => flatten_multiple(translator, results, call),
    }
}

fn flatten_single(translator: &mut Translator<'_>, result: &ResultField, call: &str) -> FlattenedResults {
    // No intermediate binding when the conversion is a pure expression.
    if translator.is_inline_convertible(&result.shape) {
        let converted = translator.translate(&result.shape, call, &Guard::always());
        return FlattenedResults {
            dynamic_doc: converted.dynamic_doc,
            host_sig: converted.host_sig,
            code: String::new(),
            final_expr: converted.value.to_string(),
            useful: converted.value.is_useful(),
            failures: converted.failures,
        };
    }

    let converted = translator.translate(&result.shape, RESULT_VAR, &Guard::always());
    let mut failures = converted.failures;
    let useful = converted.value.is_useful();
    let (code, final_expr) = if useful || !failures.is_empty() {
        (
            format!("\t{RESULT_VAR} := {call}\n{}", converted.code),
            converted.value.to_string(),
        )
    } else {
        let sentinel = Sentinel::new(SentinelCode::NoInformationSingle, NO_INFORMATION);
        let token = sentinel.token();
        failures.push(sentinel);
        (format!("\t_ = {call}\n"), token)
    };
    FlattenedResults {
        dynamic_doc: converted.dynamic_doc,
        host_sig: converted.host_sig,
        code,
        final_expr,
        failures,
        useful,
    }
}

fn flatten_multiple(translator: &mut Translator<'_>, results: &[ResultField], call: &str) -> FlattenedResults {
    let mut captures = Vec::with_capacity(results.len());
    let mut docs = Vec::with_capacity(results.len());
    let mut sigs = Vec::with_capacity(results.len());
    let mut body = String::new();
    let mut failures = Vec::new();
    let mut useful = false;

    for result in results {
        let capture = match result.name.as_deref() {
            Some(name) if !name.is_empty() && name != "_" => name.to_string(),
            _ => translator.symbols().next(RESULT_VAR),
        };
        let converted = translator.translate(&result.shape, &capture, &Guard::always());

        body.push_str(&converted.code);
        body.push_str(&format!(
            "\t{RESULT_VAR} = {RESULT_VAR}.Conjoin({})\n",
            converted.value
        ));
        docs.push(converted.dynamic_doc);
        sigs.push(match result.name.as_deref() {
            Some(name) if !name.is_empty() => format!("{name} {}", converted.host_sig),
            _ => converted.host_sig,
        });
        failures.extend(converted.failures);

        // Results that convert to nothing are not captured at all.
        if matches!(converted.value, ValueHandle::Expr(_)) {
            useful = true;
            captures.push(capture);
        } else {
            captures.push("_".to_string());
        }
    }

    let dynamic_doc = format!("[{}]", docs.join(" "));
    let host_sig = format!("({})", sigs.join(", "));
    let assign = if useful { ":=" } else { "=" };
    let capture_line = format!("\t{} {assign} {call}\n", captures.join(", "));

    if !useful && failures.is_empty() {
        let sentinel = Sentinel::new(SentinelCode::NoInformationMulti, NO_INFORMATION);
        let final_expr = sentinel.token();
        failures.push(sentinel);
        return FlattenedResults {
            dynamic_doc,
            host_sig,
            code: capture_line,
            final_expr,
            failures,
            useful,
        };
    }

    FlattenedResults {
        dynamic_doc,
        host_sig,
        code: format!("{capture_line}\t{RESULT_VAR} := EmptyVector\n{body}"),
        final_expr: RESULT_VAR.to_string(),
        failures,
        useful,
    }
}
