//! Presence guards.
//!
//! A guard is the conjunction of host conditions under which the value at
//! the current access path exists. It grows as translation descends through
//! pointers (and error values) and is materialized exactly once, where the
//! converted value is finally bound.

use smallvec::SmallVec;

use crate::emit::{indent, indent_block, ABSENT};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Guard {
    /// Outermost condition first, so evaluation short-circuits before any
    /// dereference of an absent value.
    conditions: SmallVec<[String; 2]>,
}

impl Guard {
    /// The guard that always holds.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn is_always(&self) -> bool {
        self.conditions.is_empty()
    }

    /// This guard strengthened by `condition`, checked after the existing ones.
    #[must_use]
    pub fn and(&self, condition: impl Into<String>) -> Guard {
        let mut conditions = self.conditions.clone();
        conditions.push(condition.into());
        Guard { conditions }
    }

    /// Host boolean expression for this guard.
    pub fn render(&self) -> String {
        if self.conditions.is_empty() {
            "true".to_string()
        } else {
            self.conditions.join(" && ")
        }
    }

    /// Bind `expr` only when the guard holds, as a single host expression.
    pub fn wrap_expr(&self, expr: &str) -> String {
        if self.is_always() {
            return expr.to_string();
        }
        format!(
            "func() Object {{ if {} {{ return {expr} }} else {{ return {ABSENT} }} }}()",
            self.render()
        )
    }

    /// Bind the accumulator `var` (initialized with `init` and filled by
    /// `body`) only when the guard holds.
    ///
    /// Returns the statements and the name of the bound value.
    pub fn wrap_statements(&self, depth: usize, var: &str, init: &str, body: &str) -> (String, String) {
        let ind = indent(depth);
        if self.is_always() {
            return (format!("{ind}{var} := {init}\n{body}"), var.to_string());
        }
        let out = format!("_obj{var}");
        let code = format!(
            "{ind}var {out} Object\n\
             {ind}if {cond} {{\n\
             {ind}\t{var} := {init}\n\
             {body}\
             {ind}\t{out} = Object({var})\n\
             {ind}}} else {{\n\
             {ind}\t{out} = {ABSENT}\n\
             {ind}}}\n",
            cond = self.render(),
            body = indent_block(body),
        );
        (code, out)
    }
}
