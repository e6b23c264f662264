//! Text helpers shared by the stub and shim emitters.

use std::fmt::Write as _;

/// Runtime expression for "no value".
pub const ABSENT: &str = "NIL";

/// Comment marker for the dynamic-language stub.
pub const STUB_COMMENT: &str = ";;";

/// Comment marker for the host-language shim.
pub const SHIM_COMMENT: &str = "//";

/// Host indentation for `depth` levels.
pub fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

/// Add one level of indentation to every non-empty line.
pub fn indent_block(code: &str) -> String {
    prefix_lines(code, "\t")
}

/// Comment out every non-empty line with `marker`.
///
/// Used for artifacts that contain a sentinel: they stay in the output for
/// inspection instead of being dropped.
pub fn comment_out(text: &str, marker: &str) -> String {
    prefix_lines(text, &format!("{marker} "))
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len() + prefix.len() * 8);
    for line in text.split_inclusive('\n') {
        if !line.starts_with('\n') {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

/// Host entry-point name for an exported function: first letter lowered.
pub fn private_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Quote `text` as a double-quoted string literal.
///
/// The escape set is shared by the host and the dynamic reader, so the same
/// literal works on both sides.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
