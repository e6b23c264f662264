//! Embeddable "translation failed here" markers.
//!
//! Token format: `ABEND<nnn>(<message>)`. The message is normalized to a
//! single line with no parentheses so a token is always one balanced span
//! that can sit inside a type annotation, a code line, or a docstring.

use std::fmt;

use crate::SentinelTally;

/// Marker prefix shared by every sentinel token.
pub const SENTINEL_PREFIX: &str = "ABEND";

/// Sentinel codes.
///
/// The numeric values are part of the output format: batch reports and
/// downstream greps key on them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum SentinelCode {
    /// A `Named` shape refers to a name the registry does not hold.
    UnknownType,
    /// Multiple results, none of which carries usable information.
    NoInformationMulti,
    /// Single result that carries no usable information.
    NoInformationSingle,
    /// Parameter without a usable name.
    UnnamedParam,
    /// Shape the translator does not handle (func, chan, interface, map, ...).
    UnsupportedShape,
    /// Parameter type the stub/shim pair cannot pass through.
    UnsupportedParam,
    /// Named type reached again while it was still being translated.
    RecursiveType,
}

impl SentinelCode {
    pub fn number(self) -> u16 {
        match self {
            SentinelCode::UnknownType => 42,
            SentinelCode::NoInformationMulti => 123,
            SentinelCode::NoInformationSingle => 124,
            SentinelCode::UnnamedParam => 712,
            SentinelCode::UnsupportedShape => 883,
            SentinelCode::UnsupportedParam => 885,
            SentinelCode::RecursiveType => 947,
        }
    }
}

impl fmt::Display for SentinelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SENTINEL_PREFIX}{:03}", self.number())
    }
}

/// A typed translation failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sentinel {
    code: SentinelCode,
    message: String,
}

impl Sentinel {
    pub fn new(code: SentinelCode, message: impl AsRef<str>) -> Self {
        Sentinel {
            code,
            message: normalize_message(message.as_ref()),
        }
    }

    pub fn code(&self) -> SentinelCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The embeddable text form.
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.code, self.message)
    }
}

fn normalize_message(message: &str) -> String {
    message
        .trim()
        .chars()
        .map(|c| match c {
            '(' => '[',
            ')' => ']',
            '\n' | '\r' | '\t' => ' ',
            c => c,
        })
        .collect()
}

/// Numeric codes of every token in `text`, in order of appearance.
///
/// A token is the prefix, exactly three digits, then `(`. Host identifiers
/// never contain `(`, so a name like `ABEND1` or `ABEND123x` is not a token.
fn tokens(text: &str) -> impl Iterator<Item = u16> + '_ {
    text.match_indices(SENTINEL_PREFIX).filter_map(|(start, _)| {
        let rest = text[start + SENTINEL_PREFIX.len()..].as_bytes();
        match rest {
            [a, b, c, b'(', ..] if [a, b, c].iter().all(|d| d.is_ascii_digit()) => {
                Some(u16::from(a - b'0') * 100 + u16::from(b - b'0') * 10 + u16::from(c - b'0'))
            }
            _ => None,
        }
    })
}

/// Does `text` contain at least one sentinel token?
pub fn contains_sentinel(text: &str) -> bool {
    tokens(text).next().is_some()
}

/// Extract and tally every sentinel code in `text`.
///
/// Codes that this crate does not define are still counted: the tally is
/// keyed by number, so text produced by other tool versions scans cleanly.
pub fn scan(text: &str) -> SentinelTally {
    let mut tally = SentinelTally::default();
    for number in tokens(text) {
        tally.record(number);
    }
    tally
}
