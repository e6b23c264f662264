//! Qualified declaration names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A declaration's identity: the package import path plus the bare name.
///
/// Written as `net/url.URL`. The package path may itself contain dots
/// (`golang.org/x/net/html.Node`), so parsing splits at the *last* dot.
///
/// Ordering is by package path, then name, which gives the total order
/// used for every deterministic walk in the generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName {
    package: String,
    name: String,
}

impl QualifiedName {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        QualifiedName {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Parse `package/path.Name`.
    pub fn parse(text: &str) -> Result<Self, InvalidQualifiedName> {
        match text.rsplit_once('.') {
            Some((package, name)) if !package.is_empty() && !name.is_empty() => {
                Ok(QualifiedName::new(package, name))
            }
            _ => Err(InvalidQualifiedName(text.to_string())),
        }
    }

    /// Package import path, e.g. `net/url`.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Bare declaration name, e.g. `URL`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last segment of the package path, e.g. `url` for `net/url`.
    pub fn package_base(&self) -> &str {
        self.package
            .rsplit_once('/')
            .map_or(self.package.as_str(), |(_, base)| base)
    }

    /// How host source spells a reference to this name from outside its
    /// package: `url.URL`.
    pub fn host_spelling(&self) -> String {
        format!("{}.{}", self.package_base(), self.name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = InvalidQualifiedName;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        QualifiedName::parse(&text)
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

/// A string that does not have the `package.Name` form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidQualifiedName(pub String);

impl fmt::Display for InvalidQualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a qualified name of the form package.Name", self.0)
    }
}

impl std::error::Error for InvalidQualifiedName {}
