//! Declaration manifests.
//!
//! The discovery pass serializes the declarations it harvested as JSON:
//!
//! ```json
//! {
//!   "types": [{ "name": "net/url.Userinfo", "file": "net/url/url.go",
//!               "shape": { "kind": "struct", "of": [] } }],
//!   "functions": [{ "name": "net/url.PathEscape", "file": "net/url/url.go",
//!                   "params": [{ "name": "s", "shape": { "kind": "primitive", "of": "string" } }],
//!                   "results": [{ "shape": { "kind": "primitive", "of": "string" } }] }]
//! }
//! ```

use std::io::Read;
use std::path::Path;

use gostd_ir::Declarations;

use crate::DriverError;

/// Decode manifest text. `origin` names the source in error messages.
pub fn parse_manifest(text: &str, origin: &str) -> Result<Declarations, DriverError> {
    serde_json::from_str(text).map_err(|source| DriverError::Manifest {
        origin: origin.to_string(),
        source,
    })
}

/// Load a manifest from `path`, or from standard input when `None`.
pub fn load_manifest(path: Option<&Path>) -> Result<Declarations, DriverError> {
    let Some(path) = path else {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| DriverError::Io {
                path: "<stdin>".into(),
                source,
            })?;
        return parse_manifest(&text, "<stdin>");
    };
    let text = std::fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let declarations = parse_manifest(&text, &path.display().to_string())?;
    tracing::debug!(
        path = %path.display(),
        types = declarations.types.len(),
        functions = declarations.functions.len(),
        "loaded manifest"
    );
    Ok(declarations)
}
