//! Deterministic temporary names.

use rustc_hash::FxHashMap;

/// Fresh-name generator scoped to one top-level function.
///
/// `next("_vec")` yields `_vec1`, `_vec2`, ...; each prefix counts on its
/// own. The allocator is reset before every function so generated names
/// depend only on that function's own shape, never on what was translated
/// before it.
#[derive(Clone, Debug, Default)]
pub struct SymbolAllocator {
    counters: FxHashMap<String, u32>,
}

impl SymbolAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `prefix` followed by the next 1-based counter for that prefix.
    pub fn next(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format!("{prefix}{counter}")
    }

    pub fn reset(&mut self) {
        self.counters.clear();
    }
}
