//! Batch-level summary.

use std::fmt;

use gostd_diagnostic::SentinelTally;

/// Totals for one batch, printed by the CLI's summary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub types: usize,
    pub functions: usize,
    /// Functions whose artifacts are usable.
    pub generated: usize,
    /// Sentinel occurrences across every disabled artifact's text.
    pub sentinels: SentinelTally,
    /// Duplicate-declaration notes, sorted.
    pub duplicates: Vec<String>,
}

impl BatchReport {
    /// Share of functions generated, as a percentage with two decimals, or
    /// `--` for an empty batch.
    pub fn generated_percentage(&self) -> String {
        if self.functions == 0 {
            return "--".to_string();
        }
        #[expect(clippy::cast_precision_loss, reason = "declaration counts are far below 2^52")]
        let pct = self.generated as f64 / self.functions as f64 * 100.0;
        format!("{pct:.2}")
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ABENDs:{}", self.sentinels)?;
        write!(
            f,
            "Totals: types={} functions={} generated={} ({}%)",
            self.types,
            self.functions,
            self.generated,
            self.generated_percentage()
        )
    }
}
