//! Benchmark aggregation and reporting.
//!
//! Collects per-run metrics for both strategies, averages them, and
//! renders a comparison table plus a JSON-serializable report.

use serde::{Deserialize, Serialize};

use crate::runner::StrategyRun;

/// Price per million input tokens, USD.
pub const INPUT_TOKEN_PRICE: f64 = 3.0;

/// Price per million output tokens, USD.
pub const OUTPUT_TOKEN_PRICE: f64 = 15.0;

/// Metrics captured from one strategy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Model call wall-clock seconds.
    pub model_seconds: f64,
    /// Local edit application seconds (zero for full rewrite).
    pub apply_seconds: f64,
    pub headings_added: u64,
}

impl From<&StrategyRun> for RunMetrics {
    fn from(run: &StrategyRun) -> Self {
        Self {
            input_tokens: run.usage.input_tokens,
            output_tokens: run.usage.output_tokens,
            model_seconds: run.model_time.as_secs_f64(),
            apply_seconds: run.apply_time.as_secs_f64(),
            headings_added: run.headings_added,
        }
    }
}

impl RunMetrics {
    fn total_seconds(&self) -> f64 {
        self.model_seconds + self.apply_seconds
    }

    fn cost(&self) -> f64 {
        self.input_tokens as f64 * (INPUT_TOKEN_PRICE / 1_000_000.0)
            + self.output_tokens as f64 * (OUTPUT_TOKEN_PRICE / 1_000_000.0)
    }
}

/// Averages over the runs of one strategy.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StrategyAverages {
    pub input_tokens: f64,
    pub output_tokens: f64,
    pub total_seconds: f64,
    pub headings_added: f64,
    pub cost: f64,
}

fn average(runs: &[RunMetrics]) -> StrategyAverages {
    if runs.is_empty() {
        return StrategyAverages::default();
    }
    let n = runs.len() as f64;
    StrategyAverages {
        input_tokens: runs.iter().map(|r| r.input_tokens as f64).sum::<f64>() / n,
        output_tokens: runs.iter().map(|r| r.output_tokens as f64).sum::<f64>() / n,
        total_seconds: runs.iter().map(|r| r.total_seconds()).sum::<f64>() / n,
        headings_added: runs.iter().map(|r| r.headings_added as f64).sum::<f64>() / n,
        cost: runs.iter().map(|r| r.cost()).sum::<f64>() / n,
    }
}

/// Full benchmark report: both strategies on the same document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Size of the input document in bytes.
    pub document_size: usize,
    pub full_runs: Vec<RunMetrics>,
    pub edit_runs: Vec<RunMetrics>,
}

impl BenchmarkReport {
    /// Empty report for a document of the given size.
    #[must_use]
    pub fn new(document_size: usize) -> Self {
        Self {
            document_size,
            full_runs: Vec::new(),
            edit_runs: Vec::new(),
        }
    }

    /// Record one run under its strategy.
    pub fn record(&mut self, run: &StrategyRun) {
        let metrics = RunMetrics::from(run);
        match run.strategy {
            crate::runner::Strategy::FullRewrite => self.full_runs.push(metrics),
            crate::runner::Strategy::EditTrick => self.edit_runs.push(metrics),
        }
    }

    /// Averages for the full-rewrite runs.
    pub fn full_averages(&self) -> StrategyAverages {
        average(&self.full_runs)
    }

    /// Averages for the edit-trick runs.
    pub fn edit_averages(&self) -> StrategyAverages {
        average(&self.edit_runs)
    }

    /// Render the comparison as an aligned text table.
    pub fn format_table(&self) -> String {
        let full = self.full_averages();
        let edit = self.edit_averages();

        let mut out = String::new();
        out.push_str(&format!(
            "Benchmark results (document: {} bytes, {} run(s) per strategy)\n",
            self.document_size,
            self.full_runs.len().max(self.edit_runs.len()),
        ));
        out.push_str(&format!(
            "{:<18} {:>14} {:>14} {:>20}\n",
            "Metric", "Full rewrite", "Edit trick", "Difference"
        ));

        let rows = [
            (
                "Estimated cost",
                format!("${:.6}", full.cost),
                format!("${:.6}", edit.cost),
                diff_cell(full.cost, edit.cost, "$", 6),
            ),
            (
                "Output tokens",
                format!("{:.0}", full.output_tokens),
                format!("{:.0}", edit.output_tokens),
                diff_cell(full.output_tokens, edit.output_tokens, "", 0),
            ),
            (
                "Input tokens",
                format!("{:.0}", full.input_tokens),
                format!("{:.0}", edit.input_tokens),
                diff_cell(full.input_tokens, edit.input_tokens, "", 0),
            ),
            (
                "Total time",
                format!("{:.2}s", full.total_seconds),
                format!("{:.2}s", edit.total_seconds),
                diff_cell(full.total_seconds, edit.total_seconds, "", 2),
            ),
            (
                "Headings added",
                format!("{:.0}", full.headings_added),
                format!("{:.0}", edit.headings_added),
                format!("{:.0}", full.headings_added - edit.headings_added),
            ),
        ];
        for (metric, a, b, d) in rows {
            out.push_str(&format!("{metric:<18} {a:>14} {b:>14} {d:>20}\n"));
        }

        out.push('\n');
        out.push_str(&format!(
            "The edit trick was {} and used {} output tokens.\n",
            comparative(full.total_seconds, edit.total_seconds, "faster", "slower"),
            comparative(full.output_tokens, edit.output_tokens, "fewer", "more"),
        ));
        out
    }
}

/// "full - edit" cell with a percentage of the full-rewrite value.
fn diff_cell(full: f64, edit: f64, unit: &str, decimals: usize) -> String {
    let diff = full - edit;
    if full.abs() < f64::EPSILON {
        return format!("{unit}{diff:.decimals$}");
    }
    let pct = diff / full * 100.0;
    format!("{unit}{diff:.decimals$} ({pct:.1}%)")
}

/// Phrase the edit-trick side of a comparison.
fn comparative(full: f64, edit: f64, when_less: &str, when_more: &str) -> String {
    if full.abs() < f64::EPSILON {
        return format!("0.0% {when_more}");
    }
    let pct = (full - edit) / full * 100.0;
    if pct >= 0.0 {
        format!("{:.1}% {when_less}", pct)
    } else {
        format!("{:.1}% {when_more}", -pct)
    }
}
