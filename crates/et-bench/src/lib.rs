//! # et-bench
//!
//! Runs the two annotation strategies and compares them.
//!
//! | Strategy | Model output | Local work |
//! |----------|--------------|------------|
//! | `full-rewrite` | The whole annotated document | none |
//! | `edit-trick` | JSON edit list | parse + apply |
//!
//! A [`StrategyRun`] captures one execution: output text, token usage,
//! model wall-clock time, and (for the edit path) local apply time and the
//! parsed edits. [`BenchmarkReport`] aggregates runs of both strategies
//! into averages and an estimated cost comparison.
//!
//! No correctness checking between the two outputs: the operator inspects
//! them.

pub mod report;
pub mod runner;

pub use report::{BenchmarkReport, RunMetrics, INPUT_TOKEN_PRICE, OUTPUT_TOKEN_PRICE};
pub use runner::{run_edit_trick, run_full_rewrite, RunError, Strategy, StrategyRun};
