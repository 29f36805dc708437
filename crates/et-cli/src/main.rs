//! `edit-trick` - compare two LLM document-annotation strategies.
//!
//! # Usage
//!
//! ```bash
//! # Full-document rewrite
//! edit-trick full input.txt output.txt
//!
//! # Edit trick: compact edit list applied locally
//! edit-trick edit input.txt output.txt --save-edits edits.json
//!
//! # Replay saved edits without a model call (no API key needed)
//! edit-trick apply-edits input.txt edits.json output.txt
//!
//! # Run both strategies and compare
//! edit-trick benchmark input.txt --output-dir results --runs 3
//! ```
//!
//! Every command that calls the model needs `ANTHROPIC_API_KEY` in the
//! environment or a `.env` file. Output files are written only after the
//! whole pipeline for them has succeeded; a failed run leaves no partial
//! output behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use et_bench::{run_edit_trick, run_full_rewrite, BenchmarkReport, RunError, StrategyRun};
use et_client::{ClaudeClient, ClientError, PromptBuilder};
use et_core::{apply_edits, parse_json, EditError, EditList};

#[derive(Parser)]
#[command(
    name = "edit-trick",
    about = "Compare full-rewrite and edit-list strategies for LLM document annotation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process the document with the traditional full-rewrite strategy.
    Full {
        /// Input document
        input: PathBuf,
        /// Where to write the annotated document
        output: PathBuf,
    },
    /// Process the document with the edit-trick strategy.
    Edit {
        /// Input document
        input: PathBuf,
        /// Where to write the annotated document
        output: PathBuf,
        /// Also save the generated edit list as JSON
        #[arg(long)]
        save_edits: Option<PathBuf>,
    },
    /// Apply a previously saved edit list; no model call, no credential.
    ApplyEdits {
        /// Input document
        input: PathBuf,
        /// Saved edit list (JSON array)
        edits: PathBuf,
        /// Where to write the result
        output: PathBuf,
    },
    /// Run both strategies on the same document and compare them.
    Benchmark {
        /// Input document
        input: PathBuf,
        /// Directory for per-run outputs and the report
        #[arg(long, default_value = "benchmark_results")]
        output_dir: PathBuf,
        /// Benchmark runs per strategy
        #[arg(long, default_value_t = 1)]
        runs: u32,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize edits: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Run(#[from] RunError),
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional; a missing file is not an error.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            if matches!(err, CliError::Client(ClientError::MissingApiKey)) {
                eprintln!();
                eprintln!("Set your API key in the environment or a .env file:");
                eprintln!("  export ANTHROPIC_API_KEY=sk-ant-...");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Full { input, output } => cmd_full(&input, &output).await,
        Command::Edit {
            input,
            output,
            save_edits,
        } => cmd_edit(&input, &output, save_edits.as_deref()).await,
        Command::ApplyEdits {
            input,
            edits,
            output,
        } => cmd_apply_edits(&input, &edits, &output),
        Command::Benchmark {
            input,
            output_dir,
            runs,
        } => cmd_benchmark(&input, &output_dir, runs.max(1)).await,
    }
}

async fn cmd_full(input: &Path, output: &Path) -> Result<(), CliError> {
    let text = read_document(input)?;
    let client = ClaudeClient::from_env()?;
    let prompts = PromptBuilder::default();

    println!("Processing {} with the full-rewrite strategy...", input.display());
    let run = run_full_rewrite(&client, &prompts, &text).await?;

    write_file(output, &run.output)?;
    print_run_summary(&run);
    println!("Output written to: {}", output.display());
    Ok(())
}

async fn cmd_edit(
    input: &Path,
    output: &Path,
    save_edits: Option<&Path>,
) -> Result<(), CliError> {
    let text = read_document(input)?;
    let client = ClaudeClient::from_env()?;
    let prompts = PromptBuilder::default();

    println!("Processing {} with the edit-trick strategy...", input.display());
    let run = run_edit_trick(&client, &prompts, &text).await?;

    write_file(output, &run.output)?;
    if let (Some(path), Some(edits)) = (save_edits, run.edits.as_ref()) {
        write_file(path, &edit_list_json(edits)?)?;
        println!("Edit list saved to: {}", path.display());
    }

    print_run_summary(&run);
    println!("Output written to: {}", output.display());
    Ok(())
}

fn cmd_apply_edits(input: &Path, edits_file: &Path, output: &Path) -> Result<(), CliError> {
    let text = read_document(input)?;
    let edits_json = read_document(edits_file)?;
    let edits = parse_json(&edits_json)?;

    let start = Instant::now();
    let result = apply_edits(&text, &edits)?;
    let apply_time = start.elapsed();

    write_file(output, &result)?;
    println!(
        "Applied {} edit(s) in {:.3}s",
        edits.len(),
        apply_time.as_secs_f64()
    );
    println!("Output written to: {}", output.display());
    Ok(())
}

async fn cmd_benchmark(input: &Path, output_dir: &Path, runs: u32) -> Result<(), CliError> {
    let text = read_document(input)?;
    let client = ClaudeClient::from_env()?;
    let prompts = PromptBuilder::default();

    fs::create_dir_all(output_dir).map_err(|source| CliError::Io {
        action: "create",
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut report = BenchmarkReport::new(text.len());

    for i in 1..=runs {
        println!("=== Run {i}/{runs}: full rewrite ===");
        let full = run_full_rewrite(&client, &prompts, &text).await?;
        write_file(&output_dir.join(format!("full_output_{i}.txt")), &full.output)?;
        report.record(&full);

        println!("=== Run {i}/{runs}: edit trick ===");
        let edit = run_edit_trick(&client, &prompts, &text).await?;
        write_file(&output_dir.join(format!("edit_output_{i}.txt")), &edit.output)?;
        if let Some(edits) = edit.edits.as_ref() {
            write_file(
                &output_dir.join(format!("edits_{i}.json")),
                &edit_list_json(edits)?,
            )?;
        }
        report.record(&edit);
    }

    write_file(
        &output_dir.join("report.json"),
        &serde_json::to_string_pretty(&report)?,
    )?;

    println!();
    print!("{}", report.format_table());
    println!();
    println!("Results saved to: {}", output_dir.display());
    Ok(())
}

fn print_run_summary(run: &StrategyRun) {
    println!("Input tokens:   {}", run.usage.input_tokens);
    println!("Output tokens:  {}", run.usage.output_tokens);
    println!("Total tokens:   {}", run.usage.total());
    println!("Model time:     {:.2}s", run.model_time.as_secs_f64());
    if let Some(edits) = run.edits.as_ref() {
        println!("Generated edits: {}", edits.len());
        println!("Apply time:     {:.3}s", run.apply_time.as_secs_f64());
        println!("Total time:     {:.2}s", run.total_time().as_secs_f64());
    }
}

fn edit_list_json(edits: &EditList) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(edits)?)
}

fn read_document(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CliError::FileNotFound(path.to_path_buf())
        } else {
            CliError::Io {
                action: "read",
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn apply_edits_round_trips_saved_list() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.txt");
        let edits = dir.path().join("edits.json");
        let output = dir.path().join("out.txt");

        fs::write(&input, "Intro\nBody\nConclusion").unwrap();
        fs::write(
            &edits,
            r##"[{"anchor": "Body", "kind": "insert_before", "text": "# Section\n"}]"##,
        )
        .unwrap();

        cmd_apply_edits(&input, &edits, &output).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Intro\n# Section\nBody\nConclusion"
        );
    }

    #[test]
    fn malformed_edits_file_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.txt");
        let edits = dir.path().join("edits.json");
        let output = dir.path().join("out.txt");

        fs::write(&input, "Intro\nBody\nConclusion").unwrap();
        fs::write(&edits, "not json").unwrap();

        let err = cmd_apply_edits(&input, &edits, &output).unwrap_err();
        assert!(matches!(
            err,
            CliError::Edit(EditError::MalformedResponse(_))
        ));
        assert!(!output.exists(), "no partial output on failure");
    }

    #[test]
    fn missing_anchor_leaves_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.txt");
        let edits = dir.path().join("edits.json");
        let output = dir.path().join("out.txt");

        fs::write(&input, "Intro\nBody\nConclusion").unwrap();
        fs::write(
            &edits,
            r##"[{"anchor": "Appendix", "kind": "insert_before", "text": "# A\n"}]"##,
        )
        .unwrap();

        let err = cmd_apply_edits(&input, &edits, &output).unwrap_err();
        assert!(matches!(err, CliError::Edit(EditError::AnchorNotFound(_))));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let err = read_document(&missing).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
