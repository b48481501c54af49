//! json-compare CLI
//!
//! Compares two JSON documents without regard to key or array order.
//!
//! Usage:
//!   json-compare old.json new.json
//!   json-compare --format text --ignore meta.updated_at old.json new.json
//!   cat new.json | json-compare --format json old.json -
//!
//! Exit status is 0 when the documents are equivalent, 1 when they differ
//! and 2 on errors (unreadable input, invalid JSON, non-object documents).

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use json_compare::{CompareOptions, Comparator, Discrepancy};
use serde_json::Value;

mod logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Print `true` or `false`
    Verdict,
    /// One `path: detail` line per discrepancy
    Text,
    /// Discrepancies as a JSON array
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "json-compare")]
#[command(about = "Order-insensitive deep comparison of two JSON documents", long_about = None)]
struct Cli {
    /// Source document (`-` for stdin)
    source: PathBuf,
    /// Target document (`-` for stdin)
    target: PathBuf,
    /// TOML file with comparison options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Maximum nesting depth below the root
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,
    /// Dotted path to leave out of the comparison (repeatable)
    #[arg(long = "ignore", value_name = "PATH")]
    ignore: Vec<String>,
    /// Stop after the first discrepancy
    #[arg(long)]
    first: bool,
    #[arg(long, value_enum, default_value_t = Format::Verdict)]
    format: Format,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    if is_stdin(&cli.source) && is_stdin(&cli.target) {
        bail!("only one document can be read from stdin");
    }
    let options = load_options(cli)?;
    tracing::debug!(?options, "comparison options");

    let source = read_document(&cli.source)?;
    let target = read_document(&cli.target)?;
    let comparator = Comparator::new(options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Verdict => {
            let equal = comparator.compare(&source, &target)?;
            writeln!(out, "{equal}")?;
            Ok(equal)
        }
        Format::Text => {
            let found = comparator.diff(&source, &target)?;
            log_discrepancies(&found);
            if found.is_empty() {
                writeln!(out, "equal")?;
            }
            for discrepancy in &found {
                writeln!(out, "{discrepancy}")?;
            }
            Ok(found.is_empty())
        }
        Format::Json => {
            let found = comparator.diff(&source, &target)?;
            log_discrepancies(&found);
            serde_json::to_writer_pretty(&mut out, &found)?;
            writeln!(out)?;
            Ok(found.is_empty())
        }
    }
}

fn load_options(cli: &Cli) -> Result<CompareOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str::<CompareOptions>(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => CompareOptions::default(),
    };
    if let Some(limit) = cli.max_depth {
        options.max_depth = Some(limit);
    }
    options.ignore_paths.extend(cli.ignore.iter().cloned());
    options.stop_at_first |= cli.first;
    Ok(options)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_document(path: &Path) -> Result<Value> {
    let text = if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn log_discrepancies(found: &[Discrepancy]) {
    for discrepancy in found {
        tracing::info!(
            path = %discrepancy.path,
            kind = ?discrepancy.kind,
            "{}",
            discrepancy.detail
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("json-compare").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_extend_default_options() {
        let cli = parse(&[
            "--max-depth",
            "3",
            "--ignore",
            "a.b",
            "--ignore",
            "c",
            "--first",
            "x",
            "y",
        ]);
        let options = load_options(&cli).unwrap();
        assert_eq!(options.max_depth, Some(3));
        assert_eq!(options.ignore_paths.len(), 2);
        assert!(options.stop_at_first);
        assert_eq!(cli.format, Format::Verdict);
    }

    #[test]
    fn stdin_marker() {
        assert!(is_stdin(Path::new("-")));
        assert!(!is_stdin(Path::new("-.json")));
    }

    #[test]
    fn both_sides_from_stdin_is_rejected() {
        let cli = parse(&["-", "-"]);
        assert!(run(&cli).is_err());
    }
}
