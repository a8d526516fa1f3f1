use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod files;
mod report;
mod settings;

use files::expand_inputs;
use report::{Finding, Summary, print_summary};
use settings::resolve_config;

#[derive(Parser)]
#[command(name = "xml-indent-check")]
#[command(about = "Check that XML elements are indented consistently")]
#[command(version)]
struct Cli {
    /// Files, directories or glob patterns like "src/**/*.xml"
    #[arg(required = true)]
    files: Vec<String>,

    /// Number of columns per nesting level [default: 4]
    #[arg(short, long)]
    indent_size: Option<usize>,

    /// JSON config file, e.g. {"indentSize": 2}
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File extensions to pick up when walking directories
    #[arg(short, long = "extension", default_values_t = vec!["xml".to_string()])]
    extension: Vec<String>,

    /// Output findings as JSONL
    #[arg(long)]
    json: bool,

    /// Do not print the summary
    #[arg(short, long)]
    quiet: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xml_indent=warn,xml_indent_check=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.indent_size)?;
    let file_paths = expand_inputs(&cli.files, &cli.extension)?;
    info!(files = file_paths.len(), indent_size = config.indent_size, "Starting check");

    let mut summary = Summary::default();

    for file_path in file_paths {
        if cli.verbose && !cli.json {
            println!("Checking: {}", file_path.display());
        }

        let findings: Vec<Finding> = match xml_indent::check_file(&file_path, &config) {
            Ok(violations) => violations
                .into_iter()
                .map(|violation| Finding::from_violation(&file_path, violation))
                .collect(),
            Err(err) => match Finding::from_error(&file_path, &err) {
                Some(finding) => vec![finding],
                None => {
                    return Err(err)
                        .with_context(|| format!("Failed to check {}", file_path.display()));
                }
            },
        };
        debug!(path = %file_path.display(), findings = findings.len(), "checked");

        for finding in &findings {
            if cli.json {
                println!("{}", serde_json::to_string(finding)?);
            } else {
                println!("{}", finding.to_plain());
            }
        }
        summary.record(&findings);
    }

    if !cli.json && !cli.quiet {
        print_summary(&summary);
    }
    info!(
        files = summary.files,
        violations = summary.violations,
        "Check finished"
    );

    if summary.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
