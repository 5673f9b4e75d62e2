//! asp CLI - Astro Script parser

use anyhow::{Context, Result};
use asp::{parse_with_diagnostics, ParserOptions};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// asp - parse Astro Script files into pax3 code objects
#[derive(Parser, Debug)]
#[command(name = "asp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Parse Astro Script (.asx) files into pax3 JSON", long_about = None)]
struct Cli {
    /// Input .asx file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output JSON file (default: stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// JSON file with parser options
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Title of the header record
    #[arg(long)]
    header_title: Option<String>,

    /// Field name used for assignment values
    #[arg(long)]
    assignment_kw: Option<String>,

    /// Fail on block comments that are never closed
    #[arg(long)]
    strict_comments: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Check only (don't write output)
    #[arg(short, long)]
    check: bool,

    /// Show debug information
    #[arg(short, long)]
    debug: bool,

    /// Emit JSON diagnostics to stderr (on failure only)
    #[arg(long)]
    diag_json: bool,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("ASP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(cli: &Cli) -> Result<ParserOptions> {
    let mut options = match &cli.options {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON in {}", path.display()))?;
            ParserOptions::from_json(&value)?
        }
        None => ParserOptions::default(),
    };

    if let Some(title) = &cli.header_title {
        options = options.with_header_title(title.as_str());
    }
    if let Some(kw) = &cli.assignment_kw {
        options = options.with_assignment_kw(kw.as_str());
    }
    if cli.strict_comments {
        options = options.with_strict_comments(true);
    }
    Ok(options)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let options = load_options(&cli)?;
    debug!(input = ?cli.input, ?options, "starting parse");

    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    debug!(bytes = source.len(), "read source");

    let records = match parse_with_diagnostics(&source, Some(&cli.input), &options) {
        Ok(records) => records,
        Err(diags) => {
            eprint!("{}", diags.to_text());
            if cli.diag_json {
                eprintln!("{}", diags.to_json());
            }
            std::process::exit(1);
        }
    };

    if cli.check {
        println!("✅ Parse successful! ({} statements)", records.len() - 1);
        return Ok(());
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("✅ Parsed to: {path:?}");
        }
        None => println!("{json}"),
    }

    Ok(())
}
