// src/main.rs
mod logger;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use huffcode::tree::symbol_label;
use huffcode::{EncodeOutcome, Stats, TreeShape, container, engine};

#[derive(Parser)]
#[command(name = "huffcode", version)]
#[command(about = "Huffman compression for files: encode, decode, inspect.", long_about = None)]
struct Cli {
    /// Log debug detail
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a container
    Encode {
        input: PathBuf,
        /// Output path; defaults to the input with `.huf` appended
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Reject inputs larger than this many bytes
        #[arg(long, default_value_t = engine::DEFAULT_MAX_INPUT)]
        max_size: usize,
        /// Print the full encoding report as JSON
        #[arg(long)]
        report: bool,
    },
    /// Expand a container back into the original bytes
    Decode {
        input: PathBuf,
        /// Output path; defaults to the input without its `.huf` extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show what a container holds
    Inspect { input: PathBuf },
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        Commands::Encode {
            input,
            output,
            max_size,
            report,
        } => cmd_encode(&input, output, max_size, report),
        Commands::Decode { input, output } => cmd_decode(&input, output),
        Commands::Inspect { input } => cmd_inspect(&input),
    }
}

fn cmd_encode(
    input: &Path,
    output: Option<PathBuf>,
    max_size: usize,
    report: bool,
) -> io::Result<()> {
    let data = fs::read(input)?;
    if data.is_empty() {
        warn!("{} is empty; nothing to encode", input.display());
        return Ok(());
    }

    info!(input_bytes = data.len(), "encoding {}", input.display());
    let outcome = engine::encode_with_limit(&data, max_size)?;
    let blob = container::export(&outcome.codes, &outcome.encoded)?;

    let output = output.unwrap_or_else(|| default_encoded_path(input));
    fs::write(&output, &blob)?;

    println!(
        "{} -> {} ({} bits -> {} bits, {:.2}% saved, {} unique symbols)",
        input.display(),
        output.display(),
        outcome.stats.original_bits,
        outcome.stats.encoded_bits,
        outcome.stats.compression_ratio,
        outcome.stats.unique_symbols,
    );

    if report {
        println!("{}", serde_json::to_string_pretty(&Report::new(&outcome))?);
    }
    Ok(())
}

fn cmd_decode(input: &Path, output: Option<PathBuf>) -> io::Result<()> {
    let blob = fs::read(input)?;
    let parsed = container::import(&blob);
    let output = output.unwrap_or_else(|| default_decoded_path(input));

    match parsed.codes {
        Some(codes) => {
            let decoded = engine::decode(&parsed.payload, &codes);
            fs::write(&output, &decoded)?;
            println!(
                "{} -> {} ({} bytes)",
                input.display(),
                output.display(),
                decoded.len()
            );
        }
        None => {
            warn!(
                "{} carries no container tag; passing it through unchanged",
                input.display()
            );
            fs::write(&output, &blob)?;
            println!(
                "{} -> {} (raw passthrough, {} bytes)",
                input.display(),
                output.display(),
                blob.len()
            );
        }
    }
    Ok(())
}

fn cmd_inspect(input: &Path) -> io::Result<()> {
    let blob = fs::read(input)?;
    let parsed = container::import(&blob);

    match &parsed.codes {
        Some(codes) => {
            println!(
                "tagged container: {} code entries, {} payload bits",
                codes.len(),
                parsed.payload.len()
            );
            for (symbol, code) in codes.iter() {
                println!("  {:>8}  {}", symbol_label(symbol), code);
            }
        }
        None => println!("untagged data: {} raw bits", parsed.payload.len()),
    }
    Ok(())
}

/// JSON mirror of one encode call: bit text, display-labeled frequency and
/// code maps, tree shape, stats.
#[derive(Serialize)]
struct Report {
    encoded: String,
    frequencies: BTreeMap<String, u64>,
    codes: BTreeMap<String, String>,
    tree: Option<TreeShape>,
    stats: Stats,
}

impl Report {
    fn new(outcome: &EncodeOutcome) -> Report {
        Report {
            encoded: outcome.encoded.to_string(),
            frequencies: outcome
                .frequencies
                .iter()
                .map(|(symbol, count)| (symbol_label(symbol), count))
                .collect(),
            codes: outcome
                .codes
                .iter()
                .map(|(symbol, code)| (symbol_label(symbol), code.to_string()))
                .collect(),
            tree: outcome.tree.clone(),
            stats: outcome.stats,
        }
    }
}

fn default_encoded_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".huf");
    PathBuf::from(name)
}

fn default_decoded_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == "huf") {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}
