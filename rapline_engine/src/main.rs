// CLI entry point for the Rapline rhyme engine.
//
// Reads lyric text (see `segment.rs` for the markup), extracts rhymes from
// every track and prints the result as JSON on stdout. Logs go to stderr,
// filtered by `RUST_LOG` (default `info`).
//
// Usage:
//   rapline [OPTIONS] <INPUT>
//     <INPUT>               Lyric file, or `-` for stdin
//     --config <FILE>       JSON `RhymeConfig`; missing fields take defaults
//     --window <N>          Override the look-back window
//     --candidates          Include verifier candidates in the output
//     --dictionary          Print the aggregated rhyme dictionary instead
//     --pretty              Pretty-print the JSON

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rapline_engine::{RhymeConfig, RhymeDictionary, extract_all};

#[derive(Parser, Debug)]
#[command(name = "rapline")]
#[command(about = "Find rhymes in rap lyrics by approximate phonetics")]
#[command(version)]
struct Args {
    /// Lyric file, or `-` for stdin.
    input: PathBuf,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of earlier lines each line is compared against.
    #[arg(long)]
    window: Option<usize>,

    /// Collect candidate pairs for external verification.
    #[arg(long)]
    candidates: bool,

    /// Print the cross-track rhyme dictionary instead of per-track results.
    #[arg(long)]
    dictionary: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let text = read_input(&args.input)?;

    let results = extract_all(&text, &config);
    info!(
        tracks = results.len(),
        families = results.iter().map(|r| r.result.families.len()).sum::<usize>(),
        links = results.iter().map(|r| r.result.links.len()).sum::<usize>(),
        "extraction finished"
    );

    let json = if args.dictionary {
        let mut dictionary = RhymeDictionary::new();
        for track in &results {
            dictionary.add_result(&track.result);
        }
        let entries = dictionary.entries();
        info!(patterns = entries.len(), "built rhyme dictionary");
        to_json(&entries, args.pretty)?
    } else {
        to_json(&results, args.pretty)?
    };

    println!("{json}");
    Ok(())
}

fn load_config(args: &Args) -> Result<RhymeConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            RhymeConfig::from_json(&json)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => RhymeConfig::default(),
    };

    if let Some(window) = args.window {
        config.window_size = window;
    }
    if args.candidates {
        config.collect_candidates = true;
    }
    config.validate().context("Invalid command-line overrides")?;
    Ok(config)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize output")
}
