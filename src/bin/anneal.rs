//! anneal: Normalize NX-OS structured CLI output
//!
//! Rewrites `| json` command output so every `ROW_*` key holds a list of
//! rows, no matter how many rows the device reported.
//!
//! Usage:
//!   # Read from file, output to stdout
//!   anneal show_ip_eigrp_neighbors.json
//!
//!   # Read from stdin
//!   echo '{"TABLE_vrf": {"ROW_vrf": {"vrf": "default"}}}' | anneal
//!
//!   # One document per line in, one per line out
//!   anneal --ndjson captures.jsonl
//!
//!   # Compact output, written to a file
//!   anneal --compact -o normalized.json capture.json

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anneal::normalize_output;
use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};

#[derive(Parser, Debug)]
#[command(name = "anneal")]
#[command(about = "Normalize NX-OS | json output so table rows are always lists", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one document per line)
    #[arg(long)]
    ndjson: bool,

    /// Emit compact JSON instead of pretty-printing
    #[arg(long)]
    compact: bool,

    /// Output file (use stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let content = read_input(args.input.as_deref())?;

    let output = if args.ndjson {
        normalize_lines(&content)?
    } else {
        normalize_single(content, args.compact)?
    };

    match args.output {
        Some(path) => std::fs::write(&path, output)
            .with_context(|| format!("Failed to write {}", path))?,
        None => print!("{}", output),
    }

    Ok(())
}

/// Read the whole input into memory for SIMD parsing
fn read_input(input_file: Option<&str>) -> Result<Vec<u8>> {
    let reader: Box<dyn Read> = if let Some(file_path) = input_file {
        let file =
            File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?;
        Box::new(BufReader::new(file))
    } else {
        Box::new(std::io::stdin())
    };

    let mut content = Vec::new();
    BufReader::new(reader).read_to_end(&mut content)?;
    Ok(content)
}

/// Normalize one document, rendered pretty unless compact output is requested
fn normalize_single(mut content: Vec<u8>, compact: bool) -> Result<String> {
    // Try SIMD parsing first (faster) - use OwnedValue to avoid borrow issues
    let value: Value = match simd_json::to_owned_value(&mut content) {
        Ok(owned) => {
            let json_str = simd_json::to_string(&owned)?;
            serde_json::from_str(&json_str)?
        }
        Err(_) => {
            // Fallback to serde_json for malformed or oddly framed input
            let content_str = String::from_utf8_lossy(&content);
            serde_json::from_str(content_str.trim()).context("Failed to parse JSON")?
        }
    };

    let doc = match value {
        Value::Object(table) => Value::Object(normalize_output(table)),
        _ => bail!("document root must be a JSON object"),
    };

    let mut rendered = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    rendered.push('\n');
    Ok(rendered)
}

/// Normalize a stream of documents, one per line in and one per line out
fn normalize_lines(content: &[u8]) -> Result<String> {
    let content_str = String::from_utf8_lossy(content);
    let mut output = String::new();

    for (number, line) in content_str.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let table: Map<String, Value> = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse JSON on line {}", number + 1))?;
        let doc = Value::Object(normalize_output(table));
        output.push_str(&serde_json::to_string(&doc)?);
        output.push('\n');
    }

    Ok(output)
}
