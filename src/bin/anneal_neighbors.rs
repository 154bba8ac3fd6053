//! anneal-neighbors: Count EIGRP adjacencies on an NX-OS switch
//!
//! Sums neighbors across every EIGRP process and VRF. The document is
//! normalized on ingest, so a VRF with one neighbor counts exactly like a
//! VRF with twenty.
//!
//! Usage:
//!   # From a saved `show ip eigrp neighbors | json` capture
//!   anneal-neighbors --input eigrp_neighbors.json
//!
//!   # Straight from a device over NX-API
//!   anneal-neighbors 192.0.2.10 -u admin -p secret
//!
//!   # HTTPS with a self-signed certificate, one line per neighbor
//!   anneal-neighbors sw1.example.net -u admin -p secret --https --insecure --detail

use anneal::{
    count_eigrp_neighbors, eigrp_peers, nxapi, uptime, CommandSource, FileSource, NxapiClient,
    NxapiConfig,
};
use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "anneal-neighbors")]
#[command(about = "Count EIGRP adjacencies across all processes and VRFs", long_about = None)]
struct Args {
    /// IP address or FQDN of the NX-OS device (omit when using --input)
    #[arg(value_name = "HOST")]
    host: Option<String>,

    /// Username to log into the device with
    #[arg(short = 'u', long)]
    username: Option<String>,

    /// Password to log into the device with
    #[arg(short = 'p', long)]
    password: Option<String>,

    /// Read a captured `| json` document instead of contacting a device
    #[arg(long, value_name = "FILE", conflicts_with = "host")]
    input: Option<String>,

    /// Command to run on the device
    #[arg(long, default_value = "show ip eigrp neighbors")]
    cmd: String,

    /// Use HTTPS for NX-API
    #[arg(long)]
    https: bool,

    /// Accept the self-signed certificate most lab switches present
    #[arg(long, requires = "https")]
    insecure: bool,

    /// Override the NX-API port (default 80, or 443 with --https)
    #[arg(long)]
    port: Option<u16>,

    /// Print one line per neighbor in addition to the total
    #[arg(long)]
    detail: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let source = build_source(&args)?;
    let table = source.run_structured(&args.cmd)?;
    let doc = Value::Object(table);

    let quantity = count_eigrp_neighbors(&doc);
    println!("This switch has {} EIGRP neighbors.", quantity);

    if args.detail {
        for peer in eigrp_peers(&doc) {
            println!("  {}", describe_peer(peer));
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Choose a transport: capture file when given, NX-API otherwise
fn build_source(args: &Args) -> Result<Box<dyn CommandSource>> {
    if let Some(path) = &args.input {
        return Ok(Box::new(FileSource::new(path)));
    }

    let host = args
        .host
        .as_deref()
        .context("HOST is required unless --input is given")?;
    let username = args
        .username
        .as_deref()
        .context("--username is required when contacting a device")?;
    let password = args
        .password
        .as_deref()
        .context("--password is required when contacting a device")?;

    let endpoint = nxapi::endpoint(host, args.https, args.port);
    let config = NxapiConfig {
        accept_invalid_certs: args.insecure,
        ..NxapiConfig::default()
    };
    let client = NxapiClient::with_config(endpoint, username, password, config)?;
    Ok(Box::new(client))
}

/// One line per adjacency, e.g. `10.1.1.2 on Eth1/1 (up 14d 19h 11m 58s)`
fn describe_peer(peer: &Value) -> String {
    let addr = peer.get("peer_ipaddr").and_then(Value::as_str).unwrap_or("?");
    let intf = peer.get("peer_ifname").and_then(Value::as_str).unwrap_or("?");

    match peer.get("peer_uptime").and_then(Value::as_str) {
        Some(raw) => {
            let shown = uptime::parse(raw)
                .map(uptime::brief)
                .unwrap_or_else(|| raw.to_string());
            format!("{} on {} (up {})", addr, intf, shown)
        }
        None => format!("{} on {}", addr, intf),
    }
}
