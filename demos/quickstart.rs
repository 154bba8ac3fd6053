/// Quickstart example - the smallest possible usage
use anneal::normalize_output;
use serde_json::{json, Map, Value};

fn main() -> anyhow::Result<()> {
    println!("=== Anneal Quick Start ===\n");

    // Step 1: Output captured from `show ip ospf neighbor detail | json`,
    // where every table happened to contain exactly one row
    let raw = json!({
        "TABLE_ctx": {
            "ROW_ctx": {
                "ptag": "1",
                "cname": "default",
                "TABLE_nbr": {
                    "ROW_nbr": {
                        "rid": "192.0.2.1",
                        "addr": "10.1.1.2",
                        "intf": "Eth1/1",
                        "state": "FULL"
                    }
                }
            }
        }
    });

    println!("Raw output (single rows arrive as bare objects):");
    println!("{}\n", serde_json::to_string_pretty(&raw)?);

    // Step 2: Normalize it
    let table: Map<String, Value> = serde_json::from_value(raw)?;
    let doc = Value::Object(normalize_output(table));

    println!("Normalized (every ROW_ key now holds a list):");
    println!("{}\n", serde_json::to_string_pretty(&doc)?);

    // Step 3: Index uniformly, no cardinality checks anywhere
    for ctx in doc["TABLE_ctx"]["ROW_ctx"].as_array().into_iter().flatten() {
        for nbr in ctx["TABLE_nbr"]["ROW_nbr"].as_array().into_iter().flatten() {
            println!(
                "process {}: neighbor {} is {}",
                ctx["ptag"].as_str().unwrap_or("?"),
                nbr["rid"].as_str().unwrap_or("?"),
                nbr["state"].as_str().unwrap_or("?"),
            );
        }
    }

    Ok(())
}
