//! End-to-end tests over captured device output.

use anneal::{count_eigrp_neighbors, eigrp_peers, normalize_document, CommandSource, FileSource};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::PathBuf;

/// Path to the fixtures directory relative to the crate root.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Reads and normalizes a captured `| json` document.
fn normalized_fixture(name: &str) -> Value {
    let text = std::fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("failed to read {}: {}", name, e));
    Value::Object(normalize_document(&text).expect("fixture should normalize"))
}

/// Walks a normalized document and checks that every row key holds a
/// list of objects.
fn assert_rows_are_lists(node: &Value) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                if anneal::is_row_key(key) {
                    let rows = value
                        .as_array()
                        .unwrap_or_else(|| panic!("{} should hold a list, got {}", key, value));
                    assert!(
                        rows.iter().all(Value::is_object),
                        "{} should hold only objects",
                        key
                    );
                }
                assert_rows_are_lists(value);
            }
        }
        Value::Array(items) => {
            for item in items {
                assert_rows_are_lists(item);
            }
        }
        _ => {}
    }
}

#[test]
fn eigrp_capture_normalizes_every_row() {
    let doc = normalized_fixture("eigrp_neighbors_raw.json");
    assert_rows_are_lists(&doc);

    // The single-row branches became one-element lists.
    assert_eq!(doc["TABLE_asn"]["ROW_asn"][1]["TABLE_vrf"]["ROW_vrf"][0]["vrf"], "blue");
}

#[test]
fn eigrp_capture_counts_across_processes_and_vrfs() {
    let doc = normalized_fixture("eigrp_neighbors_raw.json");

    assert_eq!(count_eigrp_neighbors(&doc), 4);

    let peers = eigrp_peers(&doc);
    assert_eq!(peers.len(), 4);
    assert_eq!(peers[0]["peer_ipaddr"], "10.1.1.2");
    assert_eq!(peers[3]["peer_ipaddr"], "172.16.0.9");
}

#[test]
fn normalization_is_idempotent() {
    let once = normalized_fixture("eigrp_neighbors_raw.json");
    let again = normalize_document(&serde_json::to_string(&once).unwrap()).unwrap();
    assert_eq!(once, Value::Object(again));
}

#[test]
fn ospf_single_row_capture_becomes_uniform_lists() {
    let doc = normalized_fixture("ospf_neighbors_single.json");
    assert_rows_are_lists(&doc);

    assert_eq!(
        doc["TABLE_ctx"]["ROW_ctx"][0]["TABLE_nbr"]["ROW_nbr"][0]["rid"],
        "192.0.2.1"
    );
}

#[test]
fn file_source_yields_normalized_tables() {
    let source = FileSource::new(fixtures_dir().join("eigrp_neighbors_raw.json"));
    let table = source
        .run_structured("show ip eigrp neighbors")
        .expect("capture should load");

    assert_eq!(count_eigrp_neighbors(&Value::Object(table)), 4);
}
