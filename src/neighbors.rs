//! EIGRP adjacency counting over normalized output
//!
//! `show ip eigrp neighbors | json` nests three table levels: process
//! (`TABLE_asn`), VRF (`TABLE_vrf`), peer (`TABLE_peer`). This module walks
//! that fixed shape and tallies the innermost rows. It is a consumer of
//! [`normalize_output`](crate::normalize_output): on normalized documents
//! every row key holds a list, so the walk is a pair of plain loops with no
//! cardinality checks.
//!
//! A missing level (say, a VRF with no peer table) contributes zero rather
//! than failing. Un-normalized leftovers, a bare object where a row list
//! belongs, read as missing too.

use serde_json::Value;

/// Resolve one TABLE/ROW level: the row list at `node[table][row]`, or an
/// empty slice when either key is absent or the value is not a list.
fn rows<'a>(node: &'a Value, table: &str, row: &str) -> &'a [Value] {
    node.get(table)
        .and_then(|t| t.get(row))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Count EIGRP neighbors across all processes and VRFs on a switch.
pub fn count_eigrp_neighbors(data: &Value) -> usize {
    let mut qty = 0;
    for asn in rows(data, "TABLE_asn", "ROW_asn") {
        for vrf in rows(asn, "TABLE_vrf", "ROW_vrf") {
            qty += rows(vrf, "TABLE_peer", "ROW_peer").len();
        }
    }
    qty
}

/// Collect references to every peer row, across all processes and VRFs,
/// in document order. On normalized input `eigrp_peers(d).len()` equals
/// [`count_eigrp_neighbors`]`(d)`.
pub fn eigrp_peers(data: &Value) -> Vec<&Value> {
    let mut peers = Vec::new();
    for asn in rows(data, "TABLE_asn", "ROW_asn") {
        for vrf in rows(asn, "TABLE_vrf", "ROW_vrf") {
            peers.extend(rows(vrf, "TABLE_peer", "ROW_peer"));
        }
    }
    peers
}
