//! # Anneal - NX-OS JSON Normalization
//!
//! Normalize the structured output of NX-OS `| json` commands so that
//! table rows are *always* lists of objects.
//!
//! NX-OS builds its JSON by converting an internal XML document, and XML
//! cannot tell "one element" apart from "a list with one element". The
//! result: a table key (`TABLE_*`) holds a row key (`ROW_*`) whose value
//! is a bare object when the table happens to contain a single row, but a
//! list of objects when it contains several. Every consumer ends up
//! writing the same cardinality checks over and over.
//!
//! `anneal` removes the quirk at the edge: run a document through
//! [`normalize_output`] once and every row value is a list, whatever the
//! device happened to emit.
//!
//! ## Modules
//!
//! - **normalize**: The recursive rewrite itself
//! - **neighbors**: EIGRP adjacency counting over normalized documents
//! - **source**: The `CommandSource` seam plus file and `vsh` transports
//! - **nxapi**: Remote transport speaking NX-API JSON-RPC over HTTP
//! - **uptime**: NX-OS duration strings (`P14DT19H11M58S`)
//! - **error**: The crate-wide error type
//!
//! ## Quick Start
//!
//! ### Normalizing a document
//!
//! ```rust
//! use anneal::normalize_document;
//!
//! # fn main() -> anneal::Result<()> {
//! let raw = r#"{
//!     "TABLE_vrf": {
//!         "ROW_vrf": { "vrf-name-out": "default", "state": "Up" }
//!     }
//! }"#;
//!
//! let doc = normalize_document(raw)?;
//!
//! // The single row is now a one-element list, so access is uniform
//! // whether the device reported one VRF or twenty.
//! assert_eq!(doc["TABLE_vrf"]["ROW_vrf"][0]["state"], "Up");
//! # Ok(())
//! # }
//! ```
//!
//! ### Counting EIGRP neighbors
//!
//! ```rust
//! use anneal::{count_eigrp_neighbors, normalize_document};
//! use serde_json::Value;
//!
//! # fn main() -> anneal::Result<()> {
//! let doc = normalize_document(r#"{
//!     "TABLE_asn": { "ROW_asn": {
//!         "asn": "65001",
//!         "TABLE_vrf": { "ROW_vrf": {
//!             "vrf": "default",
//!             "TABLE_peer": { "ROW_peer": { "peer_ipaddr": "10.1.1.2" } }
//!         } }
//!     } }
//! }"#)?;
//!
//! assert_eq!(count_eigrp_neighbors(&Value::Object(doc)), 1);
//! # Ok(())
//! # }
//! ```

use serde_json::{Map, Value};

pub mod error;
pub mod neighbors;
pub mod normalize;
pub mod nxapi;
pub mod source;
pub mod uptime;

// Re-export commonly used types for convenience
pub use error::{AnnealError, Result};
pub use neighbors::{count_eigrp_neighbors, eigrp_peers};
pub use normalize::{is_row_key, normalize_output, ROW_MARKER};
pub use nxapi::{NxapiClient, NxapiConfig};
pub use source::{CommandSource, FileSource, VshSource};

/// Main entry point: parse a serialized `| json` document and normalize it
///
/// The document root must be a JSON object, which is what NX-OS always
/// emits for structured command output.
pub fn normalize_document(text: &str) -> Result<Map<String, Value>> {
    let table: Map<String, Value> = serde_json::from_str(text)?;
    Ok(normalize_output(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_document_rewrites_rows() {
        let doc = normalize_document(
            r#"{ "TABLE_mac": { "ROW_mac": { "mac": "aaaa.bbbb.cccc" } } }"#,
        )
        .unwrap();

        assert_eq!(
            Value::Object(doc),
            json!({ "TABLE_mac": { "ROW_mac": [{ "mac": "aaaa.bbbb.cccc" }] } }),
        );
    }

    #[test]
    fn test_normalize_document_rejects_non_object_root() {
        assert!(matches!(
            normalize_document(r#"["not", "a", "table"]"#),
            Err(AnnealError::Json(_)),
        ));
    }

    #[test]
    fn test_normalize_document_rejects_garbage() {
        assert!(matches!(
            normalize_document("Interface Eth1/1 is up"),
            Err(AnnealError::Json(_)),
        ));
    }
}
