//! Row normalization - rewrite NX-OS table/row trees into a uniform shape
//!
//! NX-OS structures command output as XML internally. When the CLI renders
//! that XML as JSON (`show ... | json`, NX-API `cli`), a table with several
//! rows becomes a list of objects, but a table with exactly one row collapses
//! into a bare object:
//!
//! ```json
//! { "TABLE_nbr": { "ROW_nbr": { "rid": "1.1.1.1" } } }
//! { "TABLE_nbr": { "ROW_nbr": [ { "rid": "1.1.1.1" }, { "rid": "2.2.2.2" } ] } }
//! ```
//!
//! Consumers that iterate over rows then need a cardinality check at every
//! level of every table. This module removes the quirk at the source: after
//! [`normalize_output`], any key containing the phrase `ROW_` maps to a list
//! of objects, even when that list has a single element.

use serde_json::{Map, Value};

/// Marker substring identifying row keys in NX-OS structured output.
///
/// Matched anywhere in the key, not as a prefix: NX-OS itself emits keys
/// like `ROW_intf` and `ROW_vrf`, but the convention is containment, so a
/// key such as `XROW_Y` qualifies too.
pub const ROW_MARKER: &str = "ROW_";

/// Whether a key names a row collection.
pub fn is_row_key(key: &str) -> bool {
    key.contains(ROW_MARKER)
}

/// Whether any of a table's own keys names a row collection.
fn has_row_key(table: &Map<String, Value>) -> bool {
    table.keys().any(|k| is_row_key(k))
}

/// Normalize structured output so that table rows are consistently lists.
///
/// Consumes the parsed document and returns a rebuilt one in which every
/// reachable `ROW_` key holds a list of row objects. Keys unrelated to the
/// table/row convention keep their values untouched, and nothing here can
/// fail: a shape that matches no rewrite rule passes through as-is.
///
/// ```rust
/// use anneal::normalize_output;
/// use serde_json::{json, Map, Value};
///
/// let doc: Map<String, Value> = serde_json::from_value(json!({
///     "TABLE_nbr": { "ROW_nbr": { "rid": "1.1.1.1" } }
/// })).unwrap();
///
/// let fixed = normalize_output(doc);
/// assert_eq!(
///     Value::Object(fixed),
///     json!({ "TABLE_nbr": { "ROW_nbr": [{ "rid": "1.1.1.1" }] } }),
/// );
/// ```
pub fn normalize_output(table: Map<String, Value>) -> Map<String, Value> {
    table
        .into_iter()
        .map(|(key, value)| {
            let value = normalize_entry(&key, value);
            (key, value)
        })
        .collect()
}

/// Rewrite a single key's value. Each key is handled independently; the
/// rules mirror the shapes NX-OS produces, first match wins.
fn normalize_entry(key: &str, value: Value) -> Value {
    match value {
        // A single row rendered as a bare object: promote it to a
        // one-element list, normalizing the row's own nested tables.
        Value::Object(row) if is_row_key(key) => {
            Value::Array(vec![Value::Object(normalize_output(row))])
        }
        // A table object wrapping row keys one level down: recurse into it
        // but keep it an object. Objects whose own keys carry no marker are
        // deliberately not descended into.
        Value::Object(inner) if has_row_key(&inner) => Value::Object(normalize_output(inner)),
        // Rows already in list form. Only the first element is inspected to
        // classify the list; an empty list never reaches the recursion.
        Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => {
            Value::Array(items.into_iter().map(normalize_element).collect())
        }
        // Anything else (scalars, lists not led by an object) has nothing
        // to fix.
        other => other,
    }
}

/// Normalize one element of a row list. Non-object elements of a mixed
/// list pass through untouched.
fn normalize_element(item: Value) -> Value {
    match item {
        Value::Object(row) => Value::Object(normalize_output(row)),
        other => other,
    }
}
