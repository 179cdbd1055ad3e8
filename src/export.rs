// Author: Dustin Pilgrim
// License: MIT

use std::fs;

use serde_json::json;

use crate::ast::{Document, DocumentNode, ScalarValue};
use crate::error::{MpathError, Result};
use crate::parser::parse_document;

/// Export a parsed multipath document to JSON.
///
/// - Booleans, integers, floats, text → JSON scalars
/// - Repeated keys and repeated sections → arrays
/// - Sections → objects, keys in document order
///
/// # Examples
/// ```
/// use mpath_cfg::export::export_document_to_json;
/// use mpath_cfg::parser::parse_document;
///
/// let doc = parse_document("defaults { polling_interval 10 }").unwrap();
/// let json = export_document_to_json(&doc).unwrap();
/// assert!(json.contains("\"polling_interval\": 10"));
/// ```
pub fn export_document_to_json(doc: &Document) -> Result<String> {
    serde_json::to_string_pretty(&document_to_json(doc)).map_err(|e| MpathError::SerializeError {
        message: format!("Failed to export document: {}", e),
        path: None,
        hint: None,
        code: Some(501),
    })
}

/// Convert a document into a JSON value without rendering it.
pub fn document_to_json(doc: &Document) -> serde_json::Value {
    fn scalar_to_json(v: &ScalarValue) -> serde_json::Value {
        match v {
            ScalarValue::Bool(b) => json!(b),
            ScalarValue::Int(n) => json!(n),
            ScalarValue::Float(x) => json!(x),
            ScalarValue::Text(s) => json!(s),
        }
    }

    fn node_to_json(node: &DocumentNode) -> serde_json::Value {
        match node {
            DocumentNode::Scalar(v) => scalar_to_json(v),
            DocumentNode::ScalarList(vs) => json!(vs.iter().map(scalar_to_json).collect::<Vec<_>>()),
            DocumentNode::Section(d) => document_to_json(d),
            DocumentNode::SectionList(ds) => json!(ds.iter().map(document_to_json).collect::<Vec<_>>()),
        }
    }

    let map = doc
        .iter()
        .map(|(k, node)| (k.clone(), node_to_json(node)))
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(map)
}

/// Read, parse, and export a multipath.conf in one call.
///
/// # Errors
/// Returns error if the file can't be read or has unbalanced braces.
pub fn export_conf_file(path: &str) -> Result<String> {
    let input = fs::read_to_string(path).map_err(|e| MpathError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.to_string(),
        hint: None,
        code: Some(301),
    })?;

    let doc = parse_document(&input)?;
    export_document_to_json(&doc)
}
