//! CSV report export.
//!
//! An item is serialized to JSON, flattened into dotted `key = value` pairs
//! (`followup.assetNo`, `record.0.userId`, ...) and written as a one-row CSV
//! document with a header of the observed keys. Delivering the bytes is up to
//! the caller.

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::item::Item;

pub const REPORT_FILE_NAME: &str = "report.csv";
pub const REPORT_MIME_TYPE: &str = "text/csv;encoding:utf-8";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to encode item: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush csv output: {0}")]
    Flush(String),

    #[error("csv output was not valid utf-8")]
    Utf8,
}

/// CSV text plus the suggested download name and MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub content: String,
    pub file_name: String,
    pub mime_type: String,
}

/// Export one item as CSV.
pub fn export_report(item: &Item) -> Result<Report, ReportError> {
    let value = serde_json::to_value(item)?;
    let content = to_csv(&[flatten(&value)])?;
    Ok(Report {
        content,
        file_name: REPORT_FILE_NAME.to_string(),
        mime_type: REPORT_MIME_TYPE.to_string(),
    })
}

/// Flatten nested objects and arrays into dotted keys, in document order.
///
/// Empty containers are kept as a single `[]` / `{}` cell so the key is not lost.
pub fn flatten(value: &JsonValue) -> Vec<(String, String)> {
    let mut out = Vec::new();
    flatten_into(None, value, &mut out);
    out
}

fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(p) => format!("{p}.{key}"),
        None => key.to_string(),
    }
}

fn flatten_into(prefix: Option<&str>, value: &JsonValue, out: &mut Vec<(String, String)>) {
    match value {
        JsonValue::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(Some(&join(prefix, key)), child, out);
            }
        }
        JsonValue::Array(items) if !items.is_empty() => {
            for (idx, child) in items.iter().enumerate() {
                flatten_into(Some(&join(prefix, &idx.to_string())), child, out);
            }
        }
        leaf => {
            if let Some(key) = prefix {
                out.push((key.to_string(), cell(leaf)));
            }
        }
    }
}

fn cell(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(_) => "[]".to_string(),
        JsonValue::Object(_) => "{}".to_string(),
        // f64 Display drops a trailing `.0`; serde_json keeps it
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Write flattened rows as CSV; the header is the union of keys, first seen first.
pub fn to_csv(rows: &[Vec<(String, String)>]) -> Result<String, ReportError> {
    let mut header: Vec<&str> = Vec::new();
    for row in rows {
        for (key, _) in row {
            if !header.contains(&key.as_str()) {
                header.push(key);
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for row in rows {
        let record = header.iter().map(|key| {
            row.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .unwrap_or("")
        });
        writer.write_record(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Flush(e.error().to_string()))?;
    String::from_utf8(bytes).map_err(|_| ReportError::Utf8)
}
