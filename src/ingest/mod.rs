//! Lead list ingestion pipeline.
//!
//! Parses an uploaded CSV into lead rows, distributes them across the
//! current agent set and persists the resulting list. Rows missing a first
//! name or phone are dropped without surfacing an error; the dashboard only
//! sees the accepted count.

use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::db::Repository;
use crate::distribution;
use crate::errors::AppError;
use crate::models::{List, NewLead};

/// Upload extensions accepted by the dashboard. Only CSV content is parsed;
/// spreadsheet files pass the filter but yield no rows.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// Whether a file name carries an accepted upload extension.
pub fn extension_allowed(file_name: &str) -> bool {
    file_name
        .rsplit('.')
        .next()
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// One raw CSV row. Missing columns fall back to empty strings so that
/// field validation, not header shape, decides acceptance.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "FirstName", default)]
    first_name: String,
    #[serde(rename = "Phone", default)]
    phone: String,
    #[serde(rename = "Notes", default)]
    notes: String,
}

/// Parse CSV content into accepted lead rows, preserving input order.
///
/// A row is accepted only if `FirstName` and `Phone` are both non-empty.
/// Unparseable rows are dropped like any other rejected row.
pub fn parse_leads<R: io::Read>(reader: R) -> Vec<NewLead> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    csv_reader
        .deserialize::<CsvRow>()
        .filter_map(Result::ok)
        .filter(|row| !row.first_name.is_empty() && !row.phone.is_empty())
        .map(|row| NewLead {
            first_name: row.first_name,
            phone: row.phone,
            notes: row.notes,
        })
        .collect()
}

/// Run the ingestion pipeline over a staged upload.
///
/// Fails before creating any record when no agents exist. The staged file
/// is removed after successful persistence; a failed removal is logged and
/// ignored.
pub async fn ingest_list(
    repo: &Repository,
    file_name: &str,
    stored_path: &Path,
) -> Result<List, AppError> {
    let data = tokio::fs::read(stored_path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read upload: {}", e)))?;

    let leads = parse_leads(data.as_slice());

    let agents = repo.list_agents().await?;
    let assignments = distribution::distribute(leads.len(), &agents)?;

    let list = repo
        .create_list_with_leads(file_name, &leads, &assignments)
        .await?;

    tracing::info!(
        "Distributed {} leads from {} across {} agents",
        list.total_leads,
        file_name,
        agents.len()
    );

    if let Err(e) = tokio::fs::remove_file(stored_path).await {
        tracing::warn!("Failed to remove staged upload {:?}: {}", stored_path, e);
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_complete_rows() {
        let csv = "FirstName,Phone,Notes\nAlice,555-0100,call back\nBob,555-0101,\n";
        let leads = parse_leads(csv.as_bytes());
        assert_eq!(
            leads,
            vec![
                NewLead {
                    first_name: "Alice".to_string(),
                    phone: "555-0100".to_string(),
                    notes: "call back".to_string(),
                },
                NewLead {
                    first_name: "Bob".to_string(),
                    phone: "555-0101".to_string(),
                    notes: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_drops_rows_missing_required_fields() {
        let csv = "FirstName,Phone,Notes\nAlice,555-0100,x\n,555-0101,y\nBob,,z\nCarol,555-0102,\n";
        let leads = parse_leads(csv.as_bytes());
        let names: Vec<&str> = leads.iter().map(|l| l.first_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carol"]);
    }

    #[test]
    fn test_parse_defaults_missing_notes_column() {
        let csv = "FirstName,Phone\nAlice,555-0100\n";
        let leads = parse_leads(csv.as_bytes());
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].notes, "");
    }

    #[test]
    fn test_parse_non_csv_content_yields_nothing() {
        let leads = parse_leads(&b"\x50\x4b\x03\x04not a csv"[..]);
        assert!(leads.is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        let leads = parse_leads(&b""[..]);
        assert!(leads.is_empty());
    }

    #[test]
    fn test_extension_allowed() {
        assert!(extension_allowed("leads.csv"));
        assert!(extension_allowed("Leads.CSV"));
        assert!(extension_allowed("q2 pipeline.xlsx"));
        assert!(extension_allowed("legacy.xls"));
        assert!(!extension_allowed("leads.txt"));
        assert!(!extension_allowed("leads"));
        assert!(!extension_allowed(""));
    }
}
