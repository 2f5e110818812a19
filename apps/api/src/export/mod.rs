//! Export pipeline: plain text, JSON backup/restore and single-page PDF.

pub mod pdf;
pub mod remote;
pub mod text;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::resume::ResumeDocument;

pub use pdf::{ExportError, LopdfPageWriter, PdfExporter};
pub use remote::HttpRasterizer;
pub use text::to_plain_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Text,
    Json,
    Pdf,
}

impl ExportKind {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportKind::Text => "text/plain; charset=utf-8",
            ExportKind::Json => "application/json",
            ExportKind::Pdf => "application/pdf",
        }
    }
}

/// `resume-YYYY-MM-DD.txt`, `resume-data-YYYY-MM-DD.json`, `resume-YYYY-MM-DD.pdf`.
pub fn export_filename(kind: ExportKind, at: DateTime<Utc>) -> String {
    let date = at.format("%Y-%m-%d");
    match kind {
        ExportKind::Text => format!("resume-{date}.txt"),
        ExportKind::Json => format!("resume-data-{date}.json"),
        ExportKind::Pdf => format!("resume-{date}.pdf"),
    }
}

/// Pretty-printed backup of the whole document.
pub fn to_json(document: &ResumeDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

/// Parses a backup. Anything unreadable is logged and treated as no data.
pub fn from_json(raw: &str) -> Option<ResumeDocument> {
    match serde_json::from_str(raw) {
        Ok(document) => Some(document),
        Err(e) => {
            warn!("Rejected resume import: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_filenames_use_iso_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0).unwrap();
        assert_eq!(export_filename(ExportKind::Text, at), "resume-2024-03-09.txt");
        assert_eq!(
            export_filename(ExportKind::Json, at),
            "resume-data-2024-03-09.json"
        );
        assert_eq!(export_filename(ExportKind::Pdf, at), "resume-2024-03-09.pdf");
    }

    #[test]
    fn test_json_backup_restores_document() {
        let doc = ResumeDocument::sample();
        let json = to_json(&doc).unwrap();
        assert!(json.contains("\"skillsByCategory\""));
        assert_eq!(from_json(&json), Some(doc));
    }

    #[test]
    fn test_unreadable_import_is_absent() {
        assert_eq!(from_json("{\"personalInfo\": 42}"), None);
        assert_eq!(from_json("not json"), None);
    }
}
