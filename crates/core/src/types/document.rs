//! Document library records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::DocumentId;
use super::status::DocumentStatus;

/// Placeholder link stored until documents are served from real storage.
pub const PLACEHOLDER_DOWNLOAD_URL: &str = "#";

fn placeholder_download_url() -> String {
    PLACEHOLDER_DOWNLOAD_URL.to_owned()
}

/// One uploaded file and the metadata entered alongside it.
///
/// A form submission with several files produces one `Document` per file;
/// the shared metadata is copied into each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub access_level: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub version_control: bool,
    pub file_name: String,
    /// Declared size in bytes.
    pub file_size: u64,
    /// MIME type reported for the file.
    pub file_type: String,
    pub uploaded_by: String,
    pub upload_date: DateTime<Utc>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default = "placeholder_download_url")]
    pub download_url: String,
}

impl Document {
    /// Case-insensitive match against title, file name, tags, and category.
    ///
    /// A blank query matches every document.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&query)
            || self.file_name.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
            || self.category.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn handbook() -> Document {
        Document {
            id: DocumentId::new(10),
            title: "Employee Handbook".to_owned(),
            category: "policies".to_owned(),
            description: "Company policies".to_owned(),
            access_level: "all".to_owned(),
            tags: vec!["HR".to_owned(), "onboarding".to_owned()],
            version_control: false,
            file_name: "handbook-2025.pdf".to_owned(),
            file_size: 2048,
            file_type: "application/pdf".to_owned(),
            uploaded_by: "Jane Manager".to_owned(),
            upload_date: Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap(),
            status: DocumentStatus::Active,
            download_url: PLACEHOLDER_DOWNLOAD_URL.to_owned(),
        }
    }

    #[test]
    fn test_matches_query_fields() {
        let doc = handbook();
        assert!(doc.matches_query("handbook"));
        assert!(doc.matches_query("2025.PDF"));
        assert!(doc.matches_query("hr"));
        assert!(doc.matches_query("Polic"));
        assert!(doc.matches_query("   "));
        assert!(!doc.matches_query("payroll"));
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let json = r#"{
            "id": 1,
            "title": "Roster",
            "category": "team",
            "description": "Weekly roster",
            "accessLevel": "team",
            "fileName": "roster.xlsx",
            "fileSize": 100,
            "fileType": "application/vnd.ms-excel",
            "uploadedBy": "Admin User",
            "uploadDate": "2025-06-16T09:00:00Z"
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(doc.tags.is_empty());
        assert_eq!(doc.status, DocumentStatus::Active);
        assert_eq!(doc.download_url, "#");
    }
}
