//! Form validation helpers shared by the auth, leave and upload forms.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Message shown next to an empty required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Bytes in one megabyte as the upload limits count them.
pub const MEGABYTE: u64 = 1024 * 1024;

/// A validation failure on one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Validation failures in the order the fields appear on the form.
///
/// Each field carries at most one message; the first one recorded wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record `message` against `field` unless it already has one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.0.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    /// Record [`REQUIRED_MESSAGE`] if `value` is blank.
    ///
    /// Returns true when the field has a value.
    pub fn require(&mut self, field: &'static str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, REQUIRED_MESSAGE);
            false
        } else {
            true
        }
    }

    /// Message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed validation.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// A file picked in a file input: its name, declared size and MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSelection {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl FileSelection {
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }

    /// Describe a file on disk, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file's metadata cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or("application/octet-stream", mime_for_extension);

        Ok(Self::new(name, metadata.len(), mime))
    }
}

/// MIME type for a file extension, `application/octet-stream` if unknown.
#[must_use]
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "txt" => "text/plain",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Size and type limits for a file input.
#[derive(Debug, Clone, Copy)]
pub struct FileRule {
    pub max_bytes: u64,
    pub allowed_types: &'static [&'static str],
}

impl FileRule {
    /// Every limit `file` breaks, as user-facing messages.
    #[must_use]
    pub fn violations(&self, file: &FileSelection) -> Vec<String> {
        let mut errors = Vec::new();
        if file.size > self.max_bytes {
            errors.push(format!(
                "{} exceeds {}MB limit",
                file.name,
                self.max_bytes / MEGABYTE
            ));
        }
        if !self.allowed_types.contains(&file.mime.as_str()) {
            errors.push(format!("{} has unsupported format", file.name));
        }
        errors
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const RULE: FileRule = FileRule {
        max_bytes: 5 * MEGABYTE,
        allowed_types: &["application/pdf", "image/png"],
    };

    #[test]
    fn test_require_records_message_for_blank() {
        let mut errors = FieldErrors::new();
        assert!(!errors.require("reason", "   "));
        assert!(errors.require("priority", "normal"));
        assert_eq!(errors.get("reason"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("endDate", "End date must be after start date");
        errors.add("endDate", "something else");
        assert_eq!(errors.get("endDate"), Some("End date must be after start date"));
        assert_eq!(errors.to_string(), "endDate: End date must be after start date");
        assert!(errors.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_file_rule_reports_every_violation() {
        let file = FileSelection::new("scan.bmp", 6 * MEGABYTE, "image/bmp");
        assert_eq!(
            RULE.violations(&file),
            vec!["scan.bmp exceeds 5MB limit", "scan.bmp has unsupported format"]
        );
        let ok = FileSelection::new("note.pdf", 5 * MEGABYTE, "application/pdf");
        assert!(RULE.violations(&ok).is_empty());
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension("PDF"), "application/pdf");
        assert_eq!(mime_for_extension("jpg"), "image/jpeg");
        assert_eq!(mime_for_extension("exe"), "application/octet-stream");
    }

    #[test]
    fn test_from_path_reads_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minutes.txt");
        std::fs::write(&path, b"hello").unwrap();
        let file = FileSelection::from_path(&path).unwrap();
        assert_eq!(file.name, "minutes.txt");
        assert_eq!(file.size, 5);
        assert_eq!(file.mime, "text/plain");
    }
}
