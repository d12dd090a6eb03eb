//! Document upload form and library.
//!
//! Files are picked into a [`SelectedFiles`] list, which silently keeps
//! only files within [`UPLOAD_FILES`]. Submitting an [`UploadForm`] yields
//! one [`Document`] per file sharing the form's metadata.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use deer_hub_core::{Document, DocumentId, DocumentStatus, PLACEHOLDER_DOWNLOAD_URL};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::forms::{FieldErrors, FileRule, FileSelection, MEGABYTE};

/// Limits for uploaded documents.
pub const UPLOAD_FILES: FileRule = FileRule {
    max_bytes: 10 * MEGABYTE,
    allowed_types: &[
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "application/vnd.ms-powerpoint",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "application/vnd.ms-excel",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "text/plain",
        "image/jpeg",
        "image/jpg",
        "image/png",
        "image/gif",
    ],
};

/// Documents shown in the "recent uploads" panel.
pub const RECENT_UPLOADS: usize = 5;

/// Tags shown on a library card.
pub const CARD_TAGS: usize = 2;

/// Largest random step of the progress bar, in percent.
pub const MAX_PROGRESS_STEP: f64 = 20.0;

pub const NO_FILES_SELECTED: &str = "Please select files to upload";
pub const UPLOAD_FAILED: &str = "Upload failed. Please try again.";
pub const DOWNLOAD_PLACEHOLDER: &str = "Download functionality would be implemented here";
pub const VIEWER_PLACEHOLDER: &str = "Document viewer would open here";

/// Notice shown after a successful upload.
#[must_use]
pub fn upload_success(count: usize) -> String {
    format!("Successfully uploaded {count} file(s)!")
}

/// Split a comma-separated tag field, dropping blank entries.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Files picked for upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedFiles(Vec<FileSelection>);

impl SelectedFiles {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add files, keeping only those within [`UPLOAD_FILES`].
    ///
    /// Returns one message for each file that was dropped.
    pub fn add(&mut self, files: impl IntoIterator<Item = FileSelection>) -> Vec<String> {
        let mut errors = Vec::new();
        for file in files {
            match UPLOAD_FILES.violations(&file).into_iter().next() {
                Some(error) => {
                    tracing::debug!(file = %file.name, %error, "Dropping file from selection");
                    errors.push(error);
                }
                None => self.0.push(file),
            }
        }
        errors
    }

    /// Remove the file at `index`.
    pub fn remove(&mut self, index: usize) -> Option<FileSelection> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn files(&self) -> &[FileSelection] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.0.iter().map(|f| f.size).sum()
    }
}

/// Why an upload form was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("{0}")]
    Fields(FieldErrors),
    #[error("Please select files to upload")]
    NoFiles,
}

/// The upload form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub title: String,
    pub category: String,
    pub description: String,
    pub access_level: String,
    /// Comma-separated.
    pub tags: String,
    pub version_control: bool,
    pub files: SelectedFiles,
}

impl UploadForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the form for upload.
    ///
    /// # Errors
    ///
    /// Returns the failing fields, or [`UploadError::NoFiles`] when the
    /// fields are fine but nothing is selected.
    pub fn validate(&self) -> Result<ValidatedUpload, UploadError> {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title);
        errors.require("category", &self.category);
        errors.require("description", &self.description);
        errors.into_result().map_err(UploadError::Fields)?;

        if self.files.is_empty() {
            return Err(UploadError::NoFiles);
        }

        Ok(ValidatedUpload {
            title: self.title.trim().to_owned(),
            category: self.category.trim().to_owned(),
            description: self.description.trim().to_owned(),
            access_level: self.access_level.trim().to_owned(),
            tags: parse_tags(&self.tags),
            version_control: self.version_control,
            files: self.files.files().to_vec(),
        })
    }
}

/// Upload form contents that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub title: String,
    pub category: String,
    pub description: String,
    pub access_level: String,
    pub tags: Vec<String>,
    pub version_control: bool,
    pub files: Vec<FileSelection>,
}

impl ValidatedUpload {
    /// One document per file, newest first.
    ///
    /// The file at index `i` gets ID `base + i`, so the last file picked
    /// is at the front of the returned list.
    #[must_use]
    pub fn into_documents(
        self,
        base: DocumentId,
        uploaded_by: &str,
        at: DateTime<Utc>,
    ) -> Vec<Document> {
        let mut documents: Vec<Document> = self
            .files
            .into_iter()
            .zip(0_i64..)
            .map(|(file, index)| Document {
                id: base.offset(index),
                title: self.title.clone(),
                category: self.category.clone(),
                description: self.description.clone(),
                access_level: self.access_level.clone(),
                tags: self.tags.clone(),
                version_control: self.version_control,
                file_name: file.name,
                file_size: file.size,
                file_type: file.mime,
                uploaded_by: uploaded_by.to_owned(),
                upload_date: at,
                status: DocumentStatus::Active,
                download_url: PLACEHOLDER_DOWNLOAD_URL.to_owned(),
            })
            .collect();
        documents.reverse();
        documents
    }
}

/// Simulated upload progress bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UploadProgress {
    percent: f64,
}

impl UploadProgress {
    #[must_use]
    pub const fn new() -> Self {
        Self { percent: 0.0 }
    }

    /// Advance by a random step of up to [`MAX_PROGRESS_STEP`], capped at 100.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> f64 {
        self.advance(rng.random_range(0.0..MAX_PROGRESS_STEP))
    }

    /// Advance by `step` percent, capped at 100.
    pub fn advance(&mut self, step: f64) -> f64 {
        self.percent = (self.percent + step.max(0.0)).min(100.0);
        self.percent
    }

    #[must_use]
    pub const fn percent(&self) -> f64 {
        self.percent
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }
}

impl fmt::Display for UploadProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.percent)
    }
}

/// How the library is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            _ => Err(format!("invalid view mode: {s}")),
        }
    }
}

/// Broad kind of a file, used to pick its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Pdf,
    Word,
    Presentation,
    Spreadsheet,
    Text,
    Image,
    Other,
}

impl FileKind {
    /// Classify a MIME type.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        if mime.contains("pdf") {
            Self::Pdf
        } else if mime.contains("word") {
            Self::Word
        } else if mime.contains("powerpoint") || mime.contains("presentation") {
            Self::Presentation
        } else if mime.contains("excel") || mime.contains("spreadsheet") {
            Self::Spreadsheet
        } else if mime.contains("text") {
            Self::Text
        } else if mime.contains("image") {
            Self::Image
        } else {
            Self::Other
        }
    }

    /// Icon classes for the kind.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Pdf => "fas fa-file-pdf text-danger",
            Self::Word => "fas fa-file-word text-primary",
            Self::Presentation => "fas fa-file-powerpoint text-warning",
            Self::Spreadsheet => "fas fa-file-excel text-success",
            Self::Text => "fas fa-file-alt text-secondary",
            Self::Image => "fas fa-file-image text-info",
            Self::Other => "fas fa-file text-muted",
        }
    }
}

/// Human-readable size such as "1.5 MB" or "0 Bytes".
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    let mut unit = "Bytes";
    let mut scale = 1_u64;
    for &next in UNITS.iter().skip(1) {
        if bytes < scale * 1024 {
            break;
        }
        scale *= 1024;
        unit = next;
    }

    let value = format!("{:.2}", bytes as f64 / scale as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{value} {unit}")
}

/// What a library card or row shows for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentCard {
    pub id: DocumentId,
    pub icon: &'static str,
    pub title: String,
    pub file_name: String,
    pub category: String,
    pub size: String,
    pub uploaded: String,
    pub tags: Vec<String>,
}

impl From<&Document> for DocumentCard {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            icon: FileKind::from_mime(&doc.file_type).icon(),
            title: doc.title.clone(),
            file_name: doc.file_name.clone(),
            category: doc.category.clone(),
            size: format_file_size(doc.file_size),
            uploaded: doc.upload_date.format("%Y-%m-%d").to_string(),
            tags: doc.tags.iter().take(CARD_TAGS).cloned().collect(),
        }
    }
}

/// Documents matching `query`, in library order.
#[must_use]
pub fn search<'a>(documents: &'a [Document], query: &str) -> Vec<&'a Document> {
    documents.iter().filter(|d| d.matches_query(query)).collect()
}
