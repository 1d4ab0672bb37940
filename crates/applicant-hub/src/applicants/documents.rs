use std::collections::BTreeMap;

use chrono::NaiveDate;
use mime::Mime;
use serde::{Deserialize, Serialize};

/// Fixed document categories an applicant file is sorted into. Each slot
/// holds an ordered list of documents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSlot {
    Resume,
    ApplicationForm,
    IdsPassport,
    MedicalResults,
    SignedContracts,
    VisaCopy,
    OtherDocuments,
}

impl DocumentSlot {
    pub const ALL: [DocumentSlot; 7] = [
        DocumentSlot::Resume,
        DocumentSlot::ApplicationForm,
        DocumentSlot::IdsPassport,
        DocumentSlot::MedicalResults,
        DocumentSlot::SignedContracts,
        DocumentSlot::VisaCopy,
        DocumentSlot::OtherDocuments,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DocumentSlot::Resume => "Resume",
            DocumentSlot::ApplicationForm => "Application Form",
            DocumentSlot::IdsPassport => "IDs / Passport",
            DocumentSlot::MedicalResults => "Medical Results",
            DocumentSlot::SignedContracts => "Signed Contracts",
            DocumentSlot::VisaCopy => "Visa Copy",
            DocumentSlot::OtherDocuments => "Other Documents",
        }
    }
}

/// Uploaded-file descriptor owned by one applicant record. Only metadata
/// lives here; byte transport is handled elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub size_display: String,
    pub mime_type: String,
    pub upload_date: NaiveDate,
    pub file_handle: String,
}

impl Document {
    /// Builds a descriptor from upload metadata, rendering the size the way
    /// the detail page does (whole kilobytes).
    pub fn from_upload(
        name: &str,
        size_bytes: u64,
        media_type: &Mime,
        upload_date: NaiveDate,
        file_handle: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            size_display: format_size_kb(size_bytes),
            mime_type: media_type.essence_str().to_string(),
            upload_date,
            file_handle: file_handle.to_string(),
        }
    }
}

/// Per-slot document lists for one applicant record.
pub type DocumentSet = BTreeMap<DocumentSlot, Vec<Document>>;

/// `"{n} KB"` with the byte count divided by 1024 and rounded to a whole
/// number, matching the upload form's rendering.
pub fn format_size_kb(size_bytes: u64) -> String {
    let kb = (size_bytes as f64 / 1024.0).round() as u64;
    format!("{kb} KB")
}
