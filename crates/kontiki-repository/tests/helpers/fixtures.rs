//! Test fixtures: remote documents and upload files.

use chrono::{TimeZone, Utc};
use kontiki_core::{RemoteDocument, UploadFile, UploadedBy};

pub fn remote_document(id: &str, tag: &str) -> RemoteDocument {
    RemoteDocument {
        id: id.to_string(),
        document_type_tag: tag.to_string(),
        file_name: format!("doc-{}.pdf", id),
        file_url: format!("https://cdn.example.com/doc-{}.pdf", id),
        file_size_bytes: Some(1024),
        uploaded_at_utc: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        uploaded_by: Some(UploadedBy {
            first_name: Some("Ana".to_string()),
            last_name: Some("Silva".to_string()),
        }),
    }
}

/// Minimal PDF upload.
pub fn pdf(file_name: &str) -> UploadFile {
    UploadFile::new(file_name, b"%PDF-1.4\n%%EOF\n".to_vec())
}
