use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use super::category::DocumentCategory;
use super::document::RemoteDocument;

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "svg", "heic", "heif", "tif", "tiff",
];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "webm", "mkv", "m4v", "wmv", "3gp"];

/// How a file should be previewed, decided by its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

impl MediaKind {
    /// Classify by file name extension (case-insensitive). Anything that is not a
    /// known image or video extension, including no extension, is a document.
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => MediaKind::Image,
            Some(ext) if VIDEO_EXTENSIONS.contains(&ext) => MediaKind::Video,
            _ => MediaKind::Document,
        }
    }
}

/// Human-readable size, e.g. "512 B", "1.5 KB", "2.0 MB".
pub fn format_file_size(bytes: Option<u64>) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let Some(bytes) = bytes else {
        return "Unknown size".to_string();
    };
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

/// Display projection of a single remote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFileView {
    pub id: String,
    pub name: String,
    pub size_label: String,
    pub uploaded_at_utc: DateTime<Utc>,
    pub uploaded_by_label: String,
    pub url: String,
    pub media_kind: MediaKind,
}

impl From<&RemoteDocument> for UploadedFileView {
    fn from(doc: &RemoteDocument) -> Self {
        UploadedFileView {
            id: doc.id.clone(),
            name: doc.file_name.clone(),
            size_label: format_file_size(doc.file_size_bytes),
            uploaded_at_utc: doc.uploaded_at_utc,
            uploaded_by_label: doc
                .uploaded_by_name()
                .unwrap_or_else(|| "Unknown".to_string()),
            url: doc.file_url.clone(),
            media_kind: MediaKind::from_file_name(&doc.file_name),
        }
    }
}

/// One category together with the files currently filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderView {
    pub category: DocumentCategory,
    pub files: Vec<UploadedFileView>,
}

impl FolderView {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, document_id: &str) -> bool {
        self.files.iter().any(|file| file.id == document_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadedBy;

    #[test]
    fn test_media_kind_from_extension() {
        assert_eq!(MediaKind::from_file_name("kiln.JPG"), MediaKind::Image);
        assert_eq!(MediaKind::from_file_name("burn.heic"), MediaKind::Image);
        assert_eq!(MediaKind::from_file_name("induction.mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_file_name("walkthrough.MOV"), MediaKind::Video);
        assert_eq!(MediaKind::from_file_name("permit.pdf"), MediaKind::Document);
        assert_eq!(MediaKind::from_file_name("log.xlsx"), MediaKind::Document);
    }

    #[test]
    fn test_media_kind_without_extension_is_document() {
        assert_eq!(MediaKind::from_file_name("README"), MediaKind::Document);
        assert_eq!(MediaKind::from_file_name(""), MediaKind::Document);
        assert_eq!(MediaKind::from_file_name(".mp4"), MediaKind::Document);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(None), "Unknown size");
        assert_eq!(format_file_size(Some(0)), "0 B");
        assert_eq!(format_file_size(Some(512)), "512 B");
        assert_eq!(format_file_size(Some(1536)), "1.5 KB");
        assert_eq!(format_file_size(Some(5 * 1024 * 1024)), "5.0 MB");
        assert_eq!(format_file_size(Some(3 * 1024 * 1024 * 1024)), "3.0 GB");
    }

    #[test]
    fn test_uploaded_file_view_from_document() {
        let uploaded_at = Utc::now();
        let doc = RemoteDocument {
            id: "9".to_string(),
            document_type_tag: "SITE_PHOTOS".to_string(),
            file_name: "kiln.png".to_string(),
            file_url: "https://cdn.example.com/kiln.png".to_string(),
            file_size_bytes: Some(2048),
            uploaded_at_utc: uploaded_at,
            uploaded_by: Some(UploadedBy {
                first_name: Some("Joel".to_string()),
                last_name: Some("Mensah".to_string()),
            }),
        };

        let view = UploadedFileView::from(&doc);

        assert_eq!(view.id, "9");
        assert_eq!(view.name, "kiln.png");
        assert_eq!(view.size_label, "2.0 KB");
        assert_eq!(view.uploaded_at_utc, uploaded_at);
        assert_eq!(view.uploaded_by_label, "Joel Mensah");
        assert_eq!(view.url, "https://cdn.example.com/kiln.png");
        assert_eq!(view.media_kind, MediaKind::Image);
    }

    #[test]
    fn test_uploaded_file_view_unknown_uploader() {
        let doc = RemoteDocument {
            id: "10".to_string(),
            document_type_tag: "SITE_PHOTOS".to_string(),
            file_name: "notes.docx".to_string(),
            file_url: "https://cdn.example.com/notes.docx".to_string(),
            file_size_bytes: None,
            uploaded_at_utc: Utc::now(),
            uploaded_by: None,
        };

        let view = UploadedFileView::from(&doc);

        assert_eq!(view.uploaded_by_label, "Unknown");
        assert_eq!(view.size_label, "Unknown size");
        assert_eq!(view.media_kind, MediaKind::Document);
    }
}
