//! Error types module
//!
//! `StoreError` covers failures talking to the remote document store.
//! `RepositoryError` is what the repository session reports to its presenter;
//! it carries `ErrorMetadata` so every failure can be shown as a notification.

use std::io;

use crate::policy::UploadRejection;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a failed request
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "FETCH_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether repeating the action may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Remote document store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to send request: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// HTTP status if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Category registry construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Duplicate category id: {0}")]
    DuplicateId(String),

    #[error("Duplicate document type tag: {0}")]
    DuplicateTag(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Failed to load documents for site {site_id}: {source}")]
    Fetch {
        site_id: String,
        #[source]
        source: StoreError,
    },

    #[error("{failed} of {attempted} uploads to {category_id} failed: {source}")]
    Upload {
        category_id: String,
        failed: usize,
        attempted: usize,
        #[source]
        source: StoreError,
    },

    #[error("Failed to delete document {document_id}: {source}")]
    Delete {
        document_id: String,
        #[source]
        source: StoreError,
    },

    #[error("Unknown document category: {0}")]
    UnknownCategory(String),

    #[error("No site loaded")]
    NoActiveSite,

    #[error("Upload rejected for {file_name}: {reason}")]
    InvalidUpload {
        file_name: String,
        #[source]
        reason: UploadRejection,
    },
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn repository_error_static_metadata(
    err: &RepositoryError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        RepositoryError::Fetch { .. } => (
            "FETCH_FAILED",
            true,
            Some("Check your connection and refresh"),
            LogLevel::Warn,
        ),
        RepositoryError::Upload { .. } => (
            "UPLOAD_FAILED",
            true,
            Some("Review the folder and upload the missing files again"),
            LogLevel::Warn,
        ),
        RepositoryError::Delete { .. } => (
            "DELETE_FAILED",
            true,
            Some("Try deleting the file again"),
            LogLevel::Warn,
        ),
        RepositoryError::UnknownCategory(_) => (
            "UNKNOWN_CATEGORY",
            false,
            Some("Choose one of the listed document categories"),
            LogLevel::Debug,
        ),
        RepositoryError::NoActiveSite => (
            "NO_ACTIVE_SITE",
            false,
            Some("Open a site before changing its documents"),
            LogLevel::Error,
        ),
        RepositoryError::InvalidUpload { .. } => (
            "INVALID_UPLOAD",
            false,
            Some("Upload images, video, PDF, Word or Excel files within the size limit"),
            LogLevel::Debug,
        ),
    }
}

impl RepositoryError {
    /// Get the error type name
    pub fn error_type(&self) -> &str {
        match self {
            RepositoryError::Fetch { .. } => "Fetch",
            RepositoryError::Upload { .. } => "Upload",
            RepositoryError::Delete { .. } => "Delete",
            RepositoryError::UnknownCategory(_) => "UnknownCategory",
            RepositoryError::NoActiveSite => "NoActiveSite",
            RepositoryError::InvalidUpload { .. } => "InvalidUpload",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for RepositoryError {
    fn error_code(&self) -> &'static str {
        repository_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        repository_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        repository_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        repository_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            RepositoryError::Fetch { .. } => "Could not load site documents".to_string(),
            RepositoryError::Upload {
                failed, attempted, ..
            } => {
                if *attempted == 1 {
                    "The file could not be uploaded".to_string()
                } else {
                    format!("{} of {} files could not be uploaded", failed, attempted)
                }
            }
            RepositoryError::Delete { .. } => "The file could not be deleted".to_string(),
            RepositoryError::UnknownCategory(ref id) => {
                format!("Unknown document category: {}", id)
            }
            RepositoryError::NoActiveSite => "No site is open".to_string(),
            RepositoryError::InvalidUpload {
                ref file_name,
                ref reason,
            } => format!("{} cannot be uploaded: {}", file_name, reason),
        }
    }
}
