//! Folder presenter facade.
//!
//! Wraps a `RepositorySession` and turns every outcome into a `Notification`
//! a UI (or the CLI) can show as-is.

use std::sync::Arc;

use kontiki_core::{
    CategoryGroup, DocumentCategory, ErrorMetadata, FolderView, LogLevel, RepositoryError,
    UploadFile,
};
use serde::Serialize;

use crate::session::RepositorySession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// User-facing result of a presenter action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<&'static str>,
    pub retryable: bool,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            message: message.into(),
            code: None,
            suggested_action: None,
            retryable: false,
        }
    }

    /// Log the error at its own level and build the notification for it.
    pub fn from_error(err: &RepositoryError) -> Self {
        let code = err.error_code();
        match err.log_level() {
            LogLevel::Debug => tracing::debug!(code, error = %err.detailed_message(), "Repository action rejected"),
            LogLevel::Warn => tracing::warn!(code, error = %err.detailed_message(), "Repository action failed"),
            LogLevel::Error => tracing::error!(code, error = %err.detailed_message(), "Repository action failed"),
        }

        Self {
            level: NotificationLevel::Error,
            title: error_title(err).to_string(),
            message: err.client_message(),
            code: Some(code),
            suggested_action: err.suggested_action(),
            retryable: err.is_recoverable(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

fn error_title(err: &RepositoryError) -> &'static str {
    match err {
        RepositoryError::Fetch { .. } => "Loading failed",
        RepositoryError::Upload { .. } | RepositoryError::InvalidUpload { .. } => "Upload failed",
        RepositoryError::Delete { .. } => "Delete failed",
        RepositoryError::UnknownCategory(_) => "Unknown folder",
        RepositoryError::NoActiveSite => "No site open",
    }
}

/// The operations a folder view calls.
#[derive(Clone)]
pub struct DocumentRepository {
    session: Arc<RepositorySession>,
}

impl DocumentRepository {
    pub fn new(session: Arc<RepositorySession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &RepositorySession {
        &self.session
    }

    pub fn get_categories(&self, group: CategoryGroup) -> Vec<DocumentCategory> {
        self.session.categories(group)
    }

    pub fn get_folder_view(&self, category_id: &str) -> Result<FolderView, Notification> {
        self.session
            .folder(category_id)
            .map_err(|e| Notification::from_error(&e))
    }

    pub async fn refresh(&self, site_id: &str) -> Result<Vec<FolderView>, Notification> {
        self.session
            .load(site_id)
            .await
            .map_err(|e| Notification::from_error(&e))
    }

    pub async fn upload(
        &self,
        category_id: &str,
        files: &[UploadFile],
    ) -> Result<Notification, Notification> {
        self.session
            .upload_many(category_id, files)
            .await
            .map_err(|e| Notification::from_error(&e))?;

        let message = match files.len() {
            0 => "No files selected".to_string(),
            1 => format!("{} uploaded", files[0].file_name),
            n => format!("{} files uploaded", n),
        };
        Ok(Notification::success("Upload complete", message))
    }

    pub async fn delete(&self, document_id: &str) -> Result<Notification, Notification> {
        self.session
            .delete_one(document_id)
            .await
            .map_err(|e| Notification::from_error(&e))?;

        Ok(Notification::success("File deleted", "The file was removed"))
    }
}
