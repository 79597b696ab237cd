//! Remote document store abstraction.
//!
//! The HTTP client implements this trait; tests substitute an in-memory store.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{RemoteDocument, UploadFile};

/// The backend that owns a site's uploaded documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `GET /sites/{site_id}/documents`: every document for the site, in server order.
    async fn list_documents(&self, site_id: &str) -> StoreResult<Vec<RemoteDocument>>;

    /// `POST /sites/{site_id}/documents`: store one file under a document type tag.
    async fn upload_document(
        &self,
        site_id: &str,
        document_type_tag: &str,
        file: &UploadFile,
    ) -> StoreResult<RemoteDocument>;

    /// `DELETE /documents/{document_id}`
    async fn delete_document(&self, document_id: &str) -> StoreResult<()>;
}
