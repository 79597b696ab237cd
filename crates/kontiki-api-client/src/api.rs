//! Site document endpoints.

use async_trait::async_trait;
use kontiki_core::{DocumentStore, RemoteDocument, StoreError, StoreResult, UploadFile};
use reqwest::multipart::{Form, Part};

use crate::ApiClient;

impl ApiClient {
    /// List every document stored for a site.
    pub async fn list_site_documents(&self, site_id: &str) -> StoreResult<Vec<RemoteDocument>> {
        tracing::debug!(site_id = %site_id, "Listing site documents");
        self.get(&format!("/sites/{}/documents", urlencoding::encode(site_id)))
            .await
    }

    /// Upload one file tagged with a document type.
    pub async fn upload_site_document(
        &self,
        site_id: &str,
        document_type_tag: &str,
        file: &UploadFile,
    ) -> StoreResult<RemoteDocument> {
        tracing::debug!(
            site_id = %site_id,
            document_type_tag = %document_type_tag,
            file_name = %file.file_name,
            size = file.size(),
            "Uploading site document"
        );

        let part = Part::bytes(file.data.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.content_type())
            .map_err(|e| StoreError::Transport(format!("Invalid content type: {}", e)))?;

        let form = Form::new()
            .text("documentTypeTag", document_type_tag.to_string())
            .part("file", part);

        self.post_multipart(
            &format!("/sites/{}/documents", urlencoding::encode(site_id)),
            form,
        )
        .await
    }

    /// Delete a document by ID.
    pub async fn delete_site_document(&self, document_id: &str) -> StoreResult<()> {
        tracing::debug!(document_id = %document_id, "Deleting site document");
        self.delete(&format!("/documents/{}", urlencoding::encode(document_id)))
            .await
    }
}

#[async_trait]
impl DocumentStore for ApiClient {
    async fn list_documents(&self, site_id: &str) -> StoreResult<Vec<RemoteDocument>> {
        self.list_site_documents(site_id).await
    }

    async fn upload_document(
        &self,
        site_id: &str,
        document_type_tag: &str,
        file: &UploadFile,
    ) -> StoreResult<RemoteDocument> {
        self.upload_site_document(site_id, document_type_tag, file)
            .await
    }

    async fn delete_document(&self, document_id: &str) -> StoreResult<()> {
        self.delete_site_document(document_id).await
    }
}
