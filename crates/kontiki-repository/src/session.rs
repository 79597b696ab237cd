//! Repository session for one open site.
//!
//! The session holds the document list last fetched for the site and
//! re-fetches it in full after every upload or delete; it never patches the
//! list locally. Folder views are derived from the current snapshot on each
//! read.

use std::sync::{Arc, PoisonError, RwLock};

use futures::future::join_all;
use kontiki_core::{
    reconcile, unmatched, CategoryGroup, CategoryRegistry, ClientConfig, DocumentCategory,
    DocumentStore, FolderView, RepositoryError, RepositorySnapshot, UploadFile, UploadPolicy,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::summary::ComplianceSummary;

pub struct RepositorySession {
    store: Arc<dyn DocumentStore>,
    registry: CategoryRegistry,
    policy: UploadPolicy,
    snapshot: RwLock<Option<Arc<RepositorySnapshot>>>,
    /// Present only when overlapping mutations should queue.
    mutation_lock: Option<Mutex<()>>,
}

impl RepositorySession {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            registry: CategoryRegistry::builtin(),
            policy: UploadPolicy::default(),
            snapshot: RwLock::new(None),
            mutation_lock: None,
        }
    }

    pub fn from_config(store: Arc<dyn DocumentStore>, config: &ClientConfig) -> Self {
        Self::new(store)
            .with_upload_policy(config.upload_policy())
            .with_serialized_mutations(config.serialize_mutations)
    }

    pub fn with_registry(mut self, registry: CategoryRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Queue `upload_many`/`delete_one` calls behind a per-session lock.
    pub fn with_serialized_mutations(mut self, enabled: bool) -> Self {
        self.mutation_lock = enabled.then(|| Mutex::new(()));
        self
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn snapshot(&self) -> Option<Arc<RepositorySnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn site_id(&self) -> Option<String> {
        self.snapshot().map(|s| s.site_id.clone())
    }

    pub fn categories(&self, group: CategoryGroup) -> Vec<DocumentCategory> {
        self.registry.in_group(group)
    }

    /// Every folder, derived from the current snapshot. Before the first load
    /// every folder is empty.
    pub fn folders(&self) -> Vec<FolderView> {
        self.derive(self.snapshot().as_deref())
    }

    pub fn folder(&self, category_id: &str) -> Result<FolderView, RepositoryError> {
        self.folders()
            .into_iter()
            .find(|folder| folder.category.id == category_id)
            .ok_or_else(|| RepositoryError::UnknownCategory(category_id.to_string()))
    }

    pub fn compliance_summary(&self) -> ComplianceSummary {
        let snapshot = self.snapshot();
        let folders = self.derive(snapshot.as_deref());
        ComplianceSummary::from_folders(snapshot.map(|s| s.site_id.clone()), &folders)
    }

    /// Drop the snapshot when the site's document page is closed.
    pub fn close(&self) {
        let previous = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(snapshot) = previous {
            tracing::debug!(site_id = %snapshot.site_id, "Closed site document session");
        }
    }

    /// Fetch the site's full document list and make it the current snapshot.
    ///
    /// On failure the previous snapshot, if any, is kept as it was.
    pub async fn load(&self, site_id: &str) -> Result<Vec<FolderView>, RepositoryError> {
        let documents = self.store.list_documents(site_id).await.map_err(|source| {
            tracing::warn!(
                error = %source,
                site_id = %site_id,
                "Failed to load site documents"
            );
            RepositoryError::Fetch {
                site_id: site_id.to_string(),
                source,
            }
        })?;

        {
            let dropped = unmatched(self.registry.all_categories(), &documents);
            if !dropped.is_empty() {
                let tags: Vec<&str> = dropped
                    .iter()
                    .map(|doc| doc.document_type_tag.as_str())
                    .collect();
                tracing::warn!(
                    site_id = %site_id,
                    count = dropped.len(),
                    tags = ?tags,
                    "Documents with unknown type tags are not shown in any folder"
                );
            }
        }

        let snapshot = Arc::new(RepositorySnapshot::new(site_id, documents));
        let folders = self.derive(Some(&snapshot));

        tracing::info!(
            site_id = %site_id,
            documents = snapshot.documents.len(),
            "Loaded site documents"
        );

        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot);

        Ok(folders)
    }

    /// Upload every file into one category concurrently, then reload.
    ///
    /// Fails with a single `Upload` error if any request fails. Files that did
    /// upload stay on the server and show up after the reload.
    pub async fn upload_many(
        &self,
        category_id: &str,
        files: &[UploadFile],
    ) -> Result<Vec<FolderView>, RepositoryError> {
        let _guard = self.lock_mutations().await;
        let site_id = self.require_site()?;
        let category = *self
            .registry
            .by_id(category_id)
            .ok_or_else(|| RepositoryError::UnknownCategory(category_id.to_string()))?;

        for file in files {
            self.policy
                .validate(file)
                .map_err(|reason| RepositoryError::InvalidUpload {
                    file_name: file.file_name.clone(),
                    reason,
                })?;
        }

        tracing::info!(
            site_id = %site_id,
            category_id = %category_id,
            files = files.len(),
            "Uploading documents"
        );

        let results = join_all(files.iter().map(|file| {
            self.store
                .upload_document(&site_id, category.document_type_tag, file)
        }))
        .await;

        let attempted = results.len();
        let mut failures: Vec<_> = results
            .into_iter()
            .zip(files)
            .filter_map(|(result, file)| match result {
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        site_id = %site_id,
                        file_name = %file.file_name,
                        "Document upload failed"
                    );
                    Some(e)
                }
            })
            .collect();

        let outcome = if failures.is_empty() {
            Ok(())
        } else {
            let failed = failures.len();
            Err(RepositoryError::Upload {
                category_id: category_id.to_string(),
                failed,
                attempted,
                source: failures.swap_remove(0),
            })
        };

        self.resync_after(&site_id, outcome).await
    }

    /// Delete one document, then reload whether or not the delete succeeded.
    pub async fn delete_one(&self, document_id: &str) -> Result<Vec<FolderView>, RepositoryError> {
        let _guard = self.lock_mutations().await;
        let site_id = self.require_site()?;

        let outcome = match self.store.delete_document(document_id).await {
            Ok(()) => {
                tracing::info!(
                    site_id = %site_id,
                    document_id = %document_id,
                    "Deleted document"
                );
                Ok(())
            }
            Err(source) => {
                tracing::warn!(
                    error = %source,
                    site_id = %site_id,
                    document_id = %document_id,
                    "Failed to delete document"
                );
                Err(RepositoryError::Delete {
                    document_id: document_id.to_string(),
                    source,
                })
            }
        };

        self.resync_after(&site_id, outcome).await
    }

    fn derive(&self, snapshot: Option<&RepositorySnapshot>) -> Vec<FolderView> {
        let documents = snapshot.map(|s| s.documents.as_slice()).unwrap_or(&[]);
        reconcile(self.registry.all_categories(), documents)
    }

    fn require_site(&self) -> Result<String, RepositoryError> {
        self.site_id().ok_or(RepositoryError::NoActiveSite)
    }

    async fn lock_mutations(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.mutation_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }

    /// Reload after a mutation. The mutation's own error wins over a reload error.
    async fn resync_after(
        &self,
        site_id: &str,
        outcome: Result<(), RepositoryError>,
    ) -> Result<Vec<FolderView>, RepositoryError> {
        let reloaded = self.load(site_id).await;
        match outcome {
            Ok(()) => reloaded,
            Err(err) => {
                if let Err(reload_err) = reloaded {
                    tracing::warn!(
                        error = %reload_err,
                        site_id = %site_id,
                        "Resync after failed mutation also failed"
                    );
                }
                Err(err)
            }
        }
    }
}
