//! In-memory document store with failure injection and call counters.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use kontiki_core::{DocumentStore, RemoteDocument, StoreError, StoreResult, UploadFile};

#[derive(Default)]
struct StoreState {
    documents: HashMap<String, Vec<RemoteDocument>>,
    fail_list: bool,
    fail_delete: bool,
    rejected_uploads: HashSet<String>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    next_id: AtomicU64,
    list_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    mutation_delay: Option<Duration>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(100),
            ..Default::default()
        }
    }

    pub fn with_documents(site_id: &str, documents: Vec<RemoteDocument>) -> Self {
        let store = Self::new();
        store
            .state
            .lock()
            .unwrap()
            .documents
            .insert(site_id.to_string(), documents);
        store
    }

    /// Sleep inside every upload/delete so overlapping mutations are observable.
    pub fn with_mutation_delay(mut self, delay: Duration) -> Self {
        self.mutation_delay = Some(delay);
        self
    }

    pub fn fail_list(&self, fail: bool) {
        self.state.lock().unwrap().fail_list = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.state.lock().unwrap().fail_delete = fail;
    }

    /// Answer uploads of this file name with a 500.
    pub fn reject_upload_of(&self, file_name: &str) {
        self.state
            .lock()
            .unwrap()
            .rejected_uploads
            .insert(file_name.to_string());
    }

    /// Server-side change not made through the session.
    pub fn insert(&self, site_id: &str, document: RemoteDocument) {
        self.state
            .lock()
            .unwrap()
            .documents
            .entry(site_id.to_string())
            .or_default()
            .push(document);
    }

    pub fn documents(&self, site_id: &str) -> Vec<RemoteDocument> {
        self.state
            .lock()
            .unwrap()
            .documents
            .get(site_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn max_concurrent_mutations(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter_mutation(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.mutation_delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn exit_mutation(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

fn server_error(body: &str) -> StoreError {
    StoreError::Status {
        status: 500,
        body: body.to_string(),
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list_documents(&self, site_id: &str) -> StoreResult<Vec<RemoteDocument>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        if state.fail_list {
            return Err(StoreError::Transport("connection refused".to_string()));
        }
        Ok(state.documents.get(site_id).cloned().unwrap_or_default())
    }

    async fn upload_document(
        &self,
        site_id: &str,
        document_type_tag: &str,
        file: &UploadFile,
    ) -> StoreResult<RemoteDocument> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.enter_mutation().await;

        let result = {
            let mut state = self.state.lock().unwrap();
            if state.rejected_uploads.contains(&file.file_name) {
                Err(server_error("upload rejected"))
            } else {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let document = RemoteDocument {
                    id: id.to_string(),
                    document_type_tag: document_type_tag.to_string(),
                    file_name: file.file_name.clone(),
                    file_url: format!("https://cdn.example.com/{}/{}", id, file.file_name),
                    file_size_bytes: Some(file.size() as u64),
                    uploaded_at_utc: Utc::now(),
                    uploaded_by: None,
                };
                state
                    .documents
                    .entry(site_id.to_string())
                    .or_default()
                    .push(document.clone());
                Ok(document)
            }
        };

        self.exit_mutation();
        result
    }

    async fn delete_document(&self, document_id: &str) -> StoreResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.enter_mutation().await;

        let result = {
            let mut state = self.state.lock().unwrap();
            if state.fail_delete {
                Err(server_error("delete failed"))
            } else {
                let mut found = false;
                for documents in state.documents.values_mut() {
                    let before = documents.len();
                    documents.retain(|doc| doc.id != document_id);
                    found |= documents.len() != before;
                }
                if found {
                    Ok(())
                } else {
                    Err(StoreError::Status {
                        status: 404,
                        body: "not found".to_string(),
                    })
                }
            }
        };

        self.exit_mutation();
        result
    }
}
