//! Kontiki Core Library
//!
//! This crate provides the document category registry, site document models,
//! folder reconciliation, upload policy, error types and configuration shared by
//! the API client, the repository session and the CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod reconcile;
pub mod registry;
pub mod store;

// Re-export commonly used types
pub use config::{ApiAuth, ClientConfig};
pub use error::{ErrorMetadata, LogLevel, RegistryError, RepositoryError, StoreError, StoreResult};
pub use models::{
    CategoryGroup, DocumentCategory, FolderView, MediaKind, RemoteDocument, RepositorySnapshot,
    UploadFile, UploadedBy, UploadedFileView,
};
pub use policy::{UploadPolicy, UploadRejection};
pub use reconcile::{reconcile, unmatched};
pub use registry::CategoryRegistry;
pub use store::DocumentStore;
