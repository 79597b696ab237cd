pub mod fixtures;
pub mod store;

use std::sync::Arc;

use kontiki_core::{CategoryGroup, CategoryRegistry, DocumentCategory};
use kontiki_repository::RepositorySession;

pub use store::InMemoryStore;

pub const SITE_ID: &str = "site-42";

/// Two-category registry: `a` (tag T1) and `b` (tag T2).
pub fn two_category_registry() -> CategoryRegistry {
    CategoryRegistry::new(vec![
        DocumentCategory::new("a", "T1", "Category A", CategoryGroup::Compliance, true),
        DocumentCategory::new("b", "T2", "Category B", CategoryGroup::Training, false),
    ])
    .expect("test registry is valid")
}

/// Session over the two-category registry, backed by `store`.
pub fn session_with(store: &Arc<InMemoryStore>) -> RepositorySession {
    RepositorySession::new(store.clone()).with_registry(two_category_registry())
}
