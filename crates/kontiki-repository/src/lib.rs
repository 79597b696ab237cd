//! Site document repository.
//!
//! A `RepositorySession` keeps one site's document list in sync with the
//! document store and derives a folder per category from it.
//! `DocumentRepository` is the presenter-facing facade over a session.

pub mod presenter;
pub mod session;
pub mod summary;

pub use presenter::{DocumentRepository, Notification, NotificationLevel};
pub use session::RepositorySession;
pub use summary::{ComplianceSummary, GroupSummary};
