//! Derives per-category folder views from a flat document list.
//!
//! Every category yields exactly one folder, in registry order, even when it has
//! no files. Documents whose tag matches no category appear in no folder.

use std::collections::HashMap;

use crate::models::{DocumentCategory, FolderView, RemoteDocument, UploadedFileView};

fn group_by_tag(documents: &[RemoteDocument]) -> HashMap<&str, Vec<&RemoteDocument>> {
    let mut groups: HashMap<&str, Vec<&RemoteDocument>> = HashMap::new();
    for doc in documents {
        groups
            .entry(doc.document_type_tag.as_str())
            .or_default()
            .push(doc);
    }
    groups
}

/// Build one folder per category. Files keep the order the server returned them in.
pub fn reconcile(categories: &[DocumentCategory], documents: &[RemoteDocument]) -> Vec<FolderView> {
    let groups = group_by_tag(documents);

    categories
        .iter()
        .map(|category| FolderView {
            category: *category,
            files: groups
                .get(category.document_type_tag)
                .map(|docs| docs.iter().map(|doc| UploadedFileView::from(*doc)).collect())
                .unwrap_or_default(),
        })
        .collect()
}

/// Documents that `reconcile` leaves out because no category carries their tag.
pub fn unmatched<'a>(
    categories: &[DocumentCategory],
    documents: &'a [RemoteDocument],
) -> Vec<&'a RemoteDocument> {
    documents
        .iter()
        .filter(|doc| {
            !categories
                .iter()
                .any(|c| c.document_type_tag == doc.document_type_tag)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryGroup;
    use crate::registry::CategoryRegistry;
    use chrono::Utc;

    const A: DocumentCategory =
        DocumentCategory::new("a", "T1", "Category A", CategoryGroup::Compliance, true);
    const B: DocumentCategory =
        DocumentCategory::new("b", "T2", "Category B", CategoryGroup::Training, false);

    fn doc(id: &str, tag: &str) -> RemoteDocument {
        RemoteDocument {
            id: id.to_string(),
            document_type_tag: tag.to_string(),
            file_name: format!("{}.pdf", id),
            file_url: format!("https://cdn.example.com/{}.pdf", id),
            file_size_bytes: Some(1024),
            uploaded_at_utc: Utc::now(),
            uploaded_by: None,
        }
    }

    fn ids(folder: &FolderView) -> Vec<&str> {
        folder.files.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_empty_documents_yield_empty_folders() {
        let folders = reconcile(&[A, B], &[]);

        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0].category, A);
        assert_eq!(folders[1].category, B);
        assert!(folders.iter().all(FolderView::is_empty));
    }

    #[test]
    fn test_documents_grouped_by_tag_in_server_order() {
        let documents = vec![doc("1", "T1"), doc("3", "T2"), doc("2", "T1")];

        let folders = reconcile(&[A, B], &documents);

        assert_eq!(ids(&folders[0]), vec!["1", "2"]);
        assert_eq!(ids(&folders[1]), vec!["3"]);
    }

    #[test]
    fn test_unknown_tag_is_dropped() {
        let documents = vec![doc("4", "UNKNOWN")];

        let folders = reconcile(&[A, B], &documents);

        assert!(folders.iter().all(|f| !f.contains("4")));
        assert_eq!(unmatched(&[A, B], &documents).len(), 1);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let documents = vec![doc("1", "T1"), doc("2", "T2"), doc("5", "OTHER")];

        assert_eq!(reconcile(&[A, B], &documents), reconcile(&[A, B], &documents));
    }

    #[test]
    fn test_each_matched_document_lands_in_exactly_one_folder() {
        let registry = CategoryRegistry::builtin();
        let documents: Vec<_> = registry
            .all_categories()
            .iter()
            .enumerate()
            .map(|(i, c)| doc(&i.to_string(), c.document_type_tag))
            .chain(std::iter::once(doc("stray", "LEGACY_TAG")))
            .collect();

        let folders = reconcile(registry.all_categories(), &documents);

        assert_eq!(folders.len(), registry.len());
        for d in &documents {
            let holders: Vec<_> = folders.iter().filter(|f| f.contains(&d.id)).collect();
            if registry.by_tag(&d.document_type_tag).is_some() {
                assert_eq!(holders.len(), 1, "document {} misplaced", d.id);
                assert_eq!(holders[0].category.document_type_tag, d.document_type_tag);
            } else {
                assert!(holders.is_empty());
            }
        }
    }

    #[test]
    fn test_unmatched_empty_when_all_tags_known() {
        let documents = vec![doc("1", "T1"), doc("2", "T2")];
        assert!(unmatched(&[A, B], &documents).is_empty());
    }
}
