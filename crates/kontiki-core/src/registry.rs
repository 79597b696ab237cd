//! Fixed catalogue of document categories a production site keeps on file.
//!
//! Order is display order and never changes at runtime.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::error::RegistryError;
use crate::models::{CategoryGroup, DocumentCategory};

use CategoryGroup::{Compliance, Internal, Training};

#[rustfmt::skip]
const BUILTIN_CATEGORIES: &[DocumentCategory] = &[
    // Compliance Uploads
    DocumentCategory::new("site-registration", "SITE_REGISTRATION", "Site Registration Certificate", Compliance, true),
    DocumentCategory::new("environmental-permit", "ENVIRONMENTAL_PERMIT", "Environmental Permit", Compliance, true),
    DocumentCategory::new("feedstock-declaration", "FEEDSTOCK_DECLARATION", "Feedstock Declaration Form", Compliance, true),
    DocumentCategory::new("biochar-application-declaration", "BIOCHAR_APPLICATION_DECLARATION", "Biochar Application Declaration", Compliance, true),
    DocumentCategory::new("lab-analysis-report", "LAB_ANALYSIS_REPORT", "Laboratory Analysis Report", Compliance, true),
    DocumentCategory::new("site-inspection-report", "SITE_INSPECTION_REPORT", "Site Inspection Report", Compliance, true),
    // Training Documentation
    DocumentCategory::new("training-video", "TRAINING_VIDEO", "Training Video", Training, true),
    DocumentCategory::new("operator-training-record", "OPERATOR_TRAINING_RECORD", "Operator Training Record", Training, true),
    DocumentCategory::new("health-safety-briefing", "HEALTH_SAFETY_BRIEFING", "Health & Safety Briefing", Training, true),
    DocumentCategory::new("kiln-operation-manual", "KILN_OPERATION_MANUAL", "Kiln Operation Manual", Training, false),
    // Internal Uploads
    DocumentCategory::new("site-photos", "SITE_PHOTOS", "Site Photos", Internal, false),
    DocumentCategory::new("equipment-maintenance-log", "EQUIPMENT_MAINTENANCE_LOG", "Equipment Maintenance Log", Internal, false),
    DocumentCategory::new("internal-audit-notes", "INTERNAL_AUDIT_NOTES", "Internal Audit Notes", Internal, false),
    DocumentCategory::new("other-internal", "OTHER_INTERNAL", "Other Internal Documents", Internal, false),
];

/// Read-only set of categories with unique ids and tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: Cow<'static, [DocumentCategory]>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CategoryRegistry {
    /// The catalogue shipped with the console.
    pub fn builtin() -> Self {
        Self {
            categories: Cow::Borrowed(BUILTIN_CATEGORIES),
        }
    }

    /// Build a registry from an explicit list, rejecting duplicate ids or tags.
    pub fn new(categories: Vec<DocumentCategory>) -> Result<Self, RegistryError> {
        validate_unique(&categories)?;
        Ok(Self {
            categories: Cow::Owned(categories),
        })
    }

    pub fn all_categories(&self) -> &[DocumentCategory] {
        &self.categories
    }

    pub fn by_tag(&self, tag: &str) -> Option<&DocumentCategory> {
        self.categories.iter().find(|c| c.document_type_tag == tag)
    }

    pub fn by_id(&self, id: &str) -> Option<&DocumentCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Categories of one group, in display order.
    pub fn in_group(&self, group: CategoryGroup) -> Vec<DocumentCategory> {
        self.categories
            .iter()
            .filter(|c| c.group == group)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn validate_unique(categories: &[DocumentCategory]) -> Result<(), RegistryError> {
    let mut ids = HashSet::new();
    let mut tags = HashSet::new();
    for category in categories {
        if !ids.insert(category.id) {
            return Err(RegistryError::DuplicateId(category.id.to_string()));
        }
        if !tags.insert(category.document_type_tag) {
            return Err(RegistryError::DuplicateTag(
                category.document_type_tag.to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue_is_unique() {
        let registry = CategoryRegistry::builtin();
        assert!(validate_unique(registry.all_categories()).is_ok());
        assert_eq!(registry.len(), 14);
    }

    #[test]
    fn test_builtin_catalogue_covers_every_group() {
        let registry = CategoryRegistry::builtin();
        for group in CategoryGroup::ALL {
            assert!(!registry.in_group(group).is_empty(), "{group} is empty");
        }
    }

    #[test]
    fn test_order_is_stable_and_grouped() {
        let registry = CategoryRegistry::builtin();
        let first: Vec<_> = registry.all_categories().iter().map(|c| c.id).collect();
        let second: Vec<_> = registry.all_categories().iter().map(|c| c.id).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "site-registration");

        let groups: Vec<_> = registry.all_categories().iter().map(|c| c.group).collect();
        let mut sorted = groups.clone();
        sorted.dedup();
        assert_eq!(sorted, CategoryGroup::ALL.to_vec());
    }

    #[test]
    fn test_lookup_by_tag_and_id() {
        let registry = CategoryRegistry::builtin();
        let video = registry.by_tag("TRAINING_VIDEO").unwrap();
        assert_eq!(video.id, "training-video");
        assert_eq!(video.group, CategoryGroup::Training);
        assert_eq!(registry.by_id("training-video"), Some(video));
        assert!(registry.by_tag("NOT_A_TAG").is_none());
        assert!(registry.by_id("not-a-category").is_none());
    }

    #[test]
    fn test_new_rejects_duplicate_tag() {
        let err = CategoryRegistry::new(vec![
            DocumentCategory::new("a", "T1", "A", Compliance, true),
            DocumentCategory::new("b", "T1", "B", Compliance, false),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTag("T1".to_string()));
    }

    #[test]
    fn test_new_rejects_duplicate_id() {
        let err = CategoryRegistry::new(vec![
            DocumentCategory::new("a", "T1", "A", Compliance, true),
            DocumentCategory::new("a", "T2", "B", Training, false),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId("a".to_string()));
    }
}
