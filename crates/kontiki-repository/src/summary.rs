//! Per-group completeness of a site's document folders.

use kontiki_core::{CategoryGroup, DocumentCategory, FolderView};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub group: CategoryGroup,
    pub display_name: &'static str,
    pub categories: usize,
    pub required: usize,
    pub files: usize,
    /// Required categories with no files on record.
    pub missing: Vec<DocumentCategory>,
}

impl GroupSummary {
    pub fn satisfied(&self) -> usize {
        self.required - self.missing.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub site_id: Option<String>,
    pub groups: Vec<GroupSummary>,
}

impl ComplianceSummary {
    /// Summarize folders group by group. Groups with no categories are left out.
    pub fn from_folders(site_id: Option<String>, folders: &[FolderView]) -> Self {
        let groups = CategoryGroup::ALL
            .iter()
            .filter_map(|&group| {
                let in_group: Vec<&FolderView> = folders
                    .iter()
                    .filter(|folder| folder.category.group == group)
                    .collect();
                if in_group.is_empty() {
                    return None;
                }

                Some(GroupSummary {
                    group,
                    display_name: group.display_name(),
                    categories: in_group.len(),
                    required: in_group.iter().filter(|f| f.category.required).count(),
                    files: in_group.iter().map(|f| f.files.len()).sum(),
                    missing: in_group
                        .iter()
                        .filter(|f| f.category.required && f.is_empty())
                        .map(|f| f.category)
                        .collect(),
                })
            })
            .collect();

        Self { site_id, groups }
    }

    pub fn is_complete(&self) -> bool {
        self.groups.iter().all(GroupSummary::is_complete)
    }

    pub fn missing(&self) -> impl Iterator<Item = &DocumentCategory> {
        self.groups.iter().flat_map(|group| group.missing.iter())
    }

    pub fn total_files(&self) -> usize {
        self.groups.iter().map(|group| group.files).sum()
    }
}
