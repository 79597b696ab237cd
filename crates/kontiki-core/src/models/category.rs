use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Compliance tier a document category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryGroup {
    Compliance,
    Training,
    Internal,
}

impl CategoryGroup {
    /// All groups in display order.
    pub const ALL: [CategoryGroup; 3] = [
        CategoryGroup::Compliance,
        CategoryGroup::Training,
        CategoryGroup::Internal,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryGroup::Compliance => "Compliance Uploads",
            CategoryGroup::Training => "Training Documentation",
            CategoryGroup::Internal => "Internal Uploads",
        }
    }
}

impl FromStr for CategoryGroup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compliance" => Ok(CategoryGroup::Compliance),
            "training" => Ok(CategoryGroup::Training),
            "internal" => Ok(CategoryGroup::Internal),
            _ => Err(anyhow::anyhow!("Invalid category group: {}", s)),
        }
    }
}

impl Display for CategoryGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CategoryGroup::Compliance => write!(f, "compliance"),
            CategoryGroup::Training => write!(f, "training"),
            CategoryGroup::Internal => write!(f, "internal"),
        }
    }
}

/// A required (or optional) kind of document a site keeps on file.
///
/// `document_type_tag` is the value the document store attaches to each upload;
/// it is unique within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentCategory {
    pub id: &'static str,
    pub document_type_tag: &'static str,
    pub display_name: &'static str,
    pub group: CategoryGroup,
    /// Informational only; uploads are never gated on it.
    pub required: bool,
}

impl DocumentCategory {
    pub const fn new(
        id: &'static str,
        document_type_tag: &'static str,
        display_name: &'static str,
        group: CategoryGroup,
        required: bool,
    ) -> Self {
        Self {
            id,
            document_type_tag,
            display_name,
            group,
            required,
        }
    }
}
