use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Person who uploaded a document, as reported by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedBy {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UploadedBy {
    /// "First Last" with missing or blank parts left out. `None` when both are blank.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// A document as returned by `GET /sites/{siteId}/documents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "documentType")]
    pub document_type_tag: String,
    pub file_name: String,
    pub file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<u64>,
    pub uploaded_at_utc: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<UploadedBy>,
}

impl RemoteDocument {
    pub fn uploaded_by_name(&self) -> Option<String> {
        self.uploaded_by.as_ref().and_then(UploadedBy::full_name)
    }
}

/// The full, unfiltered document list last fetched for one site.
///
/// Replaced wholesale on every reload; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySnapshot {
    pub site_id: String,
    pub documents: Vec<RemoteDocument>,
    pub fetched_at: DateTime<Utc>,
}

impl RepositorySnapshot {
    pub fn new(site_id: impl Into<String>, documents: Vec<RemoteDocument>) -> Self {
        Self {
            site_id: site_id.into(),
            documents,
            fetched_at: Utc::now(),
        }
    }
}

/// Backend ids arrive as JSON strings or integers depending on the endpoint.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
