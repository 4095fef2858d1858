//! File attachment discovery in fetched records.
//!
//! Partner forms store attachments under arbitrary field keys, so an
//! attachment is recognized by shape: any object inside an array-valued
//! record field that has both a name-like and a URL-like string property.
//! The walk is pure and deterministic for a given input order.

mod category;

pub use category::{FileCategory, extension_of};

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::fetch::NamedResult;

/// Properties accepted as the attachment's display name, in priority order.
const NAME_KEYS: [&str; 4] = ["name", "fileName", "file_name", "filename"];

/// Properties accepted as the attachment's remote URL, in priority order.
const URL_KEYS: [&str; 4] = ["url", "fileUrl", "file_url", "src"];

/// Properties accepted as the attachment's remote id, in priority order.
const ID_KEYS: [&str; 3] = ["id", "fileId", "file_id"];

/// A discovered, classified remote attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    /// Record field the attachment was found under.
    pub field_key: String,
    /// Remote attachment id, when the platform provided one.
    pub remote_id: Option<String>,
    /// Display name; also the download file name.
    pub display_name: String,
    /// Remote URL (pre-signed or public).
    pub remote_url: String,
    /// Lowercase extension with dot, or empty.
    pub extension: String,
    /// Category derived from the extension.
    pub category: FileCategory,
}

impl FileReference {
    /// Returns the uniqueness key: the remote id when present, else the URL.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        match &self.remote_id {
            Some(id) => format!("id:{id}"),
            None => format!("url:{}", self.remote_url),
        }
    }

    /// Recognizes an attachment object by shape.
    ///
    /// Returns `None` unless the value is an object with a non-empty name
    /// and URL.
    #[must_use]
    pub fn from_attachment(field_key: &str, value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let display_name = first_string(object, &NAME_KEYS)?;
        let remote_url = first_string(object, &URL_KEYS)?;
        let remote_id = ID_KEYS.iter().find_map(|key| match object.get(*key) {
            Some(Value::String(id)) if !id.trim().is_empty() => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        });
        let extension = extension_of(&display_name);
        let category = FileCategory::from_extension(&extension);

        Some(Self {
            field_key: field_key.to_string(),
            remote_id,
            display_name,
            remote_url,
            extension,
            category,
        })
    }
}

fn first_string(object: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        object
            .get(*key)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string)
    })
}

/// Collects deduplicated attachments from every successful result.
///
/// Failed results are skipped. The first occurrence of a dedup key wins;
/// later duplicates are dropped silently.
#[must_use]
pub fn collect_files(results: &[NamedResult]) -> Vec<FileReference> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    let records = results
        .iter()
        .flat_map(NamedResult::records)
        .filter_map(Value::as_object);
    for record in records {
        for (field_key, value) in record {
            let Some(items) = value.as_array() else {
                continue;
            };
            for item in items {
                let Some(file) = FileReference::from_attachment(field_key, item) else {
                    continue;
                };
                if seen.insert(file.dedup_key()) {
                    files.push(file);
                } else {
                    debug!(name = %file.display_name, key = %file.dedup_key(), "duplicate attachment skipped");
                }
            }
        }
    }

    let stats = category_counts(&files);
    info!(files = files.len(), categories = %stats, "collected attachments");
    files
}

/// Per-category attachment counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStats(BTreeMap<FileCategory, usize>);

impl CategoryStats {
    /// Returns the count for one category.
    #[must_use]
    pub fn get(&self, category: FileCategory) -> usize {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Iterates non-zero counts in category order.
    pub fn iter(&self) -> impl Iterator<Item = (FileCategory, usize)> + '_ {
        self.0.iter().map(|(category, count)| (*category, *count))
    }
}

impl std::fmt::Display for CategoryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(category, count)| format!("{category}={count}"))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// Counts attachments per category.
#[must_use]
pub fn category_counts(files: &[FileReference]) -> CategoryStats {
    let mut counts = BTreeMap::new();
    for file in files {
        *counts.entry(file.category).or_insert(0) += 1;
    }
    CategoryStats(counts)
}
