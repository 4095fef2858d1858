//! Extension-based attachment categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse file type, decided purely by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Pdf,
    Word,
    Excel,
    PowerPoint,
    Image,
    Zip,
    Unknown,
}

/// Extension table, lowercase with leading dot.
const EXTENSION_TABLE: &[(&str, FileCategory)] = &[
    (".pdf", FileCategory::Pdf),
    (".doc", FileCategory::Word),
    (".docx", FileCategory::Word),
    (".xls", FileCategory::Excel),
    (".xlsx", FileCategory::Excel),
    (".ppt", FileCategory::PowerPoint),
    (".pptx", FileCategory::PowerPoint),
    (".png", FileCategory::Image),
    (".jpg", FileCategory::Image),
    (".jpeg", FileCategory::Image),
    (".gif", FileCategory::Image),
    (".zip", FileCategory::Zip),
    (".rar", FileCategory::Zip),
    (".7z", FileCategory::Zip),
];

impl FileCategory {
    /// All categories, in reporting order.
    pub const ALL: [Self; 7] = [
        Self::Pdf,
        Self::Word,
        Self::Excel,
        Self::PowerPoint,
        Self::Image,
        Self::Zip,
        Self::Unknown,
    ];

    /// Classifies an extension, with or without the leading dot.
    ///
    /// Case-insensitive and total: anything unmapped (including the empty
    /// string) is [`FileCategory::Unknown`].
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        let trimmed = extension.trim();
        let normalized = if trimmed.starts_with('.') {
            trimmed.to_lowercase()
        } else {
            format!(".{}", trimmed.to_lowercase())
        };
        EXTENSION_TABLE
            .iter()
            .find(|(ext, _)| *ext == normalized)
            .map_or(Self::Unknown, |(_, category)| *category)
    }

    /// Classifies a file name by its extension.
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        Self::from_extension(&extension_of(name))
    }

    /// Returns the stable lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Excel => "excel",
            Self::PowerPoint => "powerpoint",
            Self::Image => "image",
            Self::Zip => "zip",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the lowercase extension of `name` including the dot, or an empty
/// string.
///
/// Follows the usual rules: the last dot of the final path component, and a
/// leading dot alone (`.env`) is not an extension.
#[must_use]
pub fn extension_of(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rfind('.') {
        Some(0) | None => String::new(),
        Some(index) => base[index..].to_lowercase(),
    }
}
