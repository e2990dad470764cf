//! Extension-based file classification.
//!
//! Maps a filename to the destination category that decides its upload
//! subdirectory. Only the extension string is inspected; file content is
//! never read.

mod table;

pub use table::{ExtensionTable, EXTENSION_TABLE};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Destination category for an uploaded file.
///
/// Files that match no category are represented by `None` at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Documents,
    Images,
    Media,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Documents, Category::Images, Category::Media];

    /// Lowercase label, e.g. `documents`.
    pub fn name(self) -> &'static str {
        match self {
            Category::Documents => "documents",
            Category::Images => "images",
            Category::Media => "media",
        }
    }

    /// Subdirectory segment appended to upload paths, e.g. `/documents`.
    pub fn subdir(self) -> &'static str {
        match self {
            Category::Documents => "/documents",
            Category::Images => "/images",
            Category::Media => "/media",
        }
    }

    /// Extensions that map to this category, in table order.
    pub fn extensions(self) -> Vec<&'static str> {
        EXTENSION_TABLE
            .entries()
            .iter()
            .filter(|(_, c)| *c == self)
            .map(|(ext, _)| *ext)
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a category label fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Text after the final `.` of `filename`, or `None` when there is no dot or
/// nothing follows it.
pub fn extension_of(filename: &str) -> Option<&str> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

/// Classifies `filename` by its extension.
pub fn classify(filename: &str) -> Option<Category> {
    let category = extension_of(filename).and_then(|ext| EXTENSION_TABLE.lookup(ext));
    tracing::debug!(filename, category = ?category, "classified upload");
    category
}
