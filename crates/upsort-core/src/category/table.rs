//! Static extension-to-category lookup table.

use super::Category;

const ENTRIES: &[(&str, Category)] = &[
    ("pdf", Category::Documents),
    ("doc", Category::Documents),
    ("docx", Category::Documents),
    ("pages", Category::Documents),
    ("txt", Category::Documents),
    ("xls", Category::Documents),
    ("xlsx", Category::Documents),
    ("csv", Category::Documents),
    ("xml", Category::Documents),
    ("json", Category::Documents),
    ("jpg", Category::Images),
    ("jpeg", Category::Images),
    ("png", Category::Images),
    ("gif", Category::Images),
    ("tif", Category::Images),
    ("tiff", Category::Images),
    ("svg", Category::Images),
    ("webp", Category::Images),
    ("mp3", Category::Media),
    ("mp4", Category::Media),
    ("mov", Category::Media),
];

/// Read-only mapping from lowercase extension to [`Category`].
///
/// Keys are stored lowercase; [`ExtensionTable::lookup`] compares ASCII case-insensitively.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionTable {
    entries: &'static [(&'static str, Category)],
}

/// The fixed table used by [`super::classify`].
pub static EXTENSION_TABLE: ExtensionTable = ExtensionTable { entries: ENTRIES };

impl ExtensionTable {
    /// Category for `ext` (without the leading dot), case-insensitive.
    pub fn lookup(&self, ext: &str) -> Option<Category> {
        if ext.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(ext))
            .map(|&(_, category)| category)
    }

    /// All `(extension, category)` pairs in table order.
    pub fn entries(&self) -> &'static [(&'static str, Category)] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
