//! Errors surfaced by strict path resolution.

use std::fmt;

/// Which string field of an [`super::UploadDir`] failed a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirField {
    Path,
    Url,
}

impl fmt::Display for DirField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirField::Path => f.write_str("path"),
            DirField::Url => f.write_str("url"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The descriptor's `subdir` does not end its `path` or `url`, so it cannot
    /// be stripped without cutting into an unrelated segment.
    #[error("subdir {subdir:?} is not a suffix of {field} {value:?}")]
    SubdirNotSuffix {
        field: DirField,
        subdir: String,
        value: String,
    },
}
