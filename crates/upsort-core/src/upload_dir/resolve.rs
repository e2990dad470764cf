//! Category-based rewrite of an [`UploadDir`].

use super::{DirField, ResolveError, UploadDir};
use crate::category::{classify, Category};

/// Category the upload should be moved under, or `None` when the descriptor
/// must be left alone (upstream error, no filename, unclassified file).
fn target_category(dir: &UploadDir, filename: Option<&str>) -> Option<Category> {
    if dir.has_error() {
        tracing::debug!(error = ?dir.error, "upload dir carries an error; not rewriting");
        return None;
    }
    let filename = filename?;
    classify(filename)
}

fn strip_subdir<'a>(value: &'a str, subdir: &str, field: DirField) -> Result<&'a str, ResolveError> {
    if subdir.is_empty() {
        return Ok(value);
    }
    value
        .strip_suffix(subdir)
        .ok_or_else(|| ResolveError::SubdirNotSuffix {
            field,
            subdir: subdir.to_string(),
            value: value.to_string(),
        })
}

fn rewrite(dir: &UploadDir, category: Category) -> Result<UploadDir, ResolveError> {
    let path = strip_subdir(&dir.path, &dir.subdir, DirField::Path)?;
    let url = strip_subdir(&dir.url, &dir.subdir, DirField::Url)?;
    let subdir = category.subdir();
    Ok(UploadDir {
        path: format!("{path}{subdir}"),
        url: format!("{url}{subdir}"),
        subdir: subdir.to_string(),
        ..dir.clone()
    })
}

/// Moves the upload under its category subdirectory.
///
/// Returns `dir` unchanged when it carries an error, when `filename` is absent
/// or unclassified, or when `subdir` does not end both `path` and `url`. The
/// last case is logged at `warn`.
pub fn resolve(dir: UploadDir, filename: Option<&str>) -> UploadDir {
    let Some(category) = target_category(&dir, filename) else {
        return dir;
    };
    match rewrite(&dir, category) {
        Ok(resolved) => {
            tracing::debug!(path = %resolved.path, %category, "rewrote upload dir");
            resolved
        }
        Err(err) => {
            tracing::warn!(%err, "leaving upload dir unchanged");
            dir
        }
    }
}

/// Like [`resolve`], but a `subdir` that is not a suffix of `path`/`url` is an error.
pub fn try_resolve(dir: UploadDir, filename: Option<&str>) -> Result<UploadDir, ResolveError> {
    match target_category(&dir, filename) {
        Some(category) => rewrite(&dir, category),
        None => Ok(dir),
    }
}
