//! Upload directory descriptor and category-based path rewriting.
//!
//! An [`UploadDir`] describes where the host is about to store an uploaded
//! file: a filesystem `path` and public `url` that both end with the same
//! `subdir` (normally a date segment such as `/2021/05`). Resolution swaps that
//! trailing segment for the file's category subdirectory.

mod error;
mod resolve;

pub use error::{DirField, ResolveError};
pub use resolve::{resolve, try_resolve};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Paths and URLs describing where an upload will be stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadDir {
    /// Absolute filesystem directory, `basedir` + `subdir`.
    pub path: String,
    /// Public URL of `path`, `baseurl` + `subdir`.
    pub url: String,
    /// Trailing segment shared by `path` and `url`; empty or starts with `/`.
    #[serde(default)]
    pub subdir: String,
    /// Upload root without any subdir. Passed through untouched.
    #[serde(default)]
    pub basedir: String,
    /// Public URL of `basedir`. Passed through untouched.
    #[serde(default)]
    pub baseurl: String,
    /// Upstream error reported by the host. Any non-empty value disables rewriting.
    #[serde(
        default,
        deserialize_with = "deserialize_host_error",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

/// Message used when the host flags an error with a bare `true`.
const UNSPECIFIED_ERROR: &str = "upload dir error";

/// Hosts send `false` (or `null`, or `""`) when nothing failed and a message
/// when something did.
fn deserialize_host_error<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum HostError {
        Flag(bool),
        Message(String),
    }

    Ok(match Option::<HostError>::deserialize(deserializer)? {
        None | Some(HostError::Flag(false)) => None,
        Some(HostError::Flag(true)) => Some(UNSPECIFIED_ERROR.to_string()),
        Some(HostError::Message(msg)) if msg.is_empty() => None,
        Some(HostError::Message(msg)) => Some(msg),
    })
}

impl UploadDir {
    /// Builds a descriptor from the upload roots and a subdir appended to both.
    pub fn new(basedir: impl Into<String>, baseurl: impl Into<String>, subdir: impl Into<String>) -> Self {
        let basedir = basedir.into();
        let baseurl = baseurl.into();
        let subdir = subdir.into();
        Self {
            path: format!("{basedir}{subdir}"),
            url: format!("{baseurl}{subdir}"),
            subdir,
            basedir,
            baseurl,
            error: None,
        }
    }

    /// Builds a descriptor from full `path`/`url` values that already end with
    /// `subdir`. The roots are derived by stripping `subdir` when it is a
    /// suffix, otherwise they equal the full values.
    pub fn from_paths(path: impl Into<String>, url: impl Into<String>, subdir: impl Into<String>) -> Self {
        let path = path.into();
        let url = url.into();
        let subdir = subdir.into();
        let basedir = path.strip_suffix(subdir.as_str()).unwrap_or(&path).to_string();
        let baseurl = url.strip_suffix(subdir.as_str()).unwrap_or(&url).to_string();
        Self {
            path,
            url,
            subdir,
            basedir,
            baseurl,
            error: None,
        }
    }

    /// Marks the descriptor as failed upstream.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// How resolution treats a `subdir` that is not a suffix of `path`/`url`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixPolicy {
    /// Log a warning and leave the descriptor unchanged.
    #[default]
    Lenient,
    /// Report [`ResolveError::SubdirNotSuffix`].
    Strict,
}

impl fmt::Display for SuffixPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuffixPolicy::Lenient => f.write_str("lenient"),
            SuffixPolicy::Strict => f.write_str("strict"),
        }
    }
}

impl SuffixPolicy {
    /// Resolves `dir` for `filename` under this policy.
    pub fn resolve(self, dir: UploadDir, filename: Option<&str>) -> Result<UploadDir, ResolveError> {
        match self {
            SuffixPolicy::Lenient => Ok(resolve(dir, filename)),
            SuffixPolicy::Strict => try_resolve(dir, filename),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_joins_roots_and_subdir() {
        let d = UploadDir::new("/var/uploads", "https://site/up", "/2021/05");
        assert_eq!(d.path, "/var/uploads/2021/05");
        assert_eq!(d.url, "https://site/up/2021/05");
        assert_eq!(d.basedir, "/var/uploads");
        assert_eq!(d.baseurl, "https://site/up");
        assert!(!d.has_error());
    }

    #[test]
    fn from_paths_derives_roots() {
        let d = UploadDir::from_paths("/var/uploads/2021/05", "https://site/up/2021/05", "/2021/05");
        assert_eq!(d, UploadDir::new("/var/uploads", "https://site/up", "/2021/05"));

        let odd = UploadDir::from_paths("/var/uploads", "https://site/up", "/2021/05");
        assert_eq!(odd.basedir, "/var/uploads");
        assert_eq!(odd.baseurl, "https://site/up");
    }

    #[test]
    fn empty_error_is_not_an_error() {
        let d = UploadDir::new("/u", "https://s/u", "").with_error("");
        assert!(!d.has_error());
        let d = d.with_error("disk full");
        assert!(d.has_error());
    }

    #[test]
    fn deserialize_host_json() {
        let json = r#"{"path": "/u/2021/05", "url": "https://s/u/2021/05", "subdir": "/2021/05"}"#;
        let d: UploadDir = serde_json::from_str(json).unwrap();
        assert_eq!(d.subdir, "/2021/05");
        assert_eq!(d.basedir, "");
        assert!(d.error.is_none());
    }

    #[test]
    fn deserialize_host_error_values() {
        let record = |error: &str| {
            format!(
                r#"{{"path": "/var/uploads/2021/05", "url": "https://site/up/2021/05",
                    "subdir": "/2021/05", "basedir": "/var/uploads",
                    "baseurl": "https://site/up", "error": {error}}}"#
            )
        };

        let ok: UploadDir = serde_json::from_str(&record("false")).unwrap();
        assert_eq!(ok, UploadDir::new("/var/uploads", "https://site/up", "/2021/05"));
        assert!(!ok.has_error());

        for no_error in ["null", "\"\""] {
            let d: UploadDir = serde_json::from_str(&record(no_error)).unwrap();
            assert!(d.error.is_none());
        }

        let failed: UploadDir = serde_json::from_str(&record("\"Unable to create directory\"")).unwrap();
        assert_eq!(failed.error.as_deref(), Some("Unable to create directory"));
        assert!(failed.has_error());

        let flagged: UploadDir = serde_json::from_str(&record("true")).unwrap();
        assert!(flagged.has_error());

        assert!(serde_json::from_str::<UploadDir>(&record("42")).is_err());
    }

    #[test]
    fn suffix_policy_display_matches_serde() {
        for policy in [SuffixPolicy::Lenient, SuffixPolicy::Strict] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{policy}\""));
        }
    }

    #[test]
    fn serialize_skips_missing_error() {
        let d = UploadDir::new("/u", "https://s/u", "/2021/05");
        let json = serde_json::to_string(&d).unwrap();
        assert!(!json.contains("error"));
        let back: UploadDir = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn policy_strict_reports_mismatch() {
        let d = UploadDir::from_paths("/var/uploads", "https://site/up", "/2021/05");
        let err = SuffixPolicy::Strict.resolve(d.clone(), Some("a.pdf")).unwrap_err();
        assert!(matches!(err, ResolveError::SubdirNotSuffix { field: DirField::Path, .. }));
        let lenient = SuffixPolicy::Lenient.resolve(d.clone(), Some("a.pdf")).unwrap();
        assert_eq!(lenient, d);
    }
}
