//! Upload lifecycle: activate path rewriting for exactly one upload.
//!
//! The host calls [`UploadSorter::before_store`] when a file arrives. That
//! returns an [`ActiveUpload`] handle which is the only way to reach the
//! path-rewrite entry point ([`ActiveUpload::upload_dir`]). Once the file is
//! written the host hands the handle back through
//! [`ActiveUpload::after_store`], which consumes it, so rewriting cannot leak
//! into later, unrelated path lookups.

use std::collections::HashMap;

use crate::config::SorterConfig;
use crate::upload_dir::{ResolveError, SuffixPolicy, UploadDir};

/// Form field the upload form posts the original filename in.
pub const DECLARED_NAME_FIELD: &str = "name";

/// Request context that may carry the uploaded file's declared name.
///
/// The name is client-supplied and untrusted; it is only ever used for
/// extension matching.
pub trait UploadRequest {
    fn declared_name(&self) -> Option<&str>;
}

/// Posted form fields, keyed by field name.
impl UploadRequest for HashMap<String, String> {
    fn declared_name(&self) -> Option<&str> {
        self.get(DECLARED_NAME_FIELD).map(String::as_str)
    }
}

impl UploadRequest for Option<&str> {
    fn declared_name(&self) -> Option<&str> {
        *self
    }
}

impl UploadRequest for Option<String> {
    fn declared_name(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// A request context that is just the declared filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredName(pub String);

impl UploadRequest for DeclaredName {
    fn declared_name(&self) -> Option<&str> {
        Some(&self.0)
    }
}

/// Entry point for hosts: hands out per-upload rewrite handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadSorter {
    policy: SuffixPolicy,
}

impl UploadSorter {
    pub fn new(policy: SuffixPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(cfg: &SorterConfig) -> Self {
        Self::new(cfg.suffix_policy)
    }

    pub fn policy(&self) -> SuffixPolicy {
        self.policy
    }

    /// Before-store hook. Activates rewriting for the upload described by
    /// `request` and returns `file` unchanged alongside the handle.
    pub fn before_store<'r, R, F>(&self, request: &'r R, file: F) -> (ActiveUpload<'r, R>, F)
    where
        R: UploadRequest + ?Sized,
    {
        tracing::debug!(name = ?request.declared_name(), "upload dir rewrite active");
        let active = ActiveUpload {
            request,
            policy: self.policy,
        };
        (active, file)
    }

    /// Runs `store` between the before-store and after-store hooks.
    pub fn scoped<R, F, T>(&self, request: &R, file: F, store: impl FnOnce(&ActiveUpload<'_, R>, F) -> T) -> T
    where
        R: UploadRequest + ?Sized,
    {
        let (active, file) = self.before_store(request, file);
        let info = store(&active, file);
        active.after_store(info)
    }
}

/// Rewriting is active for one upload while this handle is alive.
#[derive(Debug)]
pub struct ActiveUpload<'r, R: ?Sized> {
    request: &'r R,
    policy: SuffixPolicy,
}

impl<R: UploadRequest + ?Sized> ActiveUpload<'_, R> {
    pub fn declared_name(&self) -> Option<&str> {
        self.request.declared_name()
    }

    /// Path-rewrite entry point: the host passes its default upload dir and
    /// stores the file wherever the returned descriptor points.
    ///
    /// Only fails under [`SuffixPolicy::Strict`].
    pub fn upload_dir(&self, dir: UploadDir) -> Result<UploadDir, ResolveError> {
        self.policy.resolve(dir, self.declared_name())
    }

    /// After-store hook. Deactivates rewriting and returns `info` unchanged.
    pub fn after_store<T>(self, info: T) -> T {
        tracing::debug!(name = ?self.declared_name(), "upload dir rewrite released");
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated() -> UploadDir {
        UploadDir::new("/var/uploads", "https://site/up", "/2021/05")
    }

    #[test]
    fn form_fields_read_name() {
        let mut form: HashMap<String, String> = HashMap::new();
        assert_eq!(form.declared_name(), None);
        form.insert("name".to_string(), "scan.TIF".to_string());
        form.insert("action".to_string(), "upload-attachment".to_string());
        assert_eq!(form.declared_name(), Some("scan.TIF"));
    }

    #[test]
    fn option_and_newtype_requests() {
        assert_eq!(Some("a.pdf").declared_name(), Some("a.pdf"));
        assert_eq!(None::<&str>.declared_name(), None);
        assert_eq!(Some("b.png".to_string()).declared_name(), Some("b.png"));
        assert_eq!(DeclaredName("c.mp3".into()).declared_name(), Some("c.mp3"));
    }

    #[test]
    fn before_store_returns_file_unchanged() {
        let sorter = UploadSorter::default();
        let request = DeclaredName("invoice.pdf".into());
        let file = vec![1u8, 2, 3];
        let (active, file) = sorter.before_store(&request, file);
        assert_eq!(file, vec![1, 2, 3]);
        assert_eq!(active.declared_name(), Some("invoice.pdf"));
        assert_eq!(active.after_store("stored"), "stored");
    }

    #[test]
    fn active_upload_rewrites_dir() {
        let sorter = UploadSorter::new(SuffixPolicy::Lenient);
        let request = DeclaredName("invoice.pdf".into());
        let (active, ()) = sorter.before_store(&request, ());
        let out = active.upload_dir(dated()).unwrap();
        assert_eq!(out.path, "/var/uploads/documents");
        active.after_store(());
    }

    #[test]
    fn missing_name_leaves_dir() {
        let sorter = UploadSorter::default();
        let form: HashMap<String, String> = HashMap::new();
        let (active, ()) = sorter.before_store(&form, ());
        assert_eq!(active.upload_dir(dated()).unwrap(), dated());
    }

    #[test]
    fn strict_policy_surfaces_suffix_error() {
        let sorter = UploadSorter::new(SuffixPolicy::Strict);
        let request = Some("a.png");
        let (active, ()) = sorter.before_store(&request, ());
        let bad = UploadDir::from_paths("/var/uploads", "https://site/up", "/2021/05");
        assert!(active.upload_dir(bad).is_err());
    }

    #[test]
    fn scoped_brackets_one_upload() {
        let sorter = UploadSorter::default();
        let request = DeclaredName("clip.mp4".into());
        let stored = sorter.scoped(&request, "tmp-upload", |active, file| {
            let dir = active.upload_dir(dated()).unwrap();
            format!("{}/{}", dir.path, file)
        });
        assert_eq!(stored, "/var/uploads/media/tmp-upload");
    }

    #[test]
    fn from_config_uses_policy() {
        let cfg = SorterConfig {
            suffix_policy: SuffixPolicy::Strict,
            ..SorterConfig::default()
        };
        assert_eq!(UploadSorter::from_config(&cfg).policy(), SuffixPolicy::Strict);
    }
}
