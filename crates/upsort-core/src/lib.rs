//! Sorts uploads into category subdirectories by file extension.
//!
//! [`category::classify`] maps a filename to a [`category::Category`];
//! [`upload_dir::resolve`] rewrites a host's upload dir accordingly;
//! [`hooks::UploadSorter`] brackets one upload so the rewrite only applies
//! while that file is being stored.

pub mod config;
pub mod logging;

pub mod category;
pub mod hooks;
pub mod upload_dir;

pub use category::{classify, Category};
pub use hooks::{ActiveUpload, DeclaredName, UploadRequest, UploadSorter};
pub use upload_dir::{resolve, try_resolve, ResolveError, SuffixPolicy, UploadDir};
