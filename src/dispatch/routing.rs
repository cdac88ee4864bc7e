//! Routing metadata derived from a file path.
//!
//! Vault paths start with a repository folder that carries no meaning for
//! the downstream service, so it is dropped. The first folder after it is
//! the default namespace.

use crate::host::VaultFile;

/// Directory of `file_path` without the leading repository segment.
///
/// Strips the trailing file name and then exactly one leading segment.
/// An empty result is valid.
///
/// ```
/// use relay::dispatch::derive_dir_path;
///
/// assert_eq!(derive_dir_path("vault/nlp/classA/notes.md"), "nlp/classA");
/// assert_eq!(derive_dir_path("vault/notes.md"), "");
/// ```
#[must_use]
pub fn derive_dir_path(file_path: &str) -> &str {
    let parent = file_path.rsplit_once('/').map_or("", |(dir, _)| dir);
    parent.split_once('/').map_or("", |(_, rest)| rest)
}

/// First `/`-delimited segment of `dir_path`, or all of it.
#[must_use]
pub fn default_namespace(dir_path: &str) -> &str {
    dir_path.split_once('/').map_or(dir_path, |(first, _)| first)
}

/// Routing metadata for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub file_path: String,
    pub dir_path: String,
    pub default_namespace: String,
}

impl Route {
    #[must_use]
    pub fn for_file(file: &VaultFile) -> Self {
        let dir_path = derive_dir_path(file.path());
        Self {
            file_path: file.path().to_string(),
            dir_path: dir_path.to_string(),
            default_namespace: default_namespace(dir_path).to_string(),
        }
    }
}
