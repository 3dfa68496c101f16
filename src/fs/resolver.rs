use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Maps request paths onto the file system by plain concatenation.
///
/// There is no normalization: `..` segments and encoded characters pass
/// straight through, so a request can address files outside `root`.
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    root: PathBuf,
}

impl ResourceResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, request_path: &str) -> PathBuf {
        let mut joined = OsString::from(self.root.as_os_str());
        joined.push(request_path);
        PathBuf::from(joined)
    }
}
