use serde::{Deserialize, Serialize};

/// One `require` entry from a module's `go.mod` manifest.
///
/// `release` is absent when the manifest line carried no version column; the
/// resolution engine substitutes the literal `"latest"` sentinel for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub path: String,
    pub release: Option<String>,
}

impl Requirement {
    pub fn new(path: impl Into<String>, release: Option<String>) -> Self {
        Self {
            path: path.into(),
            release,
        }
    }

    /// The release to feed into resolution: the declared one, or `"latest"`.
    pub fn release_or_latest(&self) -> &str {
        self.release.as_deref().unwrap_or("latest")
    }
}
