use serde::{Deserialize, Serialize};

/// Normalize a module path for use as a table key.
///
/// Strips surrounding single or double quotes (as found in `go.mod` require
/// lines for some modules) and lower-cases the result. Two paths with equal
/// normalized forms refer to the same module.
pub fn normalize_module_path(path: &str) -> String {
    let trimmed = path.trim();
    let unquoted = if (trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2)
        || (trimmed.starts_with('\'') && trimmed.ends_with('\'') && trimmed.len() >= 2)
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    unquoted.to_lowercase()
}

/// A fully pinned module reference: normalized path plus a concrete release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleReference {
    pub path: String,
    pub release: String,
}

impl ModuleReference {
    pub fn new(path: &str, release: &str) -> Self {
        Self {
            path: normalize_module_path(path),
            release: release.to_string(),
        }
    }

    /// `path@release` identifier, the unique node key throughout the engine.
    pub fn id(&self) -> String {
        format!("{}@{}", self.path, self.release)
    }
}

impl std::fmt::Display for ModuleReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.path, self.release)
    }
}

/// User-supplied module input, optionally carrying a release.
///
/// Accepts `github.com/gin-gonic/gin`, `github.com/gin-gonic/gin@v1.9.1`,
/// or the same with a leading `http://`/`https://` scheme, which is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInput {
    pub path: String,
    pub release: Option<String>,
}

impl ModuleInput {
    /// Parse a `path[@release]` string. Returns `None` for empty input.
    pub fn parse(input: &str) -> Option<Self> {
        let without_scheme = input
            .trim()
            .strip_prefix("https://")
            .or_else(|| input.trim().strip_prefix("http://"))
            .unwrap_or_else(|| input.trim());

        if without_scheme.is_empty() {
            return None;
        }

        let (raw_path, release) = match without_scheme.split_once('@') {
            Some((p, r)) if !r.is_empty() => (p, Some(r.to_string())),
            Some((p, _)) => (p, None),
            None => (without_scheme, None),
        };

        let path = normalize_module_path(raw_path);
        if path.is_empty() {
            return None;
        }

        Some(Self { path, release })
    }
}

impl std::fmt::Display for ModuleInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.release {
            Some(release) => write!(f, "{}@{}", self.path, release),
            None => write!(f, "{}", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases() {
        assert_eq!(
            normalize_module_path("github.com/Azure/azure-sdk-for-go"),
            "github.com/azure/azure-sdk-for-go"
        );
    }

    #[test]
    fn normalize_strips_quotes() {
        assert_eq!(normalize_module_path("\"github.com/x/y\""), "github.com/x/y");
        assert_eq!(normalize_module_path("'github.com/x/y'"), "github.com/x/y");
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_module_path("  github.com/x/y  "), "github.com/x/y");
    }

    #[test]
    fn normalize_leaves_mismatched_quotes() {
        assert_eq!(normalize_module_path("\"github.com/x/y"), "\"github.com/x/y");
    }

    #[test]
    fn input_without_release() {
        let input = ModuleInput::parse("github.com/gin-gonic/gin").unwrap();
        assert_eq!(input.path, "github.com/gin-gonic/gin");
        assert_eq!(input.release, None);
    }

    #[test]
    fn input_with_release() {
        let input = ModuleInput::parse("github.com/gin-gonic/gin@v1.9.1").unwrap();
        assert_eq!(input.path, "github.com/gin-gonic/gin");
        assert_eq!(input.release.as_deref(), Some("v1.9.1"));
    }

    #[test]
    fn input_strips_scheme_and_case() {
        let input = ModuleInput::parse("https://github.com/Gin-Gonic/Gin@v1.9.1").unwrap();
        assert_eq!(input.path, "github.com/gin-gonic/gin");
        assert_eq!(input.release.as_deref(), Some("v1.9.1"));
    }

    #[test]
    fn input_with_trailing_at_has_no_release() {
        let input = ModuleInput::parse("github.com/x/y@").unwrap();
        assert_eq!(input.path, "github.com/x/y");
        assert_eq!(input.release, None);
    }

    #[test]
    fn empty_input_rejected() {
        assert!(ModuleInput::parse("").is_none());
        assert!(ModuleInput::parse("   ").is_none());
        assert!(ModuleInput::parse("https://").is_none());
    }

    #[test]
    fn reference_id() {
        let r = ModuleReference::new("github.com/X/y", "v1.0.0");
        assert_eq!(r.id(), "github.com/x/y@v1.0.0");
        assert_eq!(r.to_string(), "github.com/x/y@v1.0.0");
    }
}
