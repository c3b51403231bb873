//! Line-based `go.mod` parsing for requirement discovery.
//!
//! The engine only needs the `require` entries; `module`, `go`, `replace`,
//! and `exclude` directives do not affect which releases the proxy serves
//! and are ignored.

use modgraph_core::{normalize_module_path, Requirement};

/// Extract the `require` entries from a `go.mod` manifest.
///
/// Handles both block form (`require ( ... )`) and single-line form
/// (`require path v1.2.3`). Dependency paths are normalized on the way out.
/// Blank lines and comment-only lines are skipped; a line with no version
/// column yields a requirement with no release.
pub fn parse_requirements(manifest: &str) -> Vec<Requirement> {
    let mut requirements = Vec::new();
    let mut in_require_block = false;

    for line in manifest.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if trimmed.starts_with("require (") {
            in_require_block = true;
            continue;
        }
        if in_require_block && trimmed == ")" {
            in_require_block = false;
            continue;
        }

        let entry = if in_require_block {
            Some(trimmed)
        } else {
            trimmed
                .strip_prefix("require ")
                .filter(|rest| !rest.contains('('))
        };

        if let Some(entry) = entry {
            let mut columns = entry.split_whitespace();
            let Some(path) = columns.next() else { continue };
            let release = columns
                .next()
                .filter(|col| !col.starts_with("//"))
                .map(str::to_string);
            requirements.push(Requirement::new(normalize_module_path(path), release));
        }
    }

    requirements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_form() {
        let manifest = r#"
module github.com/example/app

go 1.21

require (
    github.com/gin-gonic/gin v1.9.1
    golang.org/x/text v0.14.0 // indirect
)
"#;
        let reqs = parse_requirements(manifest);
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].path, "github.com/gin-gonic/gin");
        assert_eq!(reqs[0].release.as_deref(), Some("v1.9.1"));
        assert_eq!(reqs[1].path, "golang.org/x/text");
        assert_eq!(reqs[1].release.as_deref(), Some("v0.14.0"));
    }

    #[test]
    fn single_line_form() {
        let manifest = "module github.com/example/app\n\nrequire github.com/stretchr/testify v1.8.4\n";
        let reqs = parse_requirements(manifest);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].path, "github.com/stretchr/testify");
        assert_eq!(reqs[0].release.as_deref(), Some("v1.8.4"));
    }

    #[test]
    fn paths_normalized() {
        let manifest = "require (\n    github.com/Azure/go-autorest v14.2.0+incompatible\n)\n";
        let reqs = parse_requirements(manifest);
        assert_eq!(reqs[0].path, "github.com/azure/go-autorest");
    }

    #[test]
    fn missing_release_column() {
        let manifest = "require (\n    github.com/x/y\n)\n";
        let reqs = parse_requirements(manifest);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].release, None);
        assert_eq!(reqs[0].release_or_latest(), "latest");
    }

    #[test]
    fn comment_only_release_column_ignored() {
        let manifest = "require (\n    github.com/x/y // indirect\n)\n";
        let reqs = parse_requirements(manifest);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].release, None);
    }

    #[test]
    fn blank_and_comment_lines_skipped() {
        let manifest = "require (\n\n    // grouped below\n    github.com/x/y v1.0.0\n)\n";
        let reqs = parse_requirements(manifest);
        assert_eq!(reqs.len(), 1);
    }

    #[test]
    fn no_requires() {
        let manifest = "module github.com/example/app\n\ngo 1.21\n";
        assert!(parse_requirements(manifest).is_empty());
    }

    #[test]
    fn multiple_blocks_and_lines() {
        let manifest = r#"
module m

require github.com/a/a v1.0.0

require (
    github.com/b/b v2.0.0
)

require (
    github.com/c/c v3.0.0
)
"#;
        let reqs = parse_requirements(manifest);
        let paths: Vec<&str> = reqs.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["github.com/a/a", "github.com/b/b", "github.com/c/c"]);
    }
}
