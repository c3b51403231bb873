//! Dependency tree construction from resolution tables.

use std::collections::HashSet;

use modgraph_core::normalize_module_path;
use serde::Serialize;

use crate::resolver::Resolution;

/// Release sentinel for a path with no selection. Should not occur for any
/// path reachable from a successfully resolved root.
pub const UNKNOWN_RELEASE: &str = "unknown";

/// A node in the materialized dependency tree.
///
/// `id` is `path@release`. The same id may appear under multiple parents
/// (once as an interior node, thereafter as a childless repeat); the graph
/// flattener collapses those into one node. Never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    pub id: String,
    pub path: String,
    pub release: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    /// Total node count, repeats included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(DependencyNode::count).sum::<usize>()
    }

    /// Render the tree with box-drawing connectors, one node per line.
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.label());
        output.push('\n');
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.render_subtree(&mut output, "", i == count - 1);
        }
        output
    }

    fn render_subtree(&self, output: &mut String, prefix: &str, is_last: bool) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{prefix}{connector}{}\n", self.label()));

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.render_subtree(output, &child_prefix, i == count - 1);
        }
    }

    fn label(&self) -> String {
        match self.size {
            Some(bytes) => format!(
                "{}@{} ({})",
                self.path,
                self.release,
                modgraph_util::fmt::format_bytes(bytes)
            ),
            None => format!("{}@{}", self.path, self.release),
        }
    }
}

/// Materialize the dependency tree for a resolution, starting at its root.
///
/// Recursion is bounded two ways: an id already seen anywhere in the walk
/// returns a childless repeat (manifest cycles), and `depth > max_depth`
/// cuts pathological chains. Requirements whose target was never selected
/// (an upstream fetch failure) are omitted.
pub fn build_tree(resolution: &Resolution, max_depth: usize) -> DependencyNode {
    let mut visited = HashSet::new();
    build_node(resolution.root(), resolution, 0, max_depth, &mut visited)
}

fn build_node(
    path: &str,
    resolution: &Resolution,
    depth: usize,
    max_depth: usize,
    visited: &mut HashSet<String>,
) -> DependencyNode {
    let release = resolution
        .selected_release(path)
        .unwrap_or(UNKNOWN_RELEASE)
        .to_string();
    let id = format!("{path}@{release}");
    let size = resolution.size_of(path);

    if visited.contains(&id) || depth > max_depth {
        return DependencyNode {
            id,
            path: path.to_string(),
            release,
            size,
            children: Vec::new(),
        };
    }
    visited.insert(id.clone());

    let mut children = Vec::new();
    if let Some(requirements) = resolution.requirements.get(path) {
        for requirement in requirements {
            let dep_path = normalize_module_path(&requirement.path);
            // Always the selected release, never the one the requirement
            // names: the selection may have been bumped above it.
            if resolution.selected.contains_key(&dep_path) {
                children.push(build_node(&dep_path, resolution, depth + 1, max_depth, visited));
            }
        }
    }

    DependencyNode {
        id,
        path: path.to_string(),
        release,
        size,
        children,
    }
}
