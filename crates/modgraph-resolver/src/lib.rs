//! Resolution engine for modgraph: minimal version selection (MVS) over a
//! module registry, dependency tree construction, and flattening into a
//! deduplicated node/edge graph for a rendering layer.

pub mod flow;
pub mod resolver;
pub mod tree;
pub mod version;

pub use flow::{flatten, FlowEdge, FlowNode, ModuleGraph};
pub use resolver::{resolve_graph, CancelToken, Resolution, ResolveOptions, Resolver};
pub use tree::{build_tree, DependencyNode};
pub use version::{compare, sort_newest_first, Release};
