use async_trait::async_trait;
use modgraph_util::errors::ModgraphResult;

use crate::requirement::Requirement;

/// Registry metadata operations the resolution engine depends on.
///
/// Implemented by the Go proxy client in `modgraph-proxy`; engine tests use
/// an in-memory implementation so resolution runs against fixed fixtures.
#[async_trait]
pub trait ModuleProvider: Send + Sync {
    /// The latest known release of a module.
    ///
    /// Fails with `ModuleNotFound` when the registry has no record of `path`.
    async fn latest_release(&self, path: &str) -> ModgraphResult<String>;

    /// All known releases of a module. Order is registry-defined; callers
    /// treating this as a set must sort it themselves.
    async fn list_releases(&self, path: &str) -> ModgraphResult<Vec<String>>;

    /// The requirement list declared by `path` at `release`.
    ///
    /// Fails with `ReleaseNotFound` when the module exists but the release
    /// does not, and `ModuleNotFound` when the path itself is unknown.
    async fn fetch_requirements(&self, path: &str, release: &str)
        -> ModgraphResult<Vec<Requirement>>;

    /// Best-effort artifact size in bytes. `Ok(None)` when the registry has
    /// no size to report; absence is not an error.
    async fn fetch_size(&self, path: &str, release: &str) -> ModgraphResult<Option<u64>>;
}
