//! Minimal version selection over a module registry.
//!
//! A FIFO worklist drains `(path, release, required_by)` entries: the first
//! release seen for a path is selected and its requirements fetched and
//! enqueued; a later entry only matters if it compares strictly higher, in
//! which case the selection is bumped and requirements re-fetched at the new
//! release. Lower or equal entries are discarded. The loop issues one
//! metadata fetch at a time and terminates when the queue drains.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use modgraph_core::{normalize_module_path, ModuleProvider, Requirement};
use modgraph_util::errors::ModgraphError;

use crate::tree::{build_tree, DependencyNode};
use crate::version;

/// Default recursion bound for tree construction.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Cooperative cancellation flag for a resolution run.
///
/// Checked only at coarse checkpoints (before the latest-release lookup and
/// around tree construction), never inside the worklist loop: a cancel
/// requested mid-loop lets the current fetch complete and the result is
/// discarded afterwards. Requests already in flight are not torn down.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Options for [`resolve_graph`].
#[derive(Clone, Debug)]
pub struct ResolveOptions {
    /// Record best-effort artifact sizes alongside selections.
    pub include_sizes: bool,
    /// Recursion bound for tree construction.
    pub max_depth: usize,
    /// Cancellation flag; a fresh token never fires.
    pub cancel: CancelToken,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            include_sizes: false,
            max_depth: DEFAULT_MAX_DEPTH,
            cancel: CancelToken::new(),
        }
    }
}

/// The tables produced by one resolution run.
///
/// Created fresh per call and never shared across runs; the caller that
/// started the run is the only mutator.
#[derive(Debug)]
pub struct Resolution {
    root: String,
    /// Path -> the one release selected for the whole closure. Only ever
    /// overwritten by a strictly higher release.
    pub selected: HashMap<String, String>,
    /// Path -> requirement list fetched at the selected release; replaced
    /// wholesale on a selection bump.
    pub requirements: HashMap<String, Vec<Requirement>>,
    /// Path -> paths that declared a requirement on it. Advisory only:
    /// entries accumulate across version bumps and are never retracted, so
    /// a dependent whose own selection was later bumped may still be listed
    /// here from its stale requirement list.
    pub dependents: HashMap<String, HashSet<String>>,
    sizes: HashMap<String, Option<u64>>,
}

impl Resolution {
    fn new(root: String) -> Self {
        Self {
            root,
            selected: HashMap::new(),
            requirements: HashMap::new(),
            dependents: HashMap::new(),
            sizes: HashMap::new(),
        }
    }

    /// An empty resolution for table-driven tests elsewhere in the crate.
    #[cfg(test)]
    pub(crate) fn for_tests(root: &str) -> Self {
        Self::new(normalize_module_path(root))
    }

    /// The normalized root module path.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The selected release for a path, if it was reached.
    pub fn selected_release(&self, path: &str) -> Option<&str> {
        self.selected.get(path).map(String::as_str)
    }

    /// The recorded artifact size for a path, when size tracking ran and
    /// the registry reported one.
    pub fn size_of(&self, path: &str) -> Option<u64> {
        self.sizes.get(path).copied().flatten()
    }

    /// Number of distinct module paths in the closure.
    pub fn module_count(&self) -> usize {
        self.selected.len()
    }
}

/// Entry in the resolution worklist.
struct QueueEntry {
    path: String,
    release: String,
    required_by: Option<String>,
}

/// One resolution engine instance. Owns nothing across calls; each
/// [`Resolver::resolve`] builds and returns its own [`Resolution`].
pub struct Resolver<'a> {
    provider: &'a dyn ModuleProvider,
    include_sizes: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(provider: &'a dyn ModuleProvider) -> Self {
        Self {
            provider,
            include_sizes: false,
        }
    }

    /// Record best-effort artifact sizes alongside selections.
    pub fn with_sizes(mut self, include_sizes: bool) -> Self {
        self.include_sizes = include_sizes;
        self
    }

    /// Drain the worklist from a pinned root.
    ///
    /// A failure fetching the root's requirements is fatal; any other fetch
    /// failure degrades that one path to an empty requirement list and the
    /// run continues.
    pub async fn resolve(&self, root_path: &str, root_release: &str) -> miette::Result<Resolution> {
        let root = normalize_module_path(root_path);
        let mut resolution = Resolution::new(root.clone());

        let mut queue: VecDeque<QueueEntry> = VecDeque::new();
        queue.push_back(QueueEntry {
            path: root,
            release: root_release.to_string(),
            required_by: None,
        });

        while let Some(entry) = queue.pop_front() {
            let path = normalize_module_path(&entry.path);
            let is_root = entry.required_by.is_none();

            if let Some(dependent) = entry.required_by.as_deref() {
                resolution
                    .dependents
                    .entry(path.clone())
                    .or_default()
                    .insert(normalize_module_path(dependent));
            }

            let previous = resolution.selected.get(&path).cloned();
            let takes_selection = match &previous {
                None => true,
                Some(current) => version::compare(&entry.release, current) == Ordering::Greater,
            };

            // Lower or equal than the standing selection: discard.
            if !takes_selection {
                continue;
            }

            if let Some(previous) = &previous {
                tracing::debug!("bumping {path}: {previous} -> {}", entry.release);
            }
            resolution.selected.insert(path.clone(), entry.release.clone());
            self.fetch_requirements_into(&mut resolution, &mut queue, &path, &entry.release, is_root)
                .await?;
        }

        Ok(resolution)
    }

    /// Fetch the requirement list for a freshly selected `path@release`,
    /// record it, and enqueue its entries. Non-root failures degrade to an
    /// empty list.
    async fn fetch_requirements_into(
        &self,
        resolution: &mut Resolution,
        queue: &mut VecDeque<QueueEntry>,
        path: &str,
        release: &str,
        is_root: bool,
    ) -> miette::Result<()> {
        match self.provider.fetch_requirements(path, release).await {
            Ok(requirements) => {
                if self.include_sizes && !resolution.sizes.contains_key(path) {
                    let size = self.provider.fetch_size(path, release).await.ok().flatten();
                    resolution.sizes.insert(path.to_string(), size);
                }

                for requirement in &requirements {
                    queue.push_back(QueueEntry {
                        path: normalize_module_path(&requirement.path),
                        release: requirement.release_or_latest().to_string(),
                        required_by: Some(path.to_string()),
                    });
                }

                resolution.requirements.insert(path.to_string(), requirements);
                Ok(())
            }
            Err(e) if is_root => Err(e),
            Err(e) => {
                tracing::warn!("Failed to fetch requirements for {path}@{release}: {e}");
                resolution.requirements.insert(path.to_string(), Vec::new());
                Ok(())
            }
        }
    }
}

/// Resolve a module's dependency closure and materialize it as a tree.
///
/// When `release` is absent the registry's latest release is used; failure
/// to determine it is fatal. Cancellation is honoured at the checkpoints
/// described on [`CancelToken`].
pub async fn resolve_graph(
    provider: &dyn ModuleProvider,
    path: &str,
    release: Option<&str>,
    options: &ResolveOptions,
) -> miette::Result<DependencyNode> {
    if options.cancel.is_cancelled() {
        return Err(ModgraphError::Cancelled.into());
    }

    let path = normalize_module_path(path);
    let release = match release {
        Some(release) => release.to_string(),
        None => provider.latest_release(&path).await?,
    };

    let resolution = Resolver::new(provider)
        .with_sizes(options.include_sizes)
        .resolve(&path, &release)
        .await?;

    if options.cancel.is_cancelled() {
        return Err(ModgraphError::Cancelled.into());
    }

    let tree = build_tree(&resolution, options.max_depth);

    if options.cancel.is_cancelled() {
        return Err(ModgraphError::Cancelled.into());
    }

    Ok(tree)
}
