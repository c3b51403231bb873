use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all modgraph operations.
#[derive(Debug, Error, Diagnostic)]
pub enum ModgraphError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The registry has no record of this module path at any release.
    #[error("Module \"{path}\" not found. Please check the module path.")]
    #[diagnostic(help("Module paths are case-insensitive here and must match a module known to the proxy"))]
    ModuleNotFound { path: String },

    /// The module exists but the requested release does not.
    #[error("Release \"{release}\" not found for module \"{path}\".")]
    ReleaseNotFound { path: String, release: String },

    /// Network request or protocol-level failure.
    #[error("Network error: {message}")]
    Network { message: String },

    /// A wire payload could not be decoded.
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// The resolution run was cancelled by its caller.
    #[error("Resolution cancelled")]
    Cancelled,

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type ModgraphResult<T> = miette::Result<T>;
