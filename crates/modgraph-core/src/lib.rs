//! Core data types for modgraph.
//!
//! This crate defines the fundamental types shared across the workspace:
//! module references and input parsing, module path normalization,
//! requirement entries from `go.mod` manifests, and the [`ModuleProvider`]
//! trait through which the resolution engine talks to a module registry.
//!
//! This crate is intentionally free of network I/O.

pub mod module;
pub mod provider;
pub mod requirement;

pub use module::{normalize_module_path, ModuleInput, ModuleReference};
pub use provider::ModuleProvider;
pub use requirement::Requirement;
