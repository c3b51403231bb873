//! CLI argument definitions for modgraph.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

use modgraph_proxy::proxy::DEFAULT_PROXY_URL;

#[derive(Parser, Debug)]
#[command(
    name = "modgraph",
    version,
    about = "Dependency graph explorer for Go modules",
    long_about = "modgraph resolves the full transitive dependency closure of a Go module \
                  through a module proxy, picks one release per module with minimal version \
                  selection, and prints the result as a tree or a node/edge graph."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Module proxy base URL
    #[arg(long, global = true, env = "MODGRAPH_PROXY_URL", default_value = DEFAULT_PROXY_URL)]
    pub proxy: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a module's dependency closure and print it
    Graph {
        /// Module path, optionally pinned: path[@release]
        module: String,

        /// Release to resolve; wins over an inline @release, defaults to the latest
        #[arg(short, long)]
        release: Option<String>,

        /// Annotate modules with best-effort artifact sizes
        #[arg(long)]
        sizes: bool,

        /// Maximum tree depth
        #[arg(long, default_value_t = 50)]
        max_depth: usize,

        /// Emit the flattened node/edge graph as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// List a module's releases, newest first
    Versions {
        /// Module path
        module: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
