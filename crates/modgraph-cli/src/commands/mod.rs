//! Command dispatch and handler modules.

mod graph;
mod versions;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Graph {
            module,
            release,
            sizes,
            max_depth,
            json,
        } => {
            graph::exec(
                &cli.proxy,
                &module,
                release.as_deref(),
                sizes,
                max_depth,
                json,
            )
            .await
        }
        Command::Versions { module } => versions::exec(&cli.proxy, &module).await,
    }
}
