//! Handler for `modgraph versions`.

use miette::Result;

use modgraph_core::{ModuleInput, ModuleProvider};
use modgraph_proxy::{GoProxy, ProxyClient};
use modgraph_resolver::sort_newest_first;
use modgraph_util::errors::ModgraphError;

pub async fn exec(proxy_url: &str, module: &str) -> Result<()> {
    let input = ModuleInput::parse(module).ok_or_else(|| ModgraphError::Generic {
        message: format!("Invalid module input: \"{module}\""),
    })?;

    let client = ProxyClient::new(GoProxy::new(proxy_url))?;

    let mut releases = client.list_releases(&input.path).await?;
    if releases.is_empty() {
        // Modules with no tagged release still answer @latest, usually
        // with a pseudo-version.
        releases = vec![client.latest_release(&input.path).await?];
    }

    sort_newest_first(&mut releases);
    for release in &releases {
        println!("{release}");
    }

    Ok(())
}
