//! Handler for `modgraph graph`.

use miette::Result;

use modgraph_core::ModuleInput;
use modgraph_proxy::{GoProxy, ProxyClient};
use modgraph_resolver::{flatten, resolve_graph, ResolveOptions};
use modgraph_util::errors::ModgraphError;
use modgraph_util::progress;

pub async fn exec(
    proxy_url: &str,
    module: &str,
    release: Option<&str>,
    sizes: bool,
    max_depth: usize,
    json: bool,
) -> Result<()> {
    let input = ModuleInput::parse(module).ok_or_else(|| ModgraphError::Generic {
        message: format!("Invalid module input: \"{module}\""),
    })?;
    let release = release
        .map(str::to_string)
        .or_else(|| input.release.clone());

    let client = ProxyClient::new(GoProxy::new(proxy_url))?;

    let spinner = progress::spinner(&format!("Resolving {}", input.path));
    let options = ResolveOptions {
        include_sizes: sizes,
        max_depth,
        ..Default::default()
    };
    let resolved = resolve_graph(&client, &input.path, release.as_deref(), &options).await;
    spinner.finish_and_clear();
    let tree = resolved?;

    let graph = flatten(&tree);
    tracing::debug!("flattened {} nodes / {} edges", graph.len(), graph.edge_count());

    if json {
        let nodes: Vec<_> = graph.nodes().collect();
        let edges: Vec<_> = graph.edges().collect();
        let payload = serde_json::json!({ "nodes": nodes, "edges": edges });
        let rendered =
            serde_json::to_string_pretty(&payload).map_err(|e| ModgraphError::Generic {
                message: format!("Failed to encode graph: {e}"),
            })?;
        println!("{rendered}");
    } else {
        progress::status(
            "Resolved",
            &format!(
                "{}@{}: {} modules, {} edges",
                tree.path,
                tree.release,
                graph.len(),
                graph.edge_count()
            ),
        );
        print!("{}", tree.render());
    }

    Ok(())
}
