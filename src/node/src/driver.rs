//! Discovery commands run by the binary

use crate::config::{NodeConfig, OutputSection};
use anyhow::{Context, Result};
use redis_iam_connector::{run_pass, Connector};
use redis_iam_core::Graph;
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Run one discovery pass and write the graph to the configured output
pub async fn sync(config: &NodeConfig, cancel: &CancellationToken) -> Result<Graph> {
    let connector = Connector::from_config(&config.client_config())
        .context("Failed to create connector")?;

    let graph = run_pass(&connector, cancel)
        .await
        .context("Discovery pass failed")?;

    write_graph(&graph, &config.output)?;
    Ok(graph)
}

/// Check credentials and reachability without running a pass
pub async fn validate(config: &NodeConfig, cancel: &CancellationToken) -> Result<()> {
    let connector = Connector::from_config(&config.client_config())
        .context("Failed to create connector")?;

    let annotations = connector
        .validate(cancel)
        .await
        .context("Cluster validation failed")?;

    for info in connector.metadata().resource_types {
        info!(
            "Resource type {} ({}) as {:?}",
            info.display_name, info.resource_type, info.resource_trait
        );
    }

    match annotations.rate_limit() {
        Some(rate_limit) => info!(
            "Validation succeeded; rate limit {:?}, {:?} remaining",
            rate_limit.status, rate_limit.remaining
        ),
        None => info!("Validation succeeded"),
    }

    Ok(())
}

/// Serialize `graph` to the output file, or to stdout when no path is set
pub fn write_graph(graph: &Graph, output: &OutputSection) -> Result<()> {
    let json = graph
        .to_json(output.pretty)
        .context("Failed to serialize graph")?;

    match &output.path {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote graph to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json).context("Failed to write graph to stdout")?;
        }
    }

    Ok(())
}
