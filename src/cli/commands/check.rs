//! Check command - probe TCP reachability of matched instances

use crate::cli::args::CheckArgs;
use crate::config::Config;
use crate::error::{ArmadaError, ArmadaResult};
use crate::inventory::{self, Instances};
use crate::probe;
use console::style;
use futures_util::future::join_all;
use std::time::Duration;

/// Execute the check command
pub async fn execute(args: CheckArgs, config: &Config) -> ArmadaResult<()> {
    let filter = inventory::parse_label_filter(args.labels.as_deref().unwrap_or(""))?;
    let instances = super::resolve_instances(&args.inventory, args.no_cache, config).await?;

    let matched: Instances = instances
        .into_iter()
        .filter(|i| i.has_labels(&filter))
        .collect();

    if matched.is_empty() {
        println!("No instances match the filter.");
        return Ok(());
    }

    let connect_timeout =
        Duration::from_secs(args.timeout.unwrap_or(config.probe.timeout_secs));

    let probes = matched
        .iter()
        .map(|i| probe::is_reachable(&i.ssh, connect_timeout));
    let results = join_all(probes).await;

    let mut unreachable = 0;
    for (instance, reachable) in matched.iter().zip(results) {
        if reachable {
            println!(
                "{} {} ({})",
                style("✓").green(),
                instance.ssh.socket_addr(),
                instance.ssh.username
            );
        } else {
            unreachable += 1;
            println!("{} {}", style("✗").red(), instance.ssh.socket_addr());
        }
    }

    println!();
    if unreachable > 0 {
        println!("{}/{} host(s) unreachable", unreachable, matched.len());
        return Err(ArmadaError::HostsUnreachable(unreachable));
    }

    println!(
        "{} all {} host(s) reachable",
        style("✓").green(),
        matched.len()
    );
    Ok(())
}
