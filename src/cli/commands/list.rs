//! List command - show inventory instances

use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::ArmadaResult;
use crate::inventory::{self, Instances};
use console::style;

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> ArmadaResult<()> {
    let filter = inventory::parse_label_filter(args.labels.as_deref().unwrap_or(""))?;
    let instances = super::resolve_instances(&args.inventory, args.no_cache, config).await?;

    let matched: Instances = instances
        .into_iter()
        .filter(|i| i.has_labels(&filter))
        .collect();

    if matched.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!("No instances match the filter."),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&matched, args.decode_password)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matched)?),
        OutputFormat::Plain => print_plain(&matched),
    }

    Ok(())
}

fn print_table(instances: &Instances, decode_password: bool) -> ArmadaResult<()> {
    for instance in instances {
        let line = if decode_password {
            instance.describe_decoded()?
        } else {
            instance.to_string()
        };

        println!("{} {}", style("•").cyan(), line);
    }

    println!();
    println!("{} instance(s)", instances.len());
    Ok(())
}

fn print_plain(instances: &Instances) {
    for instance in instances {
        println!("{}", instance.ssh.socket_addr());
    }
}
