mod cache;
mod config;
mod fetch;
mod format;
mod instance;
mod select;
mod ssh;

use anyhow::Result;
use aws_config::Region;
use clap::Parser;
use colored::*;

use crate::cache::InstanceCache;
use crate::config::Config;
use crate::instance::Instance;

#[derive(Parser)]
#[command(name = "aws-qc")]
#[command(about = "Fuzzy-pick a running EC2 instance and open an SSH session to it")]
#[command(version)]
struct Cli {}

fn print_info(message: &str) {
    eprintln!("{} {}", "[INFO]".blue().bold(), message);
}

fn print_warning(message: &str) {
    eprintln!("{} {}", "[WARNING]".yellow().bold(), message);
}

/// The instance list for the configured region, served from the disk
/// cache when fresh and refetched (then re-cached) otherwise.
async fn get_instances(config: &Config) -> Result<Vec<Instance>> {
    let cache = InstanceCache::open();

    if let Some(instances) = cache.as_ref().and_then(InstanceCache::load) {
        return Ok(instances);
    }

    print_info(&format!(
        "Fetching running instances in {}...",
        config.region
    ));

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;
    let client = aws_sdk_ec2::Client::new(&aws_config);

    let instances = fetch::fetch_instances(&client, &config.region).await?;

    if let Some(cache) = cache {
        if let Err(e) = cache.store(&instances, config.ttl) {
            print_warning(&format!("Could not write instance cache: {e}"));
        }
    }

    Ok(instances)
}

#[tokio::main]
async fn main() -> Result<()> {
    Cli::parse();
    let config = Config::from_env();

    let mut instances = get_instances(&config).await?;
    if instances.is_empty() {
        print_warning(&format!(
            "No running instances found in {}.",
            config.region
        ));
        return Ok(());
    }

    instances.sort();
    instances.reverse();

    let lines: Vec<String> = instances
        .iter()
        .map(|i| format::format_line(i, &config.template))
        .collect();

    // A cancelled picker, a line without a marker, or an id no longer
    // in the list all end the run cleanly without launching anything.
    let Some(index) = select::select_line(&lines)? else {
        return Ok(());
    };
    let Some(instance_id) = format::extract_instance_id(&lines[index]) else {
        return Ok(());
    };
    let Some(target) = instances.iter().find(|i| i.id == instance_id) else {
        return Ok(());
    };

    let status = ssh::launch(target, config.use_ip)?;
    std::process::exit(status.code().unwrap_or(1));
}
