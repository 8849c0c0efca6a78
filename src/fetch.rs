use aws_sdk_ec2::types::{Filter, InstanceStateName, Reservation, Tag};
use aws_sdk_ec2::Client;
use std::collections::HashMap;
use thiserror::Error;

use crate::instance::Instance;

#[derive(Debug, Error)]
#[error("failed to list instances in {region}")]
pub struct ProviderError {
    region: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

/// All running instances in `region`. Not retried; an API failure
/// aborts the whole run before anything is cached or displayed.
pub async fn fetch_instances(client: &Client, region: &str) -> Result<Vec<Instance>, ProviderError> {
    let state_filter = Filter::builder()
        .name("instance-state-name")
        .values("running")
        .build();

    let mut pages = client
        .describe_instances()
        .filters(state_filter)
        .into_paginator()
        .send();

    let mut instances = Vec::new();
    while let Some(page) = pages.next().await {
        let page = page.map_err(|e| ProviderError {
            region: region.to_string(),
            source: Box::new(e),
        })?;
        instances.extend(running_instances(page.reservations()));
    }
    Ok(instances)
}

/// Converts reservations into records, keeping only running instances.
/// The describe call filters by state server-side as well; this keeps
/// the conversion correct on its own.
fn running_instances(reservations: &[Reservation]) -> Vec<Instance> {
    let mut out = Vec::new();
    for reservation in reservations {
        for instance in reservation.instances() {
            let running = instance
                .state()
                .and_then(|s| s.name())
                .map(|n| *n == InstanceStateName::Running)
                .unwrap_or(false);
            if !running {
                continue;
            }
            out.push(Instance {
                id: instance.instance_id().unwrap_or_default().to_string(),
                public_dns: instance.public_dns_name().unwrap_or_default().to_string(),
                public_ip: instance.public_ip_address().unwrap_or_default().to_string(),
                tags: expand_tags(instance.tags()),
            });
        }
    }
    out
}

/// Flattens the provider's tag list into a map; on duplicate keys the
/// last occurrence wins.
fn expand_tags(tags: &[Tag]) -> HashMap<String, String> {
    tags.iter()
        .filter_map(|tag| Some((tag.key()?.to_string(), tag.value()?.to_string())))
        .collect()
}
