use std::env;

pub const DEFAULT_TEMPLATE: &str = "{name} @ {public_ip}";
const DEFAULT_REGION: &str = "us-west-2";
const DEFAULT_CACHE_TTL_SECONDS: u64 = 3000;

/// Runtime settings, read once at startup and passed down by reference.
#[derive(Debug, Clone)]
pub struct Config {
    /// Display template for the picker lines; `{name}`, `{public_ip}`,
    /// `{public_dns}`, `{id}` and `{tag:Key}` are substituted.
    pub template: String,
    /// Connect to the public IP instead of the public DNS name.
    pub use_ip: bool,
    pub region: String,
    /// Instance cache expiry, in seconds.
    pub ttl: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            template: get("AWS_QC_TEMPLATE").unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
            use_ip: get("AWS_QC_USE_IP").map(|v| parse_bool(&v)).unwrap_or(false),
            region: get("AWS_QC_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            ttl: get("AWS_QC_CACHE_TTL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}
