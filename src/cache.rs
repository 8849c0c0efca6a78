use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::instance::Instance;

const CACHE_DIR: &str = ".aws-qc-cache";
const CACHE_FILE: &str = "instances.json";

/// Disk-backed cache for the fetched instance list, shared across
/// invocations. No locking; concurrent runs race and the last writer
/// wins, which is acceptable for a single-operator tool.
pub struct InstanceCache {
    path: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    expires_at: DateTime<Utc>,
    instances: Vec<Instance>,
}

impl InstanceCache {
    /// Cache under the user's home directory, or `None` when no home
    /// directory can be resolved (caching is then skipped entirely).
    pub fn open() -> Option<Self> {
        let path = dirs::home_dir()?.join(CACHE_DIR).join(CACHE_FILE);
        Some(Self { path })
    }

    #[cfg(test)]
    fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// The cached instance list, if present and unexpired. A missing,
    /// unreadable, or corrupt cache file is simply a miss.
    pub fn load(&self) -> Option<Vec<Instance>> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let entry: CacheEntry = serde_json::from_str(&raw).ok()?;
        if entry.expires_at <= Utc::now() {
            return None;
        }
        Some(entry.instances)
    }

    /// Overwrite the cache with `instances`, expiring `ttl_seconds`
    /// from now.
    pub fn store(&self, instances: &[Instance], ttl_seconds: u64) -> Result<()> {
        let entry = CacheEntry {
            expires_at: Utc::now() + Duration::seconds(ttl_seconds as i64),
            instances: instances.to_vec(),
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(&entry)?)?;
        Ok(())
    }
}
