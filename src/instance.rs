use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One running EC2 instance, as cached and displayed by the picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub public_dns: String,
    pub public_ip: String,
    pub tags: HashMap<String, String>,
}

impl Instance {
    /// Tag value for `name`, or `""` when the tag is absent.
    pub fn tag(&self, name: &str) -> &str {
        self.tags.get(name).map(String::as_str).unwrap_or("")
    }

    /// The `Name` tag, which conventionally holds the display name.
    pub fn name(&self) -> &str {
        self.tag("Name")
    }

    fn sort_key(&self) -> String {
        self.name().to_lowercase()
    }
}

// Equality and ordering go by case-insensitive display name only.
// Two instances sharing a Name compare equal even with different ids;
// selection matches records back by id, so this only affects sorting.
impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Instance {}

impl PartialOrd for Instance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
