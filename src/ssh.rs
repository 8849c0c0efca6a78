use std::process::{Command, ExitStatus};
use thiserror::Error;

use crate::instance::Instance;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("instance {id} has no {field} to connect to")]
    NoAddress { id: String, field: &'static str },
    #[error("failed to spawn ssh")]
    Spawn(#[from] std::io::Error),
}

/// The address ssh should connect to: public IP when `use_ip` is set,
/// public DNS name otherwise. Errors when the chosen field is empty.
pub fn resolve_target(instance: &Instance, use_ip: bool) -> Result<&str, LaunchError> {
    let (target, field) = if use_ip {
        (instance.public_ip.as_str(), "public IP")
    } else {
        (instance.public_dns.as_str(), "public DNS name")
    };
    if target.is_empty() {
        return Err(LaunchError::NoAddress {
            id: instance.id.clone(),
            field,
        });
    }
    Ok(target)
}

/// Runs `ssh <target>` with inherited stdio and blocks until the
/// session ends. The target is passed as a single argv entry, never
/// through a shell.
pub fn launch(instance: &Instance, use_ip: bool) -> Result<ExitStatus, LaunchError> {
    let target = resolve_target(instance, use_ip)?;
    let status = Command::new("ssh").arg(target).status()?;
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn instance(ip: &str, dns: &str) -> Instance {
        Instance {
            id: "i-0abc".to_string(),
            public_dns: dns.to_string(),
            public_ip: ip.to_string(),
            tags: HashMap::new(),
        }
    }

    #[test]
    fn use_ip_resolves_the_public_ip() {
        let i = instance("1.2.3.4", "h.example.com");
        assert_eq!(resolve_target(&i, true).unwrap(), "1.2.3.4");
    }

    #[test]
    fn default_resolves_the_public_dns_name() {
        let i = instance("1.2.3.4", "h.example.com");
        assert_eq!(resolve_target(&i, false).unwrap(), "h.example.com");
    }

    #[test]
    fn empty_resolved_field_is_a_launch_error() {
        let no_ip = instance("", "h.example.com");
        assert!(matches!(
            resolve_target(&no_ip, true),
            Err(LaunchError::NoAddress { .. })
        ));

        let no_dns = instance("1.2.3.4", "");
        assert!(matches!(
            resolve_target(&no_dns, false),
            Err(LaunchError::NoAddress { .. })
        ));
    }
}
