use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::instance::Instance;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+|tag:[^}]+)\}").unwrap())
}

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<id:(i-[a-zA-Z0-9]+)>").unwrap())
}

/// Renders one picker line: the configured template plus the ` <id:...>`
/// marker that lets the chosen free-text line be mapped back to an
/// instance.
pub fn format_line(instance: &Instance, template: &str) -> String {
    format!("{} <id:{}>", render_template(template, instance), instance.id)
}

/// Substitutes `{id}`, `{name}`, `{public_ip}`, `{public_dns}` and
/// `{tag:Key}` placeholders. Unknown placeholders are left untouched.
fn render_template(template: &str, instance: &Instance) -> String {
    placeholder_re()
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "id" => instance.id.clone(),
            "name" => instance.name().to_string(),
            "public_ip" => instance.public_ip.clone(),
            "public_dns" => instance.public_dns.clone(),
            key => match key.strip_prefix("tag:") {
                Some(tag) => instance.tag(tag).to_string(),
                None => caps[0].to_string(),
            },
        })
        .into_owned()
}

/// Recovers the instance id from a chosen line. Anchored to the last
/// marker in the line, so tag text that happens to contain marker-like
/// syntax earlier in the line cannot shadow the appended one.
pub fn extract_instance_id(line: &str) -> Option<&str> {
    marker_re()
        .captures_iter(line)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn instance(id: &str, name: &str, ip: &str, dns: &str) -> Instance {
        Instance {
            id: id.to_string(),
            public_dns: dns.to_string(),
            public_ip: ip.to_string(),
            tags: HashMap::from([("Name".to_string(), name.to_string())]),
        }
    }

    #[test]
    fn default_template_renders_name_and_ip() {
        let i = instance("i-0abc", "web", "1.2.3.4", "h.example.com");
        let line = format_line(&i, crate::config::DEFAULT_TEMPLATE);
        assert_eq!(line, "web @ 1.2.3.4 <id:i-0abc>");
    }

    #[test]
    fn extract_recovers_the_formatted_id() {
        let i = instance("i-9f3Xy2", "api", "5.6.7.8", "a.example.com");
        for template in ["{name}", "{name} @ {public_dns}", "plain text", ""] {
            let line = format_line(&i, template);
            assert_eq!(extract_instance_id(&line), Some("i-9f3Xy2"), "{template}");
        }
    }

    #[test]
    fn extract_concrete_marker() {
        assert_eq!(extract_instance_id("abc <id:i-324>"), Some("i-324"));
    }

    #[test]
    fn extract_without_marker_is_none() {
        assert_eq!(extract_instance_id("no marker here"), None);
        assert_eq!(extract_instance_id("<id:not-an-instance>"), None);
        assert_eq!(extract_instance_id("<id:i->"), None);
    }

    #[test]
    fn extract_takes_the_last_marker() {
        let mut i = instance("i-real", "decoy", "", "");
        i.tags
            .insert("Name".to_string(), "trap <id:i-fake>".to_string());
        let line = format_line(&i, "{name}");
        assert_eq!(extract_instance_id(&line), Some("i-real"));
    }

    #[test]
    fn tag_placeholder_uses_the_explicit_accessor() {
        let mut i = instance("i-1", "web", "1.2.3.4", "");
        i.tags
            .insert("Environment".to_string(), "prod".to_string());
        let rendered = render_template("{name} [{tag:Environment}] [{tag:Missing}]", &i);
        assert_eq!(rendered, "web [prod] []");
    }

    #[test]
    fn unknown_placeholders_are_left_as_is() {
        let i = instance("i-1", "web", "", "");
        assert_eq!(render_template("{name} {bogus}", &i), "web {bogus}");
    }
}
