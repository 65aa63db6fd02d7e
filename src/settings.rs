//! Property keys and the settings seam to the host engine.
//!
//! The host exposes configuration as string-keyed lookups. The notifier reads
//! global settings (enabled flag, proxy, TLS bypass, server base URL) through
//! the [`SettingsLookup`] trait, and event-scoped values (webhook URL,
//! fail-only flag, commit/author overrides) from the snapshot's scanner
//! properties. [`DispatchSettings::resolve`] merges both into one value with
//! true optionals — a blank string from the host means "not set".

use std::collections::HashMap;

/// Property key names registered with the host.
pub mod keys {
    /// Global on/off switch. Default: disabled.
    pub const ENABLED: &str = "sonar.quality_gate_notifier.enabled";
    /// Webhook URL, set per analysis by the scanner.
    pub const HOOK: &str = "sonar.quality_gate_notifier.hook";
    /// Any non-blank value suppresses notifications for passing gates.
    pub const FAIL_ONLY: &str = "sonar.quality_gate_notifier.fail_only";
    /// Accept any TLS certificate on delivery. Default: off.
    pub const BYPASS_HTTPS_VALIDATION: &str =
        "sonar.quality_gate_notifier.bypass_https_validation";
    pub const PROXY_IP: &str = "sonar.quality_gate_notifier.proxy_ip";
    pub const PROXY_PORT: &str = "sonar.quality_gate_notifier.proxy_port";
    pub const PROXY_USER: &str = "sonar.quality_gate_notifier.proxy_user";
    pub const PROXY_PASS: &str = "sonar.quality_gate_notifier.proxy_pass";
    /// Link target for the commit line.
    pub const COMMIT_URL: &str = "sonar.quality_gate_notifier.commit_url";
    pub const CHANGE_AUTHOR_EMAIL: &str =
        "sonar.quality_gate_notifier.change_author_email";
    pub const CHANGE_AUTHOR_NAME: &str =
        "sonar.quality_gate_notifier.change_author_name";
    /// Host-wide setting used to build the project dashboard link.
    pub const SERVER_BASE_URL: &str = "sonar.core.serverBaseURL";
}

/// String-keyed configuration lookup provided by the host.
pub trait SettingsLookup {
    /// Raw string value for a key, if the host has one.
    fn get(&self, key: &str) -> Option<String>;

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }
}

impl SettingsLookup for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Effective settings for one dispatch, resolved from the event-scoped
/// scanner properties plus the host's global configuration.
#[derive(Debug, Clone, Default)]
pub struct DispatchSettings {
    /// Absent means "do not notify".
    pub webhook_url: Option<String>,
    pub fail_only: bool,
    pub enabled: bool,
    pub bypass_https_validation: bool,
    pub proxy_ip: Option<String>,
    pub proxy_port: Option<u16>,
    pub proxy_user: Option<String>,
    pub proxy_pass: Option<String>,
    pub commit_url: Option<String>,
    pub change_author_email: Option<String>,
    pub change_author_name: Option<String>,
    pub server_base_url: Option<String>,
}

impl DispatchSettings {
    pub fn resolve(
        properties: &HashMap<String, String>,
        config: &dyn SettingsLookup,
    ) -> Self {
        Self {
            webhook_url: non_blank(properties.get(keys::HOOK).cloned()),
            fail_only: properties
                .get(keys::FAIL_ONLY)
                .is_some_and(|v| !v.trim().is_empty()),
            enabled: config.get_bool(keys::ENABLED).unwrap_or(false),
            bypass_https_validation: config
                .get_bool(keys::BYPASS_HTTPS_VALIDATION)
                .unwrap_or(false),
            proxy_ip: non_blank(config.get(keys::PROXY_IP)),
            proxy_port: config
                .get_int(keys::PROXY_PORT)
                .and_then(|port| u16::try_from(port).ok()),
            proxy_user: non_blank(config.get(keys::PROXY_USER)),
            proxy_pass: non_blank(config.get(keys::PROXY_PASS)),
            commit_url: non_blank(properties.get(keys::COMMIT_URL).cloned()),
            change_author_email: non_blank(
                properties.get(keys::CHANGE_AUTHOR_EMAIL).cloned(),
            ),
            change_author_name: non_blank(
                properties.get(keys::CHANGE_AUTHOR_NAME).cloned(),
            ),
            server_base_url: non_blank(config.get(keys::SERVER_BASE_URL)),
        }
    }
}

/// Blank host values are treated as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_defaults_when_everything_absent() {
        let settings = DispatchSettings::resolve(&map(&[]), &map(&[]));

        assert!(settings.webhook_url.is_none());
        assert!(!settings.fail_only);
        assert!(!settings.enabled);
        assert!(!settings.bypass_https_validation);
        assert!(settings.proxy_ip.is_none());
        assert!(settings.proxy_port.is_none());
        assert!(settings.server_base_url.is_none());
    }

    #[test]
    fn test_resolve_trims_webhook_url() {
        let properties = map(&[(keys::HOOK, "  https://example.com/hook  ")]);
        let settings = DispatchSettings::resolve(&properties, &map(&[]));

        assert_eq!(
            settings.webhook_url.as_deref(),
            Some("https://example.com/hook")
        );
    }

    #[test]
    fn test_blank_webhook_url_is_absent() {
        let properties = map(&[(keys::HOOK, "   ")]);
        let settings = DispatchSettings::resolve(&properties, &map(&[]));

        assert!(settings.webhook_url.is_none());
    }

    #[test]
    fn test_fail_only_is_a_presence_flag() {
        let absent = DispatchSettings::resolve(&map(&[]), &map(&[]));
        assert!(!absent.fail_only);

        let blank = DispatchSettings::resolve(&map(&[(keys::FAIL_ONLY, " ")]), &map(&[]));
        assert!(!blank.fail_only);

        // Any non-blank value counts, not just "true".
        let set = DispatchSettings::resolve(&map(&[(keys::FAIL_ONLY, "yes")]), &map(&[]));
        assert!(set.fail_only);
    }

    #[test]
    fn test_enabled_defaults_to_false_and_parses_bool() {
        let config = map(&[(keys::ENABLED, "true")]);
        let settings = DispatchSettings::resolve(&map(&[]), &config);
        assert!(settings.enabled);

        let config = map(&[(keys::ENABLED, "not-a-bool")]);
        let settings = DispatchSettings::resolve(&map(&[]), &config);
        assert!(!settings.enabled);
    }

    #[test]
    fn test_proxy_port_parses_or_stays_absent() {
        let config = map(&[(keys::PROXY_PORT, "8080")]);
        let settings = DispatchSettings::resolve(&HashMap::new(), &config);
        assert_eq!(settings.proxy_port, Some(8080));

        let config = map(&[(keys::PROXY_PORT, "eighty")]);
        let settings = DispatchSettings::resolve(&HashMap::new(), &config);
        assert!(settings.proxy_port.is_none());

        let config = map(&[(keys::PROXY_PORT, "99999")]);
        let settings = DispatchSettings::resolve(&HashMap::new(), &config);
        assert!(settings.proxy_port.is_none());
    }

    #[test]
    fn test_event_overrides_come_from_properties_not_config() {
        let properties = map(&[(keys::COMMIT_URL, "https://git.example.com/c/abc")]);
        let config = map(&[(keys::COMMIT_URL, "https://wrong.example.com")]);
        let settings = DispatchSettings::resolve(&properties, &config);

        assert_eq!(
            settings.commit_url.as_deref(),
            Some("https://git.example.com/c/abc")
        );
    }
}
