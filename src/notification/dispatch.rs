//! Decides whether an analysis event produces a notification and drives
//! payload construction and delivery when it does.
//!
//! Four checkpoints, each a short-circuit exit: webhook configured, plugin
//! enabled, fail-only gating, then build + deliver. Nothing in here returns
//! an error to the host — every failure ends as a log line.

use tracing::{debug, error, info};

use crate::analysis::AnalysisSnapshot;
use crate::settings::{DispatchSettings, SettingsLookup};

use super::delivery::{DeliveryOptions, ProxyConfig, WebhookClient};
use super::payload::{build_payload, PayloadOptions};

/// Fallback dashboard host used when the server base URL is not configured.
const PLACEHOLDER_SERVER_URL: &str = "http://pleaseDefineSonarQubeUrl/";

/// Host-facing dispatcher: holds the global settings lookup and is invoked
/// once per completed analysis.
pub struct Dispatcher<C> {
    config: C,
}

impl<C: SettingsLookup> Dispatcher<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    /// Callback for one completed analysis. Never fails.
    pub fn finished(&self, snapshot: &AnalysisSnapshot) {
        dispatch_analysis(snapshot, &self.config);
    }
}

/// Runs the dispatch decision for one analysis event.
pub fn dispatch_analysis(snapshot: &AnalysisSnapshot, config: &dyn SettingsLookup) {
    let settings = DispatchSettings::resolve(&snapshot.properties, config);

    let Some(webhook_url) = settings.webhook_url.clone() else {
        debug!(
            project = %snapshot.project_key,
            "no webhook configured for this analysis, skipping notification"
        );
        return;
    };

    if !settings.enabled {
        info!("quality gate notifier disabled, skipping notification");
        return;
    }

    if settings.fail_only
        && snapshot
            .quality_gate
            .as_ref()
            .is_some_and(|gate| gate.status.is_ok())
    {
        info!("quality gate passed and fail_only is set, skipping notification");
        return;
    }

    let gate_ok = snapshot
        .quality_gate
        .as_ref()
        .map_or(true, |gate| gate.status.is_ok());

    let options = PayloadOptions {
        project_url: project_url(settings.server_base_url.as_deref(), &snapshot.project_key),
        fail_only: settings.fail_only,
        commit_url: settings.commit_url.clone(),
        change_author_email: settings.change_author_email.clone(),
        change_author_name: settings.change_author_name.clone(),
    };

    let payload = match build_payload(snapshot, &options, gate_ok) {
        Ok(payload) => payload,
        Err(error) => {
            error!(error = %error, "failed to build notification payload");
            return;
        }
    };

    let delivery = DeliveryOptions {
        bypass_https_validation: settings.bypass_https_validation,
        proxy: ProxyConfig {
            host: settings.proxy_ip.clone(),
            port: settings.proxy_port,
            user: settings.proxy_user.clone(),
            pass: settings.proxy_pass.clone(),
        },
    };

    let client = match WebhookClient::new(&webhook_url, &delivery) {
        Ok(client) => client,
        Err(error) => {
            error!(error = %error, "failed to build webhook client");
            return;
        }
    };

    if client.post(&payload) {
        info!(url = %webhook_url, "quality gate notification posted");
    } else {
        error!(url = %webhook_url, "quality gate notification failed");
    }
}

/// Dashboard URL for the project: configured server base URL (placeholder
/// when unset), normalized to exactly one trailing slash, plus the
/// dashboard query.
fn project_url(server_base_url: Option<&str>, project_key: &str) -> String {
    let base = match server_base_url {
        Some(url) => format!("{}/", url.trim_end_matches('/')),
        None => PLACEHOLDER_SERVER_URL.to_string(),
    };
    format!("{}dashboard?id={}", base, project_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_url_appends_dashboard_query() {
        assert_eq!(
            project_url(Some("https://sonar.example.com"), "my_key"),
            "https://sonar.example.com/dashboard?id=my_key"
        );
    }

    #[test]
    fn test_project_url_normalizes_trailing_slashes() {
        assert_eq!(
            project_url(Some("https://sonar.example.com/"), "k"),
            "https://sonar.example.com/dashboard?id=k"
        );
        assert_eq!(
            project_url(Some("https://sonar.example.com//"), "k"),
            "https://sonar.example.com/dashboard?id=k"
        );
    }

    #[test]
    fn test_project_url_placeholder_when_base_unset() {
        assert_eq!(
            project_url(None, "my_key"),
            "http://pleaseDefineSonarQubeUrl/dashboard?id=my_key"
        );
    }
}
