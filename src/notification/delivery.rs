//! Synchronous webhook delivery over HTTP(S), with optional proxy routing
//! and an explicit TLS-validation bypass for intercepting proxies.
//!
//! One client is built per delivery attempt and dropped afterwards; reqwest
//! releases the underlying connection on every exit path. There is exactly
//! one POST per notification event: no retries, no backoff.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{Proxy, StatusCode, Url};
use tracing::{debug, error, info};

use crate::error::NotifyError;

use super::payload::NotificationPayload;

/// Timeout for the single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Proxy routing and credentials for outbound delivery.
///
/// The proxy is enabled only when both host and port are present, and
/// credentials apply only when additionally both user and password are
/// present. Any partial configuration behaves exactly like no configuration.
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl ProxyConfig {
    pub fn enabled(&self) -> bool {
        self.host.is_some() && self.port.is_some()
    }

    pub fn auth_enabled(&self) -> bool {
        self.enabled() && self.user.is_some() && self.pass.is_some()
    }
}

/// Transport options for one delivery attempt.
#[derive(Debug, Clone, Default)]
pub struct DeliveryOptions {
    /// Accept any TLS certificate and hostname. Explicit opt-in for
    /// corporate-proxy interception; never the default.
    pub bypass_https_validation: bool,
    pub proxy: ProxyConfig,
}

/// One-shot client for a single webhook delivery.
pub struct WebhookClient {
    hook: Url,
    port: u16,
    path: String,
    client: Client,
}

impl WebhookClient {
    /// Parses the webhook URL and prepares the transport.
    pub fn new(url: &str, options: &DeliveryOptions) -> Result<Self, NotifyError> {
        let hook = Url::parse(url).map_err(|error| NotifyError::InvalidUrl {
            url: url.to_string(),
            reason: error.to_string(),
        })?;
        let port = effective_port(&hook);
        let path = effective_path(&hook);
        let client = build_transport(options)?;

        debug!(
            host = hook.host_str().unwrap_or(""),
            port,
            path = %path,
            bypass_https_validation = options.bypass_https_validation,
            proxy_enabled = options.proxy.enabled(),
            proxy_auth_enabled = options.proxy.auth_enabled(),
            "webhook client built"
        );

        Ok(Self {
            hook,
            port,
            path,
            client,
        })
    }

    /// Posts the payload once. `true` means the endpoint answered HTTP 200;
    /// every other status and every transport fault is `false` with a
    /// logged diagnostic. Never propagates an error to the caller.
    pub fn post(&self, payload: &NotificationPayload) -> bool {
        let result = self
            .client
            .post(self.hook.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send();

        match result {
            Ok(response) => {
                let status = response.status();
                if status == StatusCode::OK {
                    info!("webhook POST successful");
                    true
                } else {
                    error!(status = %status, "webhook endpoint rejected the notification");
                    false
                }
            }
            Err(error) => {
                error!(error = %error, "failed to deliver webhook notification");
                false
            }
        }
    }

    /// Effective port the delivery targets.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// URL path with query string and fragment re-attached.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Explicit URL port, else the scheme default: 443 for https, 80 otherwise.
fn effective_port(hook: &Url) -> u16 {
    hook.port()
        .unwrap_or(if hook.scheme() == "https" { 443 } else { 80 })
}

fn effective_path(hook: &Url) -> String {
    let mut path = hook.path().to_string();
    if let Some(query) = hook.query().filter(|q| !q.is_empty()) {
        path.push('?');
        path.push_str(query);
    }
    if let Some(fragment) = hook.fragment().filter(|f| !f.is_empty()) {
        path.push('#');
        path.push_str(fragment);
    }
    path
}

/// Default transport unless TLS bypass or a proxy is requested. Proxy
/// credentials are scoped to the proxy challenge only, never to the
/// destination host.
fn build_transport(options: &DeliveryOptions) -> Result<Client, NotifyError> {
    let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);

    if options.bypass_https_validation {
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    if let (Some(host), Some(port)) = (options.proxy.host.as_deref(), options.proxy.port) {
        let mut proxy = Proxy::all(format!("http://{}:{}", host, port))?;
        if let (Some(user), Some(pass)) =
            (options.proxy.user.as_deref(), options.proxy.pass.as_deref())
        {
            proxy = proxy.basic_auth(user, pass);
        }
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}
