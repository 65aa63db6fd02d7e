//! Builds the notification card for one analysis event.
//!
//! The wire shape is a message card: markdown body, theme color keyed on the
//! gate verdict, and one open-link action pointing at the project dashboard.
//! A payload is built fresh per event and never mutated afterwards; it is
//! delivered even when the body is empty (snapshot without a quality gate).

use serde::Serialize;
use tracing::info;

use crate::analysis::AnalysisSnapshot;
use crate::error::NotifyError;

use super::condition::{filter_fail_only, translate_condition};

/// Theme color for a passing gate.
const THEME_COLOR_OK: &str = "2eb886";
/// Theme color for a failing gate.
const THEME_COLOR_FAILED: &str = "a30200";

/// Inputs for one payload build, resolved by the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct PayloadOptions {
    /// Dashboard link for the project. Required.
    pub project_url: String,
    /// Render only conditions that did not pass.
    pub fail_only: bool,
    /// Link target for the commit line.
    pub commit_url: Option<String>,
    /// Mentioned on the commit line when the gate failed.
    pub change_author_email: Option<String>,
    pub change_author_name: Option<String>,
}

/// Wire form of one webhook message.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPayload {
    #[serde(rename = "@type")]
    card_type: &'static str,
    #[serde(rename = "@context")]
    context: &'static str,
    text: String,
    #[serde(rename = "themeColor")]
    theme_color: &'static str,
    #[serde(rename = "potentialAction")]
    potential_action: Vec<CardAction>,
}

#[derive(Debug, Clone, Serialize)]
struct CardAction {
    #[serde(rename = "@type")]
    action_type: &'static str,
    name: &'static str,
    targets: Vec<CardActionTarget>,
}

#[derive(Debug, Clone, Serialize)]
struct CardActionTarget {
    os: &'static str,
    uri: String,
}

impl NotificationPayload {
    fn new(text: String, link: String, gate_ok: bool) -> Self {
        Self {
            card_type: "MessageCard",
            context: "https://schema.org/extensions",
            text,
            theme_color: if gate_ok {
                THEME_COLOR_OK
            } else {
                THEME_COLOR_FAILED
            },
            potential_action: vec![CardAction {
                action_type: "OpenUri",
                name: "Open sonar",
                targets: vec![CardActionTarget {
                    os: "default",
                    uri: link,
                }],
            }],
        }
    }

    /// Rendered markdown body.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn theme_color(&self) -> &str {
        self.theme_color
    }

    /// Call-to-action link of the card.
    pub fn link(&self) -> &str {
        &self.potential_action[0].targets[0].uri
    }
}

/// Builds the notification payload for one analysis snapshot.
///
/// Fails only when `options.project_url` is empty, validated before any
/// formatting work. A snapshot without a quality gate yields an empty body;
/// the payload is still produced so delivery can proceed.
pub fn build_payload(
    snapshot: &AnalysisSnapshot,
    options: &PayloadOptions,
    gate_ok: bool,
) -> Result<NotificationPayload, NotifyError> {
    if options.project_url.trim().is_empty() {
        return Err(NotifyError::InvalidArgument("project_url"));
    }

    let branch_url = project_branch_url(snapshot, &options.project_url);

    let mut body = String::new();
    if let Some(gate) = &snapshot.quality_gate {
        body.push_str(&format!(
            "# {} {} - [{}]({})\n\n",
            gate.name,
            gate.status.as_str(),
            snapshot.project_name,
            branch_url
        ));

        body.push_str(&commit_line(snapshot, options, gate.status.is_ok()));

        if let Some(name) = non_main_branch_name(snapshot) {
            body.push_str(&format!("* **Branch**: {}\n", name));
        }

        body.push_str(&format!(
            "* **Date**: {}\n",
            snapshot.date.format("%Y-%m-%d %H:%M:%S")
        ));

        if options.fail_only {
            for condition in filter_fail_only(&gate.conditions) {
                body.push_str(&translate_condition(&condition));
            }
        } else {
            for condition in &gate.conditions {
                body.push_str(&translate_condition(condition));
            }
        }

        body.push_str(&format!("\n\nSee {}", branch_url));
    }

    info!(body = %body, "notification message rendered");

    Ok(NotificationPayload::new(body, branch_url, gate_ok))
}

/// Commit line with the optional link override and, for a failed gate, the
/// change author attribution.
fn commit_line(
    snapshot: &AnalysisSnapshot,
    options: &PayloadOptions,
    gate_passed: bool,
) -> String {
    let mut line = String::from("* **Commit**: ");
    match &options.commit_url {
        Some(url) => line.push_str(&format!("[{}]({})", snapshot.revision_id, url)),
        None => line.push_str(&snapshot.revision_id),
    }
    if !gate_passed {
        if let Some(author) = author_suffix(options) {
            line.push_str(" by ");
            line.push_str(&author);
        }
    }
    line.push('\n');
    line
}

/// Author attribution. The email renders as a mention token and wins over
/// the display name; the name is kept as a parenthesized suffix when both
/// are set.
fn author_suffix(options: &PayloadOptions) -> Option<String> {
    match (&options.change_author_email, &options.change_author_name) {
        (Some(email), Some(name)) => Some(format!("<at>{}</at> ({})", email, name)),
        (Some(email), None) => Some(format!("<at>{}</at>", email)),
        (None, Some(name)) => Some(name.clone()),
        (None, None) => None,
    }
}

/// Project URL with the branch filter appended for named non-main branches.
fn project_branch_url(snapshot: &AnalysisSnapshot, project_url: &str) -> String {
    match non_main_branch_name(snapshot) {
        Some(name) => format!("{}&branch={}", project_url, name),
        None => project_url.to_string(),
    }
}

fn non_main_branch_name(snapshot: &AnalysisSnapshot) -> Option<&str> {
    snapshot
        .branch
        .as_ref()
        .filter(|branch| !branch.is_main)
        .and_then(|branch| branch.name.as_deref())
}
