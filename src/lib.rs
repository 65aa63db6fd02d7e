//! Quality Gate Notifier - posts analysis quality gate results to a chat
//! webhook.
//!
//! The host analysis engine invokes [`notification::dispatch_analysis`] (or a
//! registered [`notification::Dispatcher`]) once per completed analysis with
//! an [`analysis::AnalysisSnapshot`] and its settings lookup. The notifier
//! decides whether to send, renders the gate result as a message card, and
//! POSTs it to the configured webhook. Delivery is best-effort: failures are
//! logged and swallowed, never surfaced to the host.

pub mod analysis;
pub mod error;
pub mod notification;
pub mod settings;

pub use analysis::{
    AnalysisSnapshot, Branch, Condition, EvaluationStatus, GateOperator, GateStatus,
    QualityGate,
};
pub use error::NotifyError;
pub use notification::{
    build_payload, dispatch_analysis, DeliveryOptions, Dispatcher, NotificationPayload,
    PayloadOptions, ProxyConfig, WebhookClient,
};
pub use settings::{keys, DispatchSettings, SettingsLookup};
