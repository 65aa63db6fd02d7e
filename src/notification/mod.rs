//! Notification pipeline: condition rendering, payload construction,
//! webhook delivery, and the dispatch decision that ties them together.
//!
//! Data flows one way per analysis event:
//! dispatch -> payload -> delivery -> outcome log. Nothing is retained
//! between invocations; every event builds fresh objects.

pub mod condition;
pub mod delivery;
pub mod dispatch;
pub mod payload;

pub use condition::{filter_fail_only, translate_condition};
pub use delivery::{DeliveryOptions, ProxyConfig, WebhookClient};
pub use dispatch::{dispatch_analysis, Dispatcher};
pub use payload::{build_payload, NotificationPayload, PayloadOptions};
