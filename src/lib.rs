//! mqtt-overlap - MQTT topic-filter intersection and subscription-overlap
//! detection
//!
//! Decides whether two MQTT topic filters (plain or wrapped in a shared
//! subscription) could both match at least one common concrete topic, and
//! uses that to report existing subscriptions a new one would duplicate
//! or shadow. Intended as the library boundary behind a client's
//! subscribe command: parse the user's raw filter string, ask the
//! session's subscription set for overlaps, and let the caller decide
//! whether to warn before sending the SUBSCRIBE.

pub mod subscription;
pub mod topic;

pub use subscription::{ClientSubscriptionSet, SharedSubscription, SubscriptionEntry};
pub use topic::{intersects, Level, ParseError, TopicFilter};
