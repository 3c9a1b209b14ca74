//! Shared-subscription addressing and the per-session subscription registry
//!
//! A subscription target is either a bare topic filter or a shared
//! subscription ($share/{group}/{filter}). The registry keeps the set of
//! filters a session is currently subscribed to and reports, for each new
//! candidate, every registered entry whose underlying filter intersects
//! it. Overlap is advisory: brokers permit overlapping subscriptions, a
//! message matching two filters is simply delivered once per filter.


use std::fmt;
use std::str::FromStr;

use compact_str::CompactString;
use tracing::debug;

use crate::topic::{intersects, ParseError, TopicFilter};

const SHARE_PREFIX: &str = "$share/";

/// A subscription wrapped in a share group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SharedSubscription {
    group: CompactString,
    filter: TopicFilter,
}

impl SharedSubscription {
    /// Build a shared subscription from an already-parsed filter
    ///
    /// The group name must be non-empty and free of `/`, `+` and `#`.
    pub fn new(group: &str, filter: TopicFilter) -> Result<Self, ParseError> {
        if group.is_empty() {
            return Err(ParseError::MissingShareGroup);
        }
        if group.contains('/') || group.contains('+') || group.contains('#') {
            return Err(ParseError::InvalidShareGroup);
        }
        Ok(Self {
            group: CompactString::from(group),
            filter,
        })
    }

    /// The share group name
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The underlying topic filter
    pub fn filter(&self) -> &TopicFilter {
        &self.filter
    }
}

impl fmt::Display for SharedSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", SHARE_PREFIX, self.group, self.filter)
    }
}

/// The identity a client registers with the broker
///
/// Two entries are distinguished by their full original form (the share
/// group matters for identity and removal), but overlap detection compares
/// only the underlying filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubscriptionEntry {
    /// A bare topic filter
    Filter(TopicFilter),
    /// A shared subscription
    Shared(SharedSubscription),
}

impl SubscriptionEntry {
    /// Parse a raw subscription target, unwrapping a $share/ prefix
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        if let Some(rest) = raw.strip_prefix(SHARE_PREFIX) {
            let Some(slash) = rest.find('/') else {
                return Err(ParseError::MissingShareGroup);
            };
            let group = &rest[..slash];
            let filter_text = &rest[slash + 1..];
            if group.is_empty() || filter_text.is_empty() {
                return Err(ParseError::MissingShareGroup);
            }
            let filter = TopicFilter::parse(filter_text)?;
            return SharedSubscription::new(group, filter).map(Self::Shared);
        }
        TopicFilter::parse(raw).map(Self::Filter)
    }

    /// The filter this entry subscribes to, ignoring any share group
    pub fn underlying_filter(&self) -> &TopicFilter {
        match self {
            Self::Filter(filter) => filter,
            Self::Shared(shared) => &shared.filter,
        }
    }

    /// The share group, if this is a shared subscription
    pub fn share_group(&self) -> Option<&str> {
        match self {
            Self::Filter(_) => None,
            Self::Shared(shared) => Some(shared.group()),
        }
    }
}

impl fmt::Display for SubscriptionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(filter) => write!(f, "{}", filter),
            Self::Shared(shared) => write!(f, "{}", shared),
        }
    }
}

impl FromStr for SubscriptionEntry {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl From<TopicFilter> for SubscriptionEntry {
    fn from(filter: TopicFilter) -> Self {
        Self::Filter(filter)
    }
}

impl From<SharedSubscription> for SubscriptionEntry {
    fn from(shared: SharedSubscription) -> Self {
        Self::Shared(shared)
    }
}

/// The set of subscriptions currently active on one session
///
/// Owned by the session that maintains it; created on connect and
/// discarded on session termination. Entries are kept in registration
/// order. Identical entries are rejected, overlapping-but-not-identical
/// entries are allowed and are exactly what [`find_overlaps`] reports.
///
/// [`find_overlaps`]: ClientSubscriptionSet::find_overlaps
#[derive(Debug, Clone, Default)]
pub struct ClientSubscriptionSet {
    entries: Vec<SubscriptionEntry>,
}

impl ClientSubscriptionSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert an entry after a confirmed subscribe acknowledgement
    ///
    /// Returns false if an identical entry is already registered.
    pub fn register(&mut self, entry: SubscriptionEntry) -> bool {
        if self.entries.contains(&entry) {
            debug!("subscription {} is already registered", entry);
            return false;
        }
        debug!("registered subscription {}", entry);
        self.entries.push(entry);
        true
    }

    /// Remove an entry after a confirmed unsubscribe acknowledgement
    ///
    /// Returns false if no identical entry was registered.
    pub fn unregister(&mut self, entry: &SubscriptionEntry) -> bool {
        match self.entries.iter().position(|existing| existing == entry) {
            Some(index) => {
                self.entries.remove(index);
                debug!("unregistered subscription {}", entry);
                true
            }
            None => false,
        }
    }

    /// Drop all entries, e.g. on session termination
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entry: &SubscriptionEntry) -> bool {
        self.entries.contains(entry)
    }

    /// Iterate over the registered entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &SubscriptionEntry> {
        self.entries.iter()
    }

    /// Report every registered entry whose filter intersects the candidate
    ///
    /// The candidate's own share group, if any, is irrelevant; each
    /// registered entry is compared by its underlying filter but reported
    /// in its full original form, in registration order. Advisory only -
    /// this never prevents a registration, callers decide whether to warn.
    pub fn find_overlaps(&self, candidate: &str) -> Result<Vec<&SubscriptionEntry>, ParseError> {
        let candidate = SubscriptionEntry::parse(candidate)?;
        let filter = candidate.underlying_filter();
        let overlapping: Vec<&SubscriptionEntry> = self
            .entries
            .iter()
            .filter(|entry| intersects(filter, entry.underlying_filter()))
            .collect();
        if !overlapping.is_empty() {
            debug!(
                "subscription {} overlaps {} existing subscription(s)",
                candidate,
                overlapping.len()
            );
        }
        Ok(overlapping)
    }
}

impl<'a> IntoIterator for &'a ClientSubscriptionSet {
    type Item = &'a SubscriptionEntry;
    type IntoIter = std::slice::Iter<'a, SubscriptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
