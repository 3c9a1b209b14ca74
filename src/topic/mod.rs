//! Topic filter parsing and wildcard intersection
//!
//! Implements the MQTT topic filter model used for subscription-overlap
//! detection: a filter is an ordered sequence of levels, each either a
//! literal, a single-level wildcard (+) or a trailing multi-level
//! wildcard (#). Filters are validated at construction and never mutated
//! afterwards.

mod error;
mod intersect;


pub use error::ParseError;
pub use intersect::intersects;

use std::fmt;
use std::str::FromStr;

use compact_str::CompactString;
use smallvec::SmallVec;

/// A single level of a topic filter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    /// Concrete level text; may be empty (MQTT permits `a//b`)
    Literal(CompactString),
    /// Single-level wildcard (+) - matches exactly one level
    SingleWildcard,
    /// Multi-level wildcard (#) - matches zero or more trailing levels
    MultiWildcard,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::SingleWildcard => f.write_str("+"),
            Self::MultiWildcard => f.write_str("#"),
        }
    }
}

/// A validated MQTT topic filter
///
/// Invariants: at least one level, and a multi-level wildcard occurs at
/// most once and only as the final level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicFilter {
    levels: SmallVec<[Level; 8]>,
}

impl TopicFilter {
    /// Parse and validate a raw filter string
    ///
    /// Splitting is on `/` only; no normalization is applied, so literal
    /// levels are case-sensitive and may be empty. Parsing `""` yields a
    /// single empty literal level.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let mut levels: SmallVec<[Level; 8]> = SmallVec::new();
        for segment in raw.split('/') {
            // A previously seen # was not the final level
            if matches!(levels.last(), Some(Level::MultiWildcard)) {
                return Err(ParseError::InvalidWildcardPosition);
            }
            levels.push(match segment {
                "+" => Level::SingleWildcard,
                "#" => Level::MultiWildcard,
                text => Level::Literal(CompactString::from(text)),
            });
        }
        if levels.is_empty() {
            // Unreachable via split, kept for defensive completeness
            return Err(ParseError::EmptyFilter);
        }
        Ok(Self { levels })
    }

    /// The ordered levels of this filter
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Whether the filter ends in a multi-level wildcard
    pub fn has_multi_wildcard(&self) -> bool {
        matches!(self.levels.last(), Some(Level::MultiWildcard))
    }

    /// Check whether this filter matches a concrete topic name
    ///
    /// `+` matches exactly one level, `#` matches zero or more trailing
    /// levels. Topics starting with `$` are not matched by filters whose
    /// first level is a wildcard.
    pub fn matches(&self, topic: &str) -> bool {
        if topic.starts_with('$') && !matches!(self.levels[0], Level::Literal(_)) {
            return false;
        }

        let mut topic_levels = topic.split('/');
        for level in &self.levels {
            match level {
                Level::MultiWildcard => return true,
                Level::SingleWildcard => {
                    if topic_levels.next().is_none() {
                        return false;
                    }
                }
                Level::Literal(text) => match topic_levels.next() {
                    Some(topic_level) if topic_level == text.as_str() => {}
                    _ => return false,
                },
            }
        }
        // Both must be exhausted for a match
        topic_levels.next().is_none()
    }
}

impl fmt::Display for TopicFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, level) in self.levels.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", level)?;
        }
        Ok(())
    }
}

impl FromStr for TopicFilter {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}
