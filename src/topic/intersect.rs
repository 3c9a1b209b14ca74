//! Wildcard intersection between topic filters
//!
//! Two filters intersect when at least one concrete topic name would be
//! matched by both. Levels are compared pairwise: equal literals or a
//! wildcard on either side are compatible, distinct literals are not.
//! A trailing multi-level wildcard absorbs any remaining levels of the
//! other filter, including none of them.

use tracing::debug;

use super::{Level, TopicFilter};

/// Decide whether two topic filters can both match a common concrete topic
///
/// Symmetric and reflexive; runs in O(min(levels)) without allocating.
pub fn intersects(a: &TopicFilter, b: &TopicFilter) -> bool {
    let (short, long) = if a.levels().len() <= b.levels().len() {
        (a, b)
    } else {
        (b, a)
    };
    let short_levels = short.levels();
    let long_levels = long.levels();

    let pairs = if short_levels.len() == long_levels.len() {
        // Pairwise comparison; # on either side is an ordinary compatible
        // level at the final position.
        short_levels.iter().zip(long_levels.iter())
    } else if short.has_multi_wildcard() {
        // The shorter filter's trailing # absorbs every remaining level
        // of the longer one.
        short_levels[..short_levels.len() - 1]
            .iter()
            .zip(long_levels.iter())
    } else if long.has_multi_wildcard() && long_levels.len() == short_levels.len() + 1 {
        // The longer filter's # absorbs zero levels, so its named levels
        // must all line up with the shorter filter.
        short_levels
            .iter()
            .zip(long_levels[..long_levels.len() - 1].iter())
    } else {
        debug!(
            "topic filter {} has fewer levels than {} and no multi-level wildcard covers the difference, filters are disjoint",
            short, long
        );
        return false;
    };

    for (index, (level_a, level_b)) in pairs.enumerate() {
        if !compatible(level_a, level_b) {
            debug!(
                "topic filters {} and {} are disjoint at level {} ({} <=/=> {})",
                short,
                long,
                index + 1,
                level_a,
                level_b
            );
            return false;
        }
    }

    debug!("topic filters {} and {} intersect", a, b);
    true
}

/// Two levels are compatible unless they are distinct literals
fn compatible(a: &Level, b: &Level) -> bool {
    match (a, b) {
        (Level::MultiWildcard, _) | (_, Level::MultiWildcard) => true,
        (Level::SingleWildcard, _) | (_, Level::SingleWildcard) => true,
        (Level::Literal(a), Level::Literal(b)) => a == b,
    }
}
