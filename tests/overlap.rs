//! End-to-end overlap detection scenarios and intersection properties

use mqtt_overlap::{intersects, ClientSubscriptionSet, SubscriptionEntry, TopicFilter};
use proptest::prelude::*;

fn entry(raw: &str) -> SubscriptionEntry {
    SubscriptionEntry::parse(raw).unwrap()
}

#[test]
fn warns_before_registering_duplicate_subscription() {
    let mut set = ClientSubscriptionSet::new();
    assert!(set.register(entry("sensors/+/temperature")));
    assert!(set.register(entry("$share/workers/jobs/#")));
    assert!(set.register(entry("alerts/critical")));

    let overlaps = set.find_overlaps("sensors/kitchen/temperature").unwrap();
    assert_eq!(overlaps, vec![&entry("sensors/+/temperature")]);

    // The candidate's share group does not shield it from overlap
    let overlaps = set.find_overlaps("$share/other/jobs/backfill").unwrap();
    assert_eq!(overlaps, vec![&entry("$share/workers/jobs/#")]);

    assert!(set.find_overlaps("metrics/#").unwrap().is_empty());
}

#[test]
fn session_lifecycle() {
    let mut set = ClientSubscriptionSet::new();
    set.register(entry("devices/#"));
    set.register(entry("$share/g/devices/+/status"));
    assert_eq!(set.find_overlaps("devices/door/status").unwrap().len(), 2);

    set.unregister(&entry("devices/#"));
    assert_eq!(set.find_overlaps("devices/door/status").unwrap().len(), 1);

    set.clear();
    assert!(set.is_empty());
}

/// Literal levels the property tests draw from; witness enumeration below
/// relies on generated filters using only these literals.
const TOPIC_ALPHABET: [&str; 4] = ["a", "b", "c", ""];

fn filter_strategy() -> impl Strategy<Value = String> {
    let level = prop_oneof![
        Just("a"),
        Just("b"),
        Just("c"),
        Just(""),
        Just("+"),
    ];
    (proptest::collection::vec(level, 1..4), any::<bool>()).prop_map(|(mut levels, multi)| {
        if multi {
            levels.push("#");
        }
        levels.join("/")
    })
}

/// Exhaustively search for a concrete topic matched by both filters,
/// over the generation alphabet and up to the longer filter's depth
fn common_topic_exists(a: &TopicFilter, b: &TopicFilter) -> bool {
    let max_levels = a.levels().len().max(b.levels().len());
    let mut topics: Vec<String> = TOPIC_ALPHABET.iter().map(|s| s.to_string()).collect();
    let mut frontier = topics.clone();
    for _ in 1..max_levels {
        let deeper: Vec<String> = frontier
            .iter()
            .flat_map(|topic| {
                TOPIC_ALPHABET
                    .iter()
                    .map(move |level| format!("{}/{}", topic, level))
            })
            .collect();
        topics.extend(deeper.iter().cloned());
        frontier = deeper;
    }
    topics.iter().any(|topic| a.matches(topic) && b.matches(topic))
}

proptest! {
    #[test]
    fn intersection_is_reflexive(raw in filter_strategy()) {
        let filter = TopicFilter::parse(&raw).unwrap();
        prop_assert!(intersects(&filter, &filter));
    }

    #[test]
    fn intersection_is_symmetric(raw_a in filter_strategy(), raw_b in filter_strategy()) {
        let filter_a = TopicFilter::parse(&raw_a).unwrap();
        let filter_b = TopicFilter::parse(&raw_b).unwrap();
        prop_assert_eq!(
            intersects(&filter_a, &filter_b),
            intersects(&filter_b, &filter_a)
        );
    }

    #[test]
    fn intersection_agrees_with_witness_search(
        raw_a in filter_strategy(),
        raw_b in filter_strategy(),
    ) {
        let filter_a = TopicFilter::parse(&raw_a).unwrap();
        let filter_b = TopicFilter::parse(&raw_b).unwrap();
        prop_assert_eq!(
            intersects(&filter_a, &filter_b),
            common_topic_exists(&filter_a, &filter_b),
            "filters {} and {}", filter_a, filter_b
        );
    }
}
