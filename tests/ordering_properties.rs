//! Property tests for combatant ordering and grouping
//!
//! The comparator must be a strict total order and grouping must partition
//! every eligible combatant exactly once, for arbitrary attribute values.

use std::cmp::Ordering;
use std::collections::HashSet;

use combat_groups::core::{Combatant, GroupOptions};
use combat_groups::grouping::{build_groups, compare, is_skipped, GroupingMode, ModeRegistry};
use proptest::prelude::*;
use serde_json::{json, Value};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

/// Values of every shape the comparator distinguishes
fn attribute_strategy() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(Value::Null)),
        any::<bool>().prop_map(|b| Some(json!(b))),
        (-20i64..20).prop_map(|n| Some(json!(n))),
        (-20i64..20).prop_map(|n| Some(json!(n.to_string()))),
        prop::string::string_regex("[a-zA-Z ]{1,8}")
            .unwrap()
            .prop_map(|s| Some(json!(s))),
        prop::string::string_regex("[a-zA-Z0-9]{16}")
            .unwrap()
            .prop_map(|s| Some(json!(s))),
        prop::string::string_regex("[a-z]{1,4}")
            .unwrap()
            .prop_map(|s| Some(json!([{ "id": s }]))),
    ]
}

fn flags_strategy() -> impl Strategy<Value = (bool, bool, bool)> {
    (prop::bool::weighted(0.9), any::<bool>(), any::<bool>())
}

/// Up to `max_len` combatants with unique ids and turn indices in canonical order
fn encounter_strategy(max_len: usize) -> impl Strategy<Value = Vec<Combatant>> {
    prop::collection::vec(
        (
            attribute_strategy(),
            prop::option::of(0i32..25),
            flags_strategy(),
        ),
        0..max_len,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(turn, (value, init, (visible, hidden, player)))| {
                // Identifier order deliberately differs from turn order
                let prefix = ["m", "b", "x", "a"][turn % 4];
                let mut c = Combatant::new(format!("{}{:02}", prefix, turn), turn);
                c.initiative = init.map(f64::from);
                c.visible = visible;
                c.hidden = hidden;
                c.has_player_owner = player;
                if let Some(value) = value {
                    c.attributes = json!({ "key": value });
                }
                c
            })
            .collect()
    })
}

fn options_strategy() -> impl Strategy<Value = GroupOptions> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(sort, hidden, players)| {
        GroupOptions {
            sort_enabled: sort,
            skip_hidden: hidden,
            skip_player_characters: players,
            skip_by_group: true,
        }
    })
}

/// An encounter together with a reordering of it; turn indices travel with each combatant
fn shuffled_encounter_strategy() -> impl Strategy<Value = (Vec<Combatant>, Vec<Combatant>)> {
    encounter_strategy(150).prop_flat_map(|combatants| {
        let original = combatants.clone();
        (Just(original), Just(combatants).prop_shuffle())
    })
}

fn registry() -> ModeRegistry {
    ModeRegistry::new(vec![GroupingMode::path("key", "key")]).unwrap()
}

// =============================================================================
// COMPARATOR PROPERTIES
// =============================================================================

proptest! {
    /// compare(a, b) and compare(b, a) are always opposite and never equal
    #[test]
    fn compare_is_antisymmetric(
        combatants in encounter_strategy(24),
        options in options_strategy(),
    ) {
        for a in &combatants {
            for b in &combatants {
                let forward = compare(a, b, "key", &options);
                let backward = compare(b, a, "key", &options);

                prop_assert_eq!(forward, backward.reverse());
                if a.id != b.id {
                    prop_assert_ne!(forward, Ordering::Equal);
                }
            }
        }
    }

    /// Transitivity holds across every kind of value, mixed kinds included
    #[test]
    fn compare_is_transitive(
        combatants in encounter_strategy(14),
        options in options_strategy(),
    ) {
        for a in &combatants {
            for b in &combatants {
                for c in &combatants {
                    if compare(a, b, "key", &options) == Ordering::Less
                        && compare(b, c, "key", &options) == Ordering::Less
                    {
                        prop_assert_eq!(compare(a, c, "key", &options), Ordering::Less);
                    }
                }
            }
        }
    }

    /// Purely numeric values order transitively, ties included
    #[test]
    fn numeric_order_is_transitive(values in prop::collection::vec(0i32..6, 3)) {
        let combatants: Vec<Combatant> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Combatant::new(format!("n{}", i), i).with_initiative(f64::from(*v)))
            .collect();
        let options = GroupOptions::default();

        for a in &combatants {
            for b in &combatants {
                for c in &combatants {
                    if compare(a, b, "initiative", &options) == Ordering::Less
                        && compare(b, c, "initiative", &options) == Ordering::Less
                    {
                        prop_assert_eq!(compare(a, c, "initiative", &options), Ordering::Less);
                    }
                }
            }
        }
    }

    /// Sorting by the comparator agrees with numeric-descending, id-ascending order
    #[test]
    fn numeric_sort_matches_reference(values in prop::collection::vec(0i32..10, 0..20)) {
        let combatants: Vec<Combatant> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Combatant::new(format!("n{:02}", i), i).with_initiative(f64::from(*v)))
            .collect();
        let options = GroupOptions::default();

        let mut sorted: Vec<&Combatant> = combatants.iter().collect();
        sorted.sort_by(|a, b| compare(a, b, "initiative", &options));

        let mut reference: Vec<&Combatant> = combatants.iter().collect();
        reference.sort_by(|a, b| {
            b.initiative
                .partial_cmp(&a.initiative)
                .unwrap()
                .then_with(|| a.id.cmp(&b.id))
        });

        prop_assert_eq!(sorted, reference);
    }
}

// =============================================================================
// GROUPING PROPERTIES
// =============================================================================

proptest! {
    /// Every eligible combatant lands in exactly one group
    #[test]
    fn grouping_is_a_partition(
        combatants in encounter_strategy(24),
        options in options_strategy(),
    ) {
        let groups = build_groups(&combatants, "key", &registry(), &options, &[]).unwrap();

        let mut seen = HashSet::new();
        for group in &groups {
            prop_assert!(!group.is_empty());
            for member in group.members() {
                prop_assert!(seen.insert(member.id.clone()), "{} grouped twice", member.id);
            }
        }

        let expected: HashSet<_> = combatants
            .iter()
            .filter(|c| !is_skipped(c, &options))
            .map(|c| c.id.clone())
            .collect();
        prop_assert_eq!(seen, expected);
    }

    /// Members of a group are in comparator order
    #[test]
    fn members_are_sorted(
        combatants in encounter_strategy(24),
        options in options_strategy(),
    ) {
        let groups = build_groups(&combatants, "key", &registry(), &options, &[]).unwrap();

        for group in &groups {
            for pair in group.members().windows(2) {
                prop_assert_eq!(compare(pair[0], pair[1], "key", &options), Ordering::Less);
            }
        }
    }

    /// With numeric keys, groups run from the highest value to the lowest
    #[test]
    fn numeric_groups_descend(values in prop::collection::vec(-5i64..5, 1..20)) {
        let combatants: Vec<Combatant> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Combatant::new(format!("n{:02}", i), i).with_attributes(json!({ "key": v })))
            .collect();
        let groups =
            build_groups(&combatants, "key", &registry(), &GroupOptions::default(), &[]).unwrap();

        let keys: Vec<i64> = groups
            .iter()
            .map(|g| g.first().attributes["key"].as_i64().unwrap())
            .collect();
        let mut expected: Vec<i64> = values.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        expected.dedup();

        prop_assert_eq!(keys, expected);
    }

    /// Rebuilding from the same snapshot gives identical output
    #[test]
    fn grouping_is_stable(
        combatants in encounter_strategy(24),
        options in options_strategy(),
    ) {
        let first: Vec<_> = build_groups(&combatants, "key", &registry(), &options, &[])
            .unwrap()
            .iter()
            .map(|g| g.summary())
            .collect();
        let second: Vec<_> = build_groups(&combatants, "key", &registry(), &options, &[])
            .unwrap()
            .iter()
            .map(|g| g.summary())
            .collect();

        prop_assert_eq!(first, second);
    }

    /// Large mixed-kind encounters group without panicking
    #[test]
    fn large_mixed_encounters_group(
        combatants in encounter_strategy(150),
        options in options_strategy(),
    ) {
        let groups = build_groups(&combatants, "key", &registry(), &options, &[]).unwrap();

        for pair in groups.windows(2) {
            prop_assert_eq!(compare(pair[0].first(), pair[1].first(), "key", &options), Ordering::Less);
        }
    }

    /// Input order never changes the groups or their order
    #[test]
    fn grouping_ignores_input_order(
        (original, shuffled) in shuffled_encounter_strategy(),
        options in options_strategy(),
    ) {
        let first: Vec<_> = build_groups(&original, "key", &registry(), &options, &[])
            .unwrap()
            .iter()
            .map(|g| g.summary())
            .collect();
        let second: Vec<_> = build_groups(&shuffled, "key", &registry(), &options, &[])
            .unwrap()
            .iter()
            .map(|g| g.summary())
            .collect();

        prop_assert_eq!(first, second);
    }
}
