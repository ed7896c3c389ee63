use proptest::prelude::*;
use sigungu_core::region::{display_name, province_code, province_name};
use sigungu_core::{Membership, Province, Snapshot, VisitStateStore};
use std::collections::BTreeSet;

#[path = "generators.rs"]
mod generators;
use generators::*;

fn apply(store: &mut VisitStateStore, ops: &[ToggleOp]) {
    for op in ops {
        match op {
            ToggleOp::Visited(name) => store.toggle_visited(name),
            ToggleOp::Wishlist(name) => store.toggle_wishlist(name),
        };
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(2000))]

    #[test]
    fn reassigned_prefix_always_resolves_to_daegu(suffix in "[0-9A-Z]{0,6}") {
        let code = format!("37310{suffix}");
        prop_assert_eq!(province_code(&code), Some(Province::Daegu));
    }

    #[test]
    fn listed_prefixes_resolve(province in arb_province(), suffix in "[0-9]{3}") {
        let code = format!("{}{suffix}", province.code());
        prop_assert!(province_name(&code).is_some());
    }

    #[test]
    fn unlisted_prefixes_are_unknown(prefix in arb_unlisted_prefix(), suffix in "[0-9]{0,3}") {
        let code = format!("{prefix}{suffix}");
        prop_assert_eq!(province_name(&code), None);
        prop_assert_eq!(display_name(&code, "군"), "군");
    }

    #[test]
    fn sets_stay_disjoint(ops in arb_ops()) {
        let mut store = VisitStateStore::new();
        apply(&mut store, &ops);

        let visited: BTreeSet<&str> = store.visited().collect();
        let wishlist: BTreeSet<&str> = store.wishlist().collect();
        prop_assert!(visited.is_disjoint(&wishlist));
    }

    #[test]
    fn wishlist_after_visited_moves_name(ops in arb_ops(), name in arb_name()) {
        let mut store = VisitStateStore::new();
        apply(&mut store, &ops);

        // Start from "visited" regardless of history, then flip to wishlist.
        if store.membership(&name) != Membership::Visited {
            store.toggle_visited(&name);
        }
        prop_assert_eq!(store.toggle_wishlist(&name), Membership::Wishlist);
        prop_assert!(!store.visited().any(|n| n == name));
    }

    #[test]
    fn toggle_visited_then_wishlist_ends_in_wishlist(ops in arb_ops(), name in arb_name()) {
        let mut store = VisitStateStore::new();
        apply(&mut store, &ops);

        store.toggle_visited(&name);
        store.toggle_wishlist(&name);

        prop_assert_eq!(store.membership(&name), Membership::Wishlist);
        let visited: BTreeSet<&str> = store.visited().collect();
        let wishlist: BTreeSet<&str> = store.wishlist().collect();
        prop_assert!(visited.is_disjoint(&wishlist));
    }

    #[test]
    fn numeric_and_text_codes_agree(code in 0_u64..100_000_000) {
        prop_assert_eq!(province_code(code), province_code(&code.to_string()));
        prop_assert_eq!(display_name(code, "군"), display_name(&code.to_string(), "군"));
    }

    #[test]
    fn reset_forgets_every_name(ops in arb_ops()) {
        let mut store = VisitStateStore::new();
        apply(&mut store, &ops);
        store.reset();

        for op in &ops {
            let (ToggleOp::Visited(name) | ToggleOp::Wishlist(name)) = op;
            prop_assert_eq!(store.membership(name), Membership::None);
        }
    }

    #[test]
    fn snapshot_restore_round_trips(ops in arb_ops()) {
        let mut store = VisitStateStore::new();
        apply(&mut store, &ops);

        let mut restored = VisitStateStore::new();
        restored.restore(store.snapshot());
        prop_assert_eq!(&restored, &store);

        let json = serde_json::to_string(&store.snapshot()).expect("serialize");
        let decoded: Snapshot = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(VisitStateStore::from_snapshot(decoded), store);
    }

    #[test]
    fn conquest_iff_all_siblings_visited(
        districts in arb_dataset(),
        visit_mask in prop::collection::vec(any::<bool>(), 40),
        target in arb_province(),
    ) {
        let mut store = VisitStateStore::new();
        for (district, visit) in districts.iter().zip(&visit_mask) {
            let name = district.display_name();
            if *visit && store.membership(&name) != Membership::Visited {
                store.toggle_visited(&name);
            }
        }

        let target_code = format!("{}000", target.code());
        let conquest = store.province_conquest(&districts, &target_code);

        let siblings: Vec<_> = districts
            .iter()
            .filter(|d| d.province() == province_code(&target_code))
            .collect();
        let all_visited = siblings
            .iter()
            .all(|d| store.membership(&d.display_name()) == Membership::Visited);

        prop_assert_eq!(conquest.total, siblings.len());
        prop_assert_eq!(conquest.conquered, !siblings.is_empty() && all_visited);
    }
}
