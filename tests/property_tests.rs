/// Property-based tests using proptest
/// Tests invariants of the follow-list join, the deltas and handle normalization
use mes_dashboard::deltas::{compute_deltas, format_delta};
use mes_dashboard::enrichment::{enrich, FalsityTable, MissingScoreOrder};
use mes_dashboard::scoring_client::normalize_handle;
use proptest::prelude::*;

fn order_strategy() -> impl Strategy<Value = MissingScoreOrder> {
    prop_oneof![Just(MissingScoreOrder::First), Just(MissingScoreOrder::Last)]
}

// Property: the join keeps every followed handle exactly once
proptest! {
    #[test]
    fn enrich_is_a_permutation_of_input(
        following in prop::collection::vec("[a-e]{1,2}", 0..40),
        table in prop::collection::hash_map("[a-e]{1,2}", 0.0f64..1.0, 0..20),
        order in order_strategy()
    ) {
        let table = FalsityTable::from_pairs(table);
        let rows = enrich(&following, &table, order);

        prop_assert_eq!(rows.len(), following.len());

        let mut expected = following.clone();
        expected.sort();
        let mut actual: Vec<String> = rows.iter().map(|r| r.handle.clone()).collect();
        actual.sort();
        prop_assert_eq!(actual, expected);

        for row in &rows {
            prop_assert_eq!(row.falsity_score, table.get(&row.handle));
        }
    }

    #[test]
    fn enrich_sorted_with_contiguous_missing_block(
        following in prop::collection::vec("[a-h]{1,2}", 0..40),
        table in prop::collection::hash_map("[a-h]{1,2}", 0.0f64..1.0, 0..30),
        order in order_strategy()
    ) {
        let table = FalsityTable::from_pairs(table);
        let rows = enrich(&following, &table, order);

        let known: Vec<f64> = rows.iter().filter_map(|r| r.falsity_score).collect();
        prop_assert!(known.windows(2).all(|w| w[0] >= w[1]));

        let missing = rows.len() - known.len();
        let block = match order {
            MissingScoreOrder::First => &rows[..missing],
            MissingScoreOrder::Last => &rows[rows.len() - missing..],
        };
        prop_assert!(block.iter().all(|r| r.falsity_score.is_none()));
    }
}

// Property: deltas exist exactly when scores do
proptest! {
    #[test]
    fn deltas_follow_presence(
        misinfo in prop::option::of(0.0f64..=1.0),
        partisan in prop::option::of(-1.0f64..=1.0)
    ) {
        let deltas = compute_deltas(misinfo, partisan);
        prop_assert_eq!(deltas.misinfo.is_some(), misinfo.is_some());
        prop_assert_eq!(deltas.partisan.is_some(), partisan.is_some());
        if let Some(d) = deltas.misinfo {
            prop_assert!(d.is_finite());
        }
        if let Some(d) = deltas.partisan {
            prop_assert!(d.is_finite());
        }
    }

    #[test]
    fn delta_label_matches_sign(misinfo in 0.0f64..=1.0) {
        let deltas = compute_deltas(Some(misinfo), None);
        let delta = deltas.misinfo.unwrap();
        let label = format_delta(Some(delta)).unwrap();
        if delta < 0.0 {
            prop_assert!(label.ends_with(" lower than average"));
            prop_assert!(label.starts_with('-'));
        } else {
            prop_assert!(label.ends_with(" higher than average"));
            prop_assert!(!label.starts_with('-'));
        }
    }
}

// Property: handle normalization
proptest! {
    #[test]
    fn normalization_never_panics(raw in "\\PC*", lower in proptest::bool::ANY) {
        let _ = normalize_handle(&raw, lower);
    }

    #[test]
    fn at_prefix_is_ignored(handle in "[A-Za-z0-9_]{1,15}", lower in proptest::bool::ANY) {
        let with_at = normalize_handle(&format!("@{}", handle), lower).unwrap();
        let without_at = normalize_handle(&handle, lower).unwrap();
        prop_assert_eq!(with_at, without_at);
    }

    #[test]
    fn lowercase_option_only_changes_case(handle in "[A-Za-z0-9_]{1,15}") {
        let kept = normalize_handle(&handle, false).unwrap();
        let lowered = normalize_handle(&handle, true).unwrap();
        prop_assert_eq!(&kept, &handle);
        prop_assert_eq!(lowered, handle.to_lowercase());
    }
}
