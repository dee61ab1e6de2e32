//! Property-based tests for ranking, selection and debouncing.
//!
//! Tests validate:
//! 1. Ranking is deterministic, filters zero scores and keeps ties in order
//! 2. Arrow navigation never leaves the result bounds
//! 3. A burst of edits faster than the debounce commits exactly once

use prodfind::model::Product;
use prodfind::search::{rank, score, SearchController};
use prodfind::state::{NavPolicy, SelectionState};
use proptest::prelude::*;
use std::time::{Duration, Instant};

fn product_strategy() -> impl Strategy<Value = Product> {
    (
        "[0-9]{1,4}",
        "[A-Za-z ]{0,16}",
        prop::sample::select(vec!["clothing", "home", "tools", "accessories"]),
    )
        .prop_map(|(id, title, category)| Product::new(id, title, category))
}

fn catalog_strategy() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(product_strategy(), 0..30)
}

fn policy_strategy() -> impl Strategy<Value = NavPolicy> {
    prop_oneof![Just(NavPolicy::Wrap), Just(NavPolicy::Clamp)]
}

// ===== Property 1: Ranking =====

proptest! {
    #[test]
    fn ranking_is_deterministic(products in catalog_strategy(), query in "[a-z ]{0,6}") {
        let first: Vec<_> = rank(&products, &query).into_iter().map(|p| p.id.clone()).collect();
        let second: Vec<_> = rank(&products, &query).into_iter().map(|p| p.id.clone()).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ranked_products_all_score_and_descend(products in catalog_strategy(), query in "[a-z]{1,4}") {
        let needle = query.to_lowercase();
        let ranked = rank(&products, &query);

        for pair in ranked.windows(2) {
            prop_assert!(score(pair[0], &needle) >= score(pair[1], &needle));
        }
        for p in &ranked {
            prop_assert!(score(p, &needle) > 0);
        }

        let expected = products.iter().filter(|p| score(p, &needle) > 0).count();
        prop_assert_eq!(ranked.len(), expected);
    }

    #[test]
    fn equal_scores_keep_catalog_order(products in catalog_strategy(), query in "[a-z]{1,3}") {
        let needle = query.to_lowercase();
        let ranked = rank(&products, &query);
        let position = |p: &Product| products.iter().position(|q| std::ptr::eq(q, p));

        for pair in ranked.windows(2) {
            if score(pair[0], &needle) == score(pair[1], &needle) {
                prop_assert!(position(pair[0]) < position(pair[1]));
            }
        }
    }

    #[test]
    fn blank_queries_rank_nothing(products in catalog_strategy(), spaces in " {0,5}") {
        prop_assert!(rank(&products, &spaces).is_empty());
    }
}

// ===== Property 2: Navigation bounds =====

proptest! {
    #[test]
    fn arrows_stay_in_bounds(
        len in 0usize..20,
        moves in prop::collection::vec(any::<bool>(), 0..50),
        policy in policy_strategy(),
    ) {
        let mut selection = SelectionState::new();
        selection.open();

        for down in moves {
            if down {
                selection.move_down(len, policy);
            } else {
                selection.move_up(len, policy);
            }
            match selection.active_index() {
                Some(i) => prop_assert!(i < len),
                None => prop_assert_eq!(len, 0),
            }
        }
    }

    #[test]
    fn closed_dropdown_ignores_arrows(len in 0usize..20, policy in policy_strategy()) {
        let mut selection = SelectionState::new();
        selection.move_down(len, policy);
        selection.move_up(len, policy);
        prop_assert!(!selection.is_open());
        prop_assert_eq!(selection.active_index(), None);
    }
}

// ===== Property 3: Debounce =====

proptest! {
    #[test]
    fn fast_burst_commits_once(
        text in "[a-z]{1,12}",
        gaps in prop::collection::vec(0u64..300, 12),
    ) {
        let debounce = Duration::from_millis(300);
        let mut controller = SearchController::new(debounce);
        let mut now = Instant::now();
        let mut tickets = Vec::new();

        for (i, gap) in (1..=text.len()).zip(gaps) {
            controller.update_raw_input(&text[..i], now);
            now += Duration::from_millis(gap);
            tickets.extend(controller.poll_commit(now));
        }
        prop_assert!(tickets.is_empty(), "nothing commits mid-burst");

        now += debounce;
        tickets.extend(controller.poll_commit(now));

        prop_assert_eq!(tickets.len(), 1);
        prop_assert_eq!(tickets[0].query.as_str(), text.as_str());
    }
}
