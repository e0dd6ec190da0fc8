//! Property tests for the selection engine.
//!
//! `PROPTEST_CASES` overrides the number of cases per property (default: 64).

use proptest::prelude::*;
use std::env;
use upskill_algorithms::knapsack::{optimize, optimize_with};
use upskill_challenges::allocation::{Candidate, Challenge, Selection};
use upskill_structs::config::{EngineConfig, Strategy as EngineStrategy};

const DEFAULT_PROPTEST_CASES: u32 = 64;

fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PROPTEST_CASES);
    ProptestConfig::with_cases(cases)
}

fn candidates_from(pairs: &[(i64, i64)]) -> Vec<Candidate> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, &(cost, value))| Candidate::new(i as i64, cost, value))
        .collect()
}

fn arb_candidates(min_cost: i64, max_len: usize) -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec((min_cost..=40i64, 0..=100i64), 0..=max_len)
        .prop_map(|pairs| candidates_from(&pairs))
}

fn exhaustive_best(candidates: &[Candidate], capacity: i64) -> u128 {
    let n = candidates.len();
    (0u32..(1 << n))
        .filter_map(|mask| {
            let chosen = (0..n).filter(|i| mask & (1 << i) != 0);
            let cost: i64 = chosen.clone().map(|i| candidates[i].cost).sum();
            let value: u128 = chosen.map(|i| candidates[i].value as u128).sum();
            (cost <= capacity).then_some(value)
        })
        .max()
        .unwrap_or(0)
}

fn with_strategy(strategy: EngineStrategy) -> EngineConfig {
    EngineConfig {
        strategy,
        ..EngineConfig::default()
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn prop_zero_capacity_selects_nothing(candidates in arb_candidates(0, 16)) {
        prop_assert_eq!(optimize(&candidates, 0).unwrap(), Selection::new());
    }

    #[test]
    fn prop_selection_fits_budget(candidates in arb_candidates(0, 16), capacity in 0..=200i64) {
        let selection = optimize(&candidates, capacity).unwrap();
        let challenge = Challenge::new(&candidates, capacity).unwrap();
        let indices = challenge.selected_indices(&selection).unwrap();
        prop_assert!(challenge.total_cost(&indices) <= capacity as u128);
        prop_assert_eq!(challenge.total_value(&indices), selection.best_value);
    }

    #[test]
    fn prop_repeated_calls_agree(candidates in arb_candidates(0, 16), capacity in 0..=200i64) {
        let first = optimize(&candidates, capacity).unwrap();
        let second = optimize(&candidates, capacity).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_best_value_grows_with_capacity(
        candidates in arb_candidates(0, 16),
        capacity in 0..=150i64,
        extra in 0..=50i64,
    ) {
        let smaller = optimize(&candidates, capacity).unwrap();
        let larger = optimize(&candidates, capacity + extra).unwrap();
        prop_assert!(smaller.best_value <= larger.best_value);
    }

    #[test]
    fn prop_matches_exhaustive_search(candidates in arb_candidates(1, 12), capacity in 0..=150i64) {
        let selection = optimize(&candidates, capacity).unwrap();
        prop_assert_eq!(selection.best_value, exhaustive_best(&candidates, capacity));
    }

    #[test]
    fn prop_unbounded_capacity_takes_all_value(candidates in arb_candidates(0, 16)) {
        let total_value: u128 = candidates.iter().map(|c| c.value as u128).sum();
        for strategy in [EngineStrategy::Auto, EngineStrategy::Iterative, EngineStrategy::Recursive] {
            let selection = optimize_with(&candidates, i64::MAX, &with_strategy(strategy)).unwrap();
            prop_assert_eq!(selection.best_value, total_value);
        }
    }

    #[test]
    fn prop_strategies_agree(candidates in arb_candidates(0, 16), capacity in 0..=200i64) {
        let iterative = optimize_with(&candidates, capacity, &with_strategy(EngineStrategy::Iterative)).unwrap();
        let recursive = optimize_with(&candidates, capacity, &with_strategy(EngineStrategy::Recursive)).unwrap();
        let auto = optimize_with(&candidates, capacity, &with_strategy(EngineStrategy::Auto)).unwrap();
        prop_assert_eq!(&iterative, &recursive);
        prop_assert_eq!(&iterative, &auto);
    }

    #[test]
    fn prop_negative_cost_is_rejected(
        candidates in arb_candidates(0, 8).prop_filter("non-empty", |c| !c.is_empty()),
        cost in i64::MIN..0,
        position in any::<prop::sample::Index>(),
    ) {
        let mut candidates = candidates;
        let i = position.index(candidates.len());
        candidates[i].cost = cost;
        let err = optimize(&candidates, 100).unwrap_err();
        let expected = format!("candidates[{}].cost", i);
        prop_assert!(err.to_string().contains(&expected));
    }
}
