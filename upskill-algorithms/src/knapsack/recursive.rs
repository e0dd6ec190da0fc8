use super::DecisionTable;
use crate::HashMap;
use std::{io, panic, thread};
use upskill_challenges::allocation::Challenge;

/// Stack reserved per level of recursion, on top of `BASE_STACK_BYTES`.
const STACK_BYTES_PER_LEVEL: usize = 2048;
const BASE_STACK_BYTES: usize = 1 << 20;

#[derive(Clone, Copy)]
struct State {
    best_value: u128,
    include: bool,
}

/// Sparse memo holding only the states reachable from `(n, capacity)`.
pub(crate) struct Memo {
    best_value: u128,
    states: HashMap<(usize, u64), State>,
}

impl DecisionTable for Memo {
    fn best_value(&self) -> u128 {
        self.best_value
    }

    fn includes(&self, k: usize, capacity: u64) -> bool {
        self.states
            .get(&(k, capacity))
            .map_or(false, |state| state.include)
    }

    fn states_solved(&self) -> usize {
        self.states.len()
    }
}

/// Recursion depth equals the number of candidates; callers bound it beforehand. The
/// recursion runs on a dedicated thread whose stack is sized for that depth, so the
/// caller's stack size does not matter. Fails only if that thread cannot be spawned.
pub(crate) fn solve(challenge: &Challenge, capacity: u64) -> io::Result<Memo> {
    let stack_size = challenge
        .num_candidates()
        .saturating_mul(STACK_BYTES_PER_LEVEL)
        .saturating_add(BASE_STACK_BYTES);

    thread::scope(|scope| {
        let handle = thread::Builder::new()
            .name("knapsack-recursive".to_string())
            .stack_size(stack_size)
            .spawn_scoped(scope, || {
                let mut states = HashMap::default();
                let best_value =
                    solve_state(challenge, challenge.num_candidates(), capacity, &mut states);
                Memo { best_value, states }
            })?;
        Ok(handle
            .join()
            .unwrap_or_else(|payload| panic::resume_unwind(payload)))
    })
}

fn solve_state(
    challenge: &Challenge,
    k: usize,
    capacity: u64,
    states: &mut HashMap<(usize, u64), State>,
) -> u128 {
    if k == 0 || capacity == 0 {
        return 0;
    }
    if let Some(state) = states.get(&(k, capacity)) {
        return state.best_value;
    }

    let cost = challenge.costs[k - 1];
    let state = if cost > capacity {
        State {
            best_value: solve_state(challenge, k - 1, capacity, states),
            include: false,
        }
    } else {
        let with_item = solve_state(challenge, k - 1, capacity - cost, states)
            + challenge.values[k - 1] as u128;
        let without_item = solve_state(challenge, k - 1, capacity, states);
        if with_item > without_item {
            State {
                best_value: with_item,
                include: true,
            }
        } else {
            State {
                best_value: without_item,
                include: false,
            }
        }
    };

    states.insert((k, capacity), state);
    state.best_value
}
