//! Optimal 0/1 subset selection under a capacity budget.
//!
//! Candidates are considered from the back of the sequence to the front. A subproblem
//! `(k, c)` asks for the best value using only the first `k` candidates and `c` units of
//! remaining capacity; `(0, c)` and `(k, 0)` are worth nothing. Where a candidate fits,
//! including it is chosen only when it is strictly better than leaving it out, so
//! equal-value alternatives always resolve to the exclusion.
//!
//! Both strategies record an include flag per solved state and share one backward
//! reconstruction pass.

mod iterative;
mod recursive;

use tracing::debug;
use upskill_challenges::{
    allocation::{Candidate, Challenge, Selection},
    OptimizeError, Resource,
};
use upskill_structs::config::{EngineConfig, Strategy};

use std::collections::BTreeSet;

/// Solved subproblem decisions, indexed by `(k, capacity)` with `k >= 1`.
pub(crate) trait DecisionTable {
    fn best_value(&self) -> u128;

    fn includes(&self, k: usize, capacity: u64) -> bool;

    fn states_solved(&self) -> usize;
}

pub fn optimize(candidates: &[Candidate], capacity: i64) -> Result<Selection, OptimizeError> {
    optimize_with(candidates, capacity, &EngineConfig::default())
}

pub fn optimize_with(
    candidates: &[Candidate],
    capacity: i64,
    config: &EngineConfig,
) -> Result<Selection, OptimizeError> {
    let challenge = Challenge::new(candidates, capacity)?;
    solve_challenge(&challenge, config)
}

pub fn solve_challenge(
    challenge: &Challenge,
    config: &EngineConfig,
) -> Result<Selection, OptimizeError> {
    if challenge.num_candidates() == 0 || challenge.capacity == 0 {
        return Ok(Selection::new());
    }

    let strategy = plan(challenge, config)?;
    let capacity = working_capacity(challenge);
    debug!(
        %strategy,
        num_candidates = challenge.num_candidates(),
        capacity = challenge.capacity,
        working_capacity = capacity,
        "selecting candidates"
    );

    let selection = match strategy {
        Strategy::Recursive => {
            let memo = recursive::solve(challenge, capacity).map_err(|_| {
                OptimizeError::ResourceExhausted {
                    resource: Resource::RecursionDepth,
                    required: challenge.num_candidates(),
                    limit: config.max_recursion_depth,
                }
            })?;
            reconstruct(challenge, capacity, &memo)
        }
        Strategy::Iterative | Strategy::Auto => {
            reconstruct(challenge, capacity, &iterative::solve(challenge, capacity))
        }
    };

    debug!(
        best_value = %selection.best_value,
        num_selected = selection.selected.len(),
        "selection complete"
    );
    Ok(selection)
}

/// Resolves `config.strategy` to a concrete strategy whose resource needs fit the
/// configured limits. `auto` only fails when neither strategy fits, and then reports
/// the recursion depth.
pub fn plan(challenge: &Challenge, config: &EngineConfig) -> Result<Strategy, OptimizeError> {
    let num_candidates = challenge.num_candidates();
    let table_bytes = iterative::table_bytes(num_candidates, working_capacity(challenge));
    let table_fits = matches!(table_bytes, Some(bytes) if bytes <= config.max_table_bytes);
    let depth_fits = num_candidates <= config.max_recursion_depth;

    let table_exhausted = || OptimizeError::ResourceExhausted {
        resource: Resource::TableMemory,
        required: table_bytes.unwrap_or(usize::MAX),
        limit: config.max_table_bytes,
    };
    let depth_exhausted = || OptimizeError::ResourceExhausted {
        resource: Resource::RecursionDepth,
        required: num_candidates,
        limit: config.max_recursion_depth,
    };

    match config.strategy {
        Strategy::Iterative if table_fits => Ok(Strategy::Iterative),
        Strategy::Iterative => Err(table_exhausted()),
        Strategy::Recursive if depth_fits => Ok(Strategy::Recursive),
        Strategy::Recursive => Err(depth_exhausted()),
        Strategy::Auto if table_fits => Ok(Strategy::Iterative),
        Strategy::Auto if depth_fits => Ok(Strategy::Recursive),
        Strategy::Auto => Err(depth_exhausted()),
    }
}

/// Capacity the tables are built for. Beyond the total cost of every candidate that
/// can fit at all, extra capacity changes no decision as long as one unit stays
/// unspent, so the budget is clamped to that total plus one.
pub fn working_capacity(challenge: &Challenge) -> u64 {
    let fitting_cost: u128 = challenge
        .costs
        .iter()
        .filter(|&&cost| cost <= challenge.capacity)
        .map(|&cost| cost as u128)
        .sum();
    (challenge.capacity as u128).min(fitting_cost + 1) as u64
}

fn reconstruct(challenge: &Challenge, capacity: u64, table: &impl DecisionTable) -> Selection {
    let mut selected = BTreeSet::new();
    let mut capacity = capacity;
    for k in (1..=challenge.num_candidates()).rev() {
        if capacity == 0 {
            break;
        }
        if table.includes(k, capacity) {
            selected.insert(challenge.ids[k - 1].clone());
            capacity -= challenge.costs[k - 1];
        }
    }
    debug!(states_solved = table.states_solved(), "reconstructed selection");

    Selection {
        best_value: table.best_value(),
        selected,
    }
}
