use super::DecisionTable;
use upskill_challenges::allocation::Challenge;

/// Dense bottom-up table. Only the previous value row is kept; include flags are kept
/// for every `(k, capacity)` with `k >= 1`.
pub(crate) struct DenseTable {
    width: usize,
    best_value: u128,
    include: Vec<bool>,
}

impl DecisionTable for DenseTable {
    fn best_value(&self) -> u128 {
        self.best_value
    }

    fn includes(&self, k: usize, capacity: u64) -> bool {
        self.include[(k - 1) * self.width + capacity as usize]
    }

    fn states_solved(&self) -> usize {
        self.include.len()
    }
}

/// Bytes held per capacity column by the two rolling `u128` value rows.
const VALUE_ROW_BYTES: usize = 2 * std::mem::size_of::<u128>();

/// Memory needed to solve `num_candidates` candidates over `0..=capacity`: one include
/// flag per candidate plus the two value rows, for every capacity column. `None` when
/// it does not fit in `usize`.
pub(crate) fn table_bytes(num_candidates: usize, capacity: u64) -> Option<usize> {
    let width = usize::try_from(capacity).ok()?.checked_add(1)?;
    num_candidates
        .checked_add(VALUE_ROW_BYTES)?
        .checked_mul(width)
}

/// Callers must have checked `table_bytes` against their memory limit.
pub(crate) fn solve(challenge: &Challenge, capacity: u64) -> DenseTable {
    let num_candidates = challenge.num_candidates();
    let width = capacity as usize + 1;

    let mut prev = vec![0u128; width];
    let mut curr = vec![0u128; width];
    let mut include = vec![false; num_candidates * width];

    for k in 1..=num_candidates {
        let cost = challenge.costs[k - 1];
        let value = challenge.values[k - 1] as u128;
        let row = &mut include[(k - 1) * width..k * width];

        curr[0] = 0;
        for c in 1..width {
            let exclude = prev[c];
            curr[c] = if cost <= c as u64 {
                let with_item = prev[c - cost as usize] + value;
                if with_item > exclude {
                    row[c] = true;
                    with_item
                } else {
                    exclude
                }
            } else {
                exclude
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    DenseTable {
        width,
        best_value: prev[width - 1],
        include,
    }
}
