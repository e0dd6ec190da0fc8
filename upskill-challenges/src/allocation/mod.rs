use crate::OptimizeError;
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fmt,
};
use upskill_structs::config::GeneratorConfig;

/// Identifier of a candidate: any JSON integer or string. Integer ids order before
/// string ids.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(untagged)]
pub enum CandidateId {
    Index(i64),
    Name(String),
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateId::Index(i) => write!(f, "{}", i),
            CandidateId::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<i64> for CandidateId {
    fn from(i: i64) -> Self {
        CandidateId::Index(i)
    }
}

impl From<&str> for CandidateId {
    fn from(name: &str) -> Self {
        CandidateId::Name(name.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(name: String) -> Self {
        CandidateId::Name(name)
    }
}

/// A candidate as supplied by a data source. `cost` and `value` are signed so that
/// bad input can be reported rather than rejected by the deserializer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: CandidateId,
    pub cost: i64,
    pub value: i64,
}

impl Candidate {
    pub fn new(id: impl Into<CandidateId>, cost: i64, value: i64) -> Self {
        Self {
            id: id.into(),
            cost,
            value,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub capacity: i64,
    pub candidates: Vec<Candidate>,
}

impl Instance {
    pub fn generate(seed: &[u8; 32], config: &GeneratorConfig) -> Result<Instance> {
        if config.capacity < 0 {
            return Err(anyhow!("Capacity ({}) must be non-negative", config.capacity));
        }
        if config.min_cost < 0 || config.min_cost > config.max_cost {
            return Err(anyhow!(
                "Invalid cost range [{}, {}]",
                config.min_cost,
                config.max_cost
            ));
        }
        if config.min_value < 0 || config.min_value > config.max_value {
            return Err(anyhow!(
                "Invalid value range [{}, {}]",
                config.min_value,
                config.max_value
            ));
        }

        let mut rng = SmallRng::from_seed(*seed);
        let candidates = (0..config.num_candidates)
            .map(|i| Candidate {
                id: CandidateId::Name(format!("candidate_{:03}", i)),
                cost: rng.gen_range(config.min_cost..=config.max_cost),
                value: rng.gen_range(config.min_value..=config.max_value),
            })
            .collect();

        Ok(Instance {
            capacity: config.capacity,
            candidates,
        })
    }
}

/// Result of an optimization: the best achievable value and the ids realizing it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub best_value: u128,
    pub selected: BTreeSet<CandidateId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Validated view of an instance, laid out one column per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub ids: Vec<CandidateId>,
    pub costs: Vec<u64>,
    pub values: Vec<u64>,
    pub capacity: u64,
}

impl Challenge {
    pub fn new(candidates: &[Candidate], capacity: i64) -> Result<Self, OptimizeError> {
        let capacity = u64::try_from(capacity).map_err(|_| {
            OptimizeError::invalid_input(
                "capacity",
                format!("must be non-negative (got {})", capacity),
            )
        })?;

        let mut seen = HashSet::with_capacity(candidates.len());
        let mut ids = Vec::with_capacity(candidates.len());
        let mut costs = Vec::with_capacity(candidates.len());
        let mut values = Vec::with_capacity(candidates.len());
        for (i, candidate) in candidates.iter().enumerate() {
            let cost = u64::try_from(candidate.cost).map_err(|_| {
                OptimizeError::invalid_input(
                    format!("candidates[{}].cost", i),
                    format!("must be non-negative (got {})", candidate.cost),
                )
            })?;
            let value = u64::try_from(candidate.value).map_err(|_| {
                OptimizeError::invalid_input(
                    format!("candidates[{}].value", i),
                    format!("must be non-negative (got {})", candidate.value),
                )
            })?;
            if !seen.insert(&candidate.id) {
                return Err(OptimizeError::invalid_input(
                    format!("candidates[{}].id", i),
                    format!("duplicates an earlier candidate ({})", candidate.id),
                ));
            }
            ids.push(candidate.id.clone());
            costs.push(cost);
            values.push(value);
        }

        Ok(Challenge {
            ids,
            costs,
            values,
            capacity,
        })
    }

    pub fn num_candidates(&self) -> usize {
        self.ids.len()
    }

    /// Positions of the selected candidates, in input order.
    pub fn selected_indices(&self, selection: &Selection) -> Result<Vec<usize>> {
        let positions: HashMap<&CandidateId, usize> =
            self.ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
        let mut indices = selection
            .selected
            .iter()
            .map(|id| {
                positions
                    .get(id)
                    .copied()
                    .ok_or_else(|| anyhow!("Candidate ({}) does not exist", id))
            })
            .collect::<Result<Vec<_>>>()?;
        indices.sort_unstable();
        Ok(indices)
    }

    pub fn total_cost(&self, indices: &[usize]) -> u128 {
        indices.iter().map(|&i| self.costs[i] as u128).sum()
    }

    pub fn total_value(&self, indices: &[usize]) -> u128 {
        indices.iter().map(|&i| self.values[i] as u128).sum()
    }

    /// Checks that `selection` fits the capacity and that its reported value is the
    /// value of the ids it lists. Returns that value.
    pub fn verify_selection(&self, selection: &Selection) -> Result<u128> {
        let indices = self.selected_indices(selection)?;

        let total_cost = self.total_cost(&indices);
        if total_cost > self.capacity as u128 {
            return Err(anyhow!(
                "Total cost ({}) exceeded capacity ({})",
                total_cost,
                self.capacity
            ));
        }

        let total_value = self.total_value(&indices);
        if total_value != selection.best_value {
            return Err(anyhow!(
                "Reported best value ({}) does not match value of selected candidates ({})",
                selection.best_value,
                total_value
            ));
        }
        Ok(total_value)
    }
}

impl TryFrom<&Instance> for Challenge {
    type Error = OptimizeError;

    fn try_from(instance: &Instance) -> Result<Self, Self::Error> {
        Challenge::new(&instance.candidates, instance.capacity)
    }
}
