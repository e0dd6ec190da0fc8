use crate::serializable_struct_with_defaults;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Bottom-up fill of the dense `(count, capacity)` table.
    Iterative,
    /// Top-down memoized recursion, bounded by `max_recursion_depth`.
    Recursive,
    /// Iterative when the dense table fits `max_table_bytes`, otherwise recursive.
    #[default]
    Auto,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Iterative => write!(f, "iterative"),
            Strategy::Recursive => write!(f, "recursive"),
            Strategy::Auto => write!(f, "auto"),
        }
    }
}

serializable_struct_with_defaults! {
    EngineConfig {
        strategy: Strategy = Strategy::Auto,
        max_recursion_depth: usize = 4096,
        max_table_bytes: usize = 256 << 20,
    }
}

serializable_struct_with_defaults! {
    GeneratorConfig {
        num_candidates: usize = 25,
        capacity: i64 = 500,
        min_cost: i64 = 10,
        max_cost: i64 = 100,
        min_value: i64 = 100,
        max_value: i64 = 1000,
    }
}
