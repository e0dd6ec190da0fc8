use ahash::RandomState;

pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, RandomState>;

pub mod knapsack;
