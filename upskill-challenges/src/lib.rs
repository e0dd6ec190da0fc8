pub mod allocation;
pub mod error;

pub use error::{OptimizeError, Resource};
