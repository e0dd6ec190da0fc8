use std::fmt;

/// Failures surfaced by the selection engine. Both variants are raised before any
/// subproblem is solved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptimizeError {
    #[error("invalid input: `{field}` {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("resource exhausted: {resource} requires {required}, limit is {limit}")]
    ResourceExhausted {
        resource: Resource,
        required: usize,
        limit: usize,
    },
}

impl OptimizeError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        OptimizeError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    RecursionDepth,
    TableMemory,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::RecursionDepth => write!(f, "recursion depth"),
            Resource::TableMemory => write!(f, "table memory (bytes)"),
        }
    }
}
