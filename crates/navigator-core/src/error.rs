use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigatorError {
    #[error("catalog has no steps")]
    EmptyCatalog,

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("step {} out of range (catalog has {count} steps)", .index + 1)]
    StepOutOfRange { index: usize, count: usize },

    #[error("item {} out of range for step {} ({count} items)", .index + 1, .step + 1)]
    ItemOutOfRange {
        step: usize,
        index: usize,
        count: usize,
    },

    #[error("step {} is a {actual} step, expected {expected}", .step + 1)]
    StepKindMismatch {
        step: usize,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("cannot advance past step {}: {reason}", .step + 1)]
    AdvanceBlocked { step: usize, reason: String },

    #[error("invalid transition from {from}: {reason}")]
    InvalidTransition { from: String, reason: String },

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NavigatorError>;
