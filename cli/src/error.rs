use thiserror::Error;

use consumption_allocator_core_rs::AllocationError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("fee choice {index} is out of range (0..{count})")]
    FeeChoice { index: usize, count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Allocation(#[from] AllocationError),
}
