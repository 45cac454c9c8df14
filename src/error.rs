use thiserror::Error;

use crate::models::BillStatus;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Bill not found: {0}")]
    BillNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot move bill from {from} to {to}")]
    InvalidTransition { from: BillStatus, to: BillStatus },

    #[error("Bill is locked ({0}); changes are no longer allowed")]
    BillLocked(BillStatus),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SplitError>;
