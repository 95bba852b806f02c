use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotaryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Memo decode failed: {0}")]
    Decode(String),

    #[error("Ledger query failed: {0}")]
    Query(String),

    #[error("Transaction submission failed: {0}")]
    Submission(String),

    #[error("Payload encoding failed: {0}")]
    Encoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, NotaryError>;
