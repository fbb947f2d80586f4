#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Operation rejected: {0}")]
    Rejected(String),
}
