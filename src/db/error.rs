use thiserror::Error;

/// Failures surfaced by a storage collaborator. The engine never retries
/// or masks these; they bubble up to the HTTP layer unchanged.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Record not found")]
    NotFound,

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Unknown storage error: {0}")]
    Unknown(String),
}
