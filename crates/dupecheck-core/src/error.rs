use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("master contact not found: {0}")]
    MasterNotFound(String),
    #[error("duplicate contact not found: {0}")]
    DuplicateNotFound(String),
    #[error("master contact {0} is also listed as a duplicate")]
    MasterInDuplicates(String),
    #[error("merge requires at least one duplicate")]
    NoDuplicates,
}
