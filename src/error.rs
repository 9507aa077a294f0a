//! Error types returned by mutating dictionary operations.

use thiserror::Error;

pub type DictResult<T> = Result<T, DictError>;

/// The two failure classes a caller can observe.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Malformed call: duplicate key on insert, or a key that must exist
    /// but does not.
    InvalidArgument,
    /// Storage for a key or value copy could not be obtained.
    OutOfMemory,
}

#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum DictError {
    #[error("key already present")]
    DuplicateKey,

    #[error("key not found")]
    KeyNotFound,

    #[error("dictionary is empty")]
    Empty,

    #[error("out of memory: could not obtain {requested} bytes")]
    OutOfMemory { requested: usize },
}

impl DictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DictError::DuplicateKey | DictError::KeyNotFound | DictError::Empty => {
                ErrorKind::InvalidArgument
            }
            DictError::OutOfMemory { .. } => ErrorKind::OutOfMemory,
        }
    }
}
