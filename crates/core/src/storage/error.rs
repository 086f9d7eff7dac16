use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Transient failure: {0}")]
    Transient(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Coarse classification of a [`RepositoryError`], used by handlers to pick a
/// response without inspecting backend details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryErrorKind {
    /// The write collided with an existing record.
    Conflict,
    /// The addressed record does not exist.
    NotFound,
    /// Timeout, throttling or connectivity. The same request may succeed later.
    Transient,
    /// Anything else.
    Unknown,
}

impl RepositoryError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> RepositoryErrorKind {
        match self {
            RepositoryError::AlreadyExists { .. } => RepositoryErrorKind::Conflict,
            RepositoryError::NotFound { .. } => RepositoryErrorKind::NotFound,
            RepositoryError::ConnectionFailed(_) | RepositoryError::Transient(_) => {
                RepositoryErrorKind::Transient
            }
            RepositoryError::QueryFailed(_) | RepositoryError::InvalidData(_) => {
                RepositoryErrorKind::Unknown
            }
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
