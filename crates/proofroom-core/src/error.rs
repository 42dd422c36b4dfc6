use std::fmt;

/// Result type for proofroom-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the service layer
#[derive(Debug)]
pub enum Error {
    /// An operation referenced an id absent from the store
    NotFound { entity: &'static str, id: String },

    /// Rejected input: empty text, missing required fields, id collisions
    Validation(String),

    /// Storage layer error
    Store(proofroom_store::Error),
}

impl Error {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound { entity, id } => write!(f, "{} not found: {}", entity, id),
            Error::Validation(msg) => write!(f, "Validation error: {}", msg),
            Error::Store(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            Error::NotFound { .. } | Error::Validation(_) => None,
        }
    }
}

impl From<proofroom_store::Error> for Error {
    fn from(err: proofroom_store::Error) -> Self {
        Error::Store(err)
    }
}
