use std::fmt;

/// Result type for proofroom-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the storage layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// A payload could not be encoded for storage
    Encode(serde_json::Error),

    /// The backend is configured but cannot be reached
    Unavailable(String),

    /// A revision-checked write kept losing to concurrent writers
    Conflict { namespace: String, key: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Encode(err) => write!(f, "Encode error: {}", err),
            Error::Unavailable(msg) => write!(f, "Backend unavailable: {}", msg),
            Error::Conflict { namespace, key } => {
                write!(f, "Write conflict on {}:{}", namespace, key)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Encode(err) => Some(err),
            Error::Unavailable(_) | Error::Conflict { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encode(err)
    }
}
