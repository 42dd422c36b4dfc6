use std::fmt;

/// Result type for proofroom-sdk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the SDK facade
#[derive(Debug)]
pub enum Error {
    /// Configuration file or data directory problem
    Config(String),

    /// IO operation failed
    Io(std::io::Error),

    /// Service layer error
    Core(proofroom_core::Error),

    /// Storage layer error
    Store(proofroom_store::Error),

    /// Internal error from the sync machinery
    Internal(anyhow::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Core(err) => write!(f, "{}", err),
            Error::Store(err) => write!(f, "{}", err),
            Error::Internal(err) => write!(f, "Internal error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Core(err) => Some(err),
            Error::Store(err) => Some(err),
            Error::Internal(err) => Some(err.as_ref()),
            Error::Config(_) => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<proofroom_core::Error> for Error {
    fn from(err: proofroom_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<proofroom_store::Error> for Error {
    fn from(err: proofroom_store::Error) -> Self {
        Error::Store(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
