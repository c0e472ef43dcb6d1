use thiserror::Error;

#[derive(Error, Debug)]
pub enum IcError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, IcError>;

impl From<serde_json::Error> for IcError {
    fn from(err: serde_json::Error) -> Self {
        IcError::Encode(err.to_string())
    }
}

impl From<bincode::Error> for IcError {
    fn from(err: bincode::Error) -> Self {
        IcError::Encode(err.to_string())
    }
}

impl From<rmp_serde::encode::Error> for IcError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        IcError::Encode(err.to_string())
    }
}

impl From<csv::Error> for IcError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => IcError::Io(io),
            other => IcError::Encode(format!("{:?}", other)),
        }
    }
}

/// Shorthand for building an `InvalidParameter` error.
pub(crate) fn invalid(message: impl Into<String>) -> IcError {
    IcError::InvalidParameter(message.into())
}
