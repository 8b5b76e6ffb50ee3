use thiserror::Error;

/// Top-level error type for Courier.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Configuration error, raised at construction time.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP transport failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// A payload could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// An error sink failed to record a response.
    #[error("error sink failure: {0}")]
    Sink(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
