use thiserror::Error;

/// Errors produced while fetching or decoding device output.
///
/// The normalizer itself is infallible (a malformed subtree passes through
/// untouched rather than being rejected), so every variant here belongs to
/// the glue around it: the transports and their envelope decoding.
#[derive(Error, Debug)]
pub enum AnnealError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device accepted the transport but rejected the command
    /// (NX-API error envelope, vsh non-zero exit, and the like).
    #[error("device rejected command: {message}")]
    Device { message: String },

    /// The response arrived but did not carry the members the protocol
    /// promises (missing `result.body`, non-object output, ...).
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

pub type Result<T> = std::result::Result<T, AnnealError>;
