//! Error types for the cashindex client.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the client workflow.
///
/// Validation failures are deliberately soft: callers of the CID validator
/// ignore them and keep the previous valid/length state, letting the user
/// retry by re-editing. Submission and channel failures are hard errors and
/// end the current attempt; nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("submission failed with status {status}")]
    SubmissionFailed { status: u16 },

    /// Vote-specific 403: the target transaction has no confirmations yet.
    #[error("wait for the transaction to confirm before commenting")]
    VoteForbidden,

    /// Vote-specific 404: the target transaction is not in the index.
    #[error("file not found in the index")]
    FileNotFound,

    #[error("invalid response: {0}")]
    BadResponse(String),

    #[error("confirmation channel error: {0}")]
    Channel(String),

    #[error("confirmation channel closed before a message arrived")]
    ChannelClosed,

    #[error(transparent)]
    Flow(#[from] crate::flow::FlowError),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "qrcode")]
    #[error("QR generation failed: {0}")]
    Qr(String),
}
