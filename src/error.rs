//! Unified error type for the bridge.
//!
//! Every variant eventually lands in the failure envelope as its `Display`
//! text; the enum keeps fault categories distinct internally so callers can
//! reason about them even though the envelope flattens them to a string.

use thiserror::Error;

/// Errors that can occur between argument parsing and envelope printing.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The Imagen endpoint returned a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration file error.
    #[error("Config error: {0}")]
    Config(String),

    /// Width or height outside the accepted range.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The endpoint answered with a success status but an unusable body.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A cassette could not be loaded or could not serve the request.
    #[error("Cassette error: {0}")]
    Cassette(String),

    /// A fault recorded in a cassette, resurfaced verbatim.
    #[error("{0}")]
    Replayed(String),
}
