//! CLI argument parsing with clap.

use clap::Parser;

/// Single-shot Imagen bridge: one request in, one JSON line out.
///
/// The invocation shape is fixed at exactly four positional arguments;
/// anything else is rejected before a request is attempted.
#[derive(Parser, Debug)]
#[command(name = "imagen-bridge", version, about)]
pub struct Cli {
    /// Google API key used to authenticate the request.
    #[arg(allow_hyphen_values = true)]
    pub api_key: String,

    /// Text prompt describing the desired image.
    #[arg(allow_hyphen_values = true)]
    pub prompt: String,

    /// Requested image width in pixels.
    #[arg(allow_hyphen_values = true)]
    pub width: i64,

    /// Requested image height in pixels.
    #[arg(allow_hyphen_values = true)]
    pub height: i64,
}
