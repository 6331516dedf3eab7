//! On-disk cassette format shared by the recorder and replayer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: provenance plus the ordered interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the recording was made.
    pub recorded_at: DateTime<Utc>,
    /// Model identifier that produced the recorded responses.
    pub model: String,
    /// Interactions in recording order.
    pub interactions: Vec<Interaction>,
}

/// One recorded port call.
///
/// `output` uses the `{"Ok": value}` / `{"Err": "display text"}` convention
/// so recorded faults replay with their original message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the recording, assigned by the recorder.
    pub seq: u64,
    /// Port name, e.g. `"image_generator"`.
    pub port: String,
    /// Method name, e.g. `"generate"`.
    pub method: String,
    /// Serialized request.
    pub input: serde_json::Value,
    /// Serialized result.
    pub output: serde_json::Value,
}
