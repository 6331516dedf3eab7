//! Replaying adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::adapters::recording::image_generator::{METHOD, PORT};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::BridgeError;
use crate::ports::image_generator::{
    GenerateFuture, ImageGenerator, ImageRequest, ImageResponse,
};

/// Serves recorded generation results instead of calling the live API.
pub struct ReplayingImageGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }

    fn next_output(&self) -> Result<Value, BridgeError> {
        let mut guard = self.replayer.lock().expect("replayer lock poisoned");
        guard
            .next_interaction(PORT, METHOD)
            .map(|interaction| interaction.output.clone())
            .map_err(BridgeError::Cassette)
    }
}

impl ImageGenerator for ReplayingImageGenerator {
    fn generate(&self, _request: &ImageRequest) -> GenerateFuture<'_> {
        let output = self.next_output();
        Box::pin(async move { decode_output(output?) })
    }
}

/// Decode a recorded output: `{"Err": "text"}` resurfaces the fault with its
/// exact recorded message, `{"Ok": value}` (or a bare value, for hand-written
/// cassettes) is deserialized as a response.
fn decode_output(output: Value) -> Result<ImageResponse, BridgeError> {
    if let Some(err) = output.get("Err") {
        let message = err.as_str().unwrap_or("replayed error").to_string();
        return Err(BridgeError::Replayed(message));
    }
    let ok = output.get("Ok").cloned().unwrap_or(output);
    serde_json::from_value(ok)
        .map_err(|e| BridgeError::Cassette(format!("recorded output does not deserialize: {e}")))
}
