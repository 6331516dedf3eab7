//! Recording adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use crate::cassette::recorder::CassetteRecorder;
use crate::error::BridgeError;
use crate::ports::image_generator::{
    GenerateFuture, ImageGenerator, ImageRequest, ImageResponse,
};

/// Port and method names written into cassettes for this adapter.
pub const PORT: &str = "image_generator";
/// See [`PORT`].
pub const METHOD: &str = "generate";

/// Delegates to an inner generator and records each interaction.
pub struct RecordingImageGenerator {
    inner: Box<dyn ImageGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageGenerator {
    /// Wrap `inner` so its calls are captured by `recorder`.
    pub fn new(inner: Box<dyn ImageGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageGenerator for RecordingImageGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&request).await;
            record(&recorder, &request, &result);
            result
        })
    }
}

/// Write one interaction using the `Ok`/`Err` output convention. Faults are
/// recorded as their display text so they replay verbatim.
fn record(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    request: &ImageRequest,
    result: &Result<ImageResponse, BridgeError>,
) {
    let input = serde_json::to_value(request).expect("failed to serialize recorded request");
    let output = match result {
        Ok(response) => {
            let inner = serde_json::to_value(response).expect("failed to serialize Ok value");
            serde_json::json!({ "Ok": inner })
        }
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(PORT, METHOD, input, output);
}
