//! The request dispatcher: folds one generation attempt into the envelope.

use base64::Engine;

use crate::envelope::Envelope;
use crate::ports::image_generator::{ImageGenerator, ImageRequest, ImageResponse};

/// Error text reported when the provider answered but produced no images.
pub const NO_IMAGES_ERROR: &str = "No images generated";

/// Issue exactly one generation request and map the outcome onto the
/// envelope. Faults never escape this boundary: every error becomes the
/// failure shape, so the caller always gets a JSON line.
pub async fn dispatch(generator: &dyn ImageGenerator, request: &ImageRequest) -> Envelope {
    match generator.generate(request).await {
        Ok(response) => envelope_from_response(response),
        Err(err) => Envelope::failure(err.to_string()),
    }
}

/// Base64-encode the first returned image; later images are ignored and an
/// empty response is a failure.
fn envelope_from_response(response: ImageResponse) -> Envelope {
    match response.images.into_iter().next() {
        Some(first) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(&first.data);
            Envelope::success(encoded, response.metadata)
        }
        None => Envelope::failure(NO_IMAGES_ERROR),
    }
}
