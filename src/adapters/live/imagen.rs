//! Live adapter for the Imagen `:predict` endpoint.

use base64::Engine;
use reqwest::Client;
use serde_json::Value;

use crate::error::BridgeError;
use crate::params::aspect_ratio;
use crate::ports::image_generator::{
    GenerateFuture, GeneratedImage, ImageGenerator, ImageRequest, ImageResponse,
};

/// Model the original deployment pinned; overridable via config.
pub const DEFAULT_MODEL: &str = "imagen-3.0-generate-002";

/// Gemini Developer API base; overridable via config.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Live Imagen generator that calls the Google AI `:predict` API.
pub struct ImagenGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ImagenGenerator {
    /// Create a generator bound to the given credential, model, and API base.
    #[must_use]
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self { client: Client::new(), api_key, model, base_url }
    }

    fn predict_url(&self) -> String {
        format!("{}/models/{}:predict", self.base_url.trim_end_matches('/'), self.model)
    }
}

impl ImageGenerator for ImagenGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = self.predict_url();
            let body = predict_body(&request);
            log::debug!("POST {url} ({}x{})", request.width, request.height);

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(BridgeError::Api {
                    status: status.as_u16(),
                    message: api_error_message(&response_text),
                });
            }

            let parsed = parse_predict_response(&response_text)?;
            log::debug!("predict returned {} image(s)", parsed.images.len());
            Ok(parsed)
        })
    }
}

/// Build the `:predict` request body. One image is requested regardless of
/// how many the model could produce; the dispatcher only ever uses the first.
fn predict_body(request: &ImageRequest) -> Value {
    serde_json::json!({
        "instances": [{"prompt": request.prompt}],
        "parameters": {
            "sampleCount": 1,
            "aspectRatio": aspect_ratio(request.width, request.height),
        }
    })
}

/// Extract a usable message from an error body. Google error envelopes carry
/// `{"error": {"message": …}}`; anything else is passed through raw.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Parse a 2xx `:predict` body into images plus opaque metadata.
fn parse_predict_response(body: &str) -> Result<ImageResponse, BridgeError> {
    let raw: Value = serde_json::from_str(body)
        .map_err(|e| BridgeError::MalformedResponse(format!("response is not valid JSON: {e}")))?;

    let mut images = Vec::new();
    if let Some(predictions) = raw.get("predictions").and_then(Value::as_array) {
        for prediction in predictions {
            // Payload is either `bytesBase64Encoded` at the top level or
            // nested under `image`; filtered predictions carry neither.
            let encoded = prediction
                .get("bytesBase64Encoded")
                .or_else(|| prediction.get("image").and_then(|v| v.get("bytesBase64Encoded")))
                .and_then(Value::as_str);
            let Some(encoded) = encoded else { continue };

            let data = base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| BridgeError::MalformedResponse(format!("bad base64 image: {e}")))?;
            let mime_type = prediction
                .get("mimeType")
                .or_else(|| prediction.get("image").and_then(|v| v.get("mimeType")))
                .and_then(Value::as_str)
                .unwrap_or("image/png")
                .to_string();
            images.push(GeneratedImage { data, mime_type });
        }
    }

    let metadata = strip_image_payloads(raw);
    Ok(ImageResponse { images, metadata })
}

/// Drop the bulky base64 fields from the raw response. Everything else
/// (MIME types, filter reasons, model metadata) stays for the envelope.
fn strip_image_payloads(mut raw: Value) -> Value {
    if let Some(predictions) = raw.get_mut("predictions").and_then(Value::as_array_mut) {
        for prediction in predictions {
            if let Some(obj) = prediction.as_object_mut() {
                obj.remove("bytesBase64Encoded");
                obj.remove("image");
            }
        }
    }
    raw
}
