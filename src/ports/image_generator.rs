//! Image generator port: the seam between the dispatcher and the provider.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// A request for a single generated image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Requested image width in pixels.
    pub width: u32,
    /// Requested image height in pixels.
    pub height: u32,
}

/// One generated image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Raw image bytes (base64 in serialized form, e.g. inside cassettes).
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// MIME type reported by the provider (e.g. `"image/png"`).
    pub mime_type: String,
}

/// What came back from the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    /// The generated images; may be empty when everything was filtered.
    pub images: Vec<GeneratedImage>,
    /// Provider response metadata with the image payloads stripped out.
    /// Passed through to the envelope opaquely.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImageResponse, BridgeError>> + Send + 'a>>;

/// Generates images from text prompts.
pub trait ImageGenerator: Send + Sync {
    /// Issue one generation request.
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_round_trips_through_json() {
        let request = ImageRequest { prompt: "a red cat".into(), width: 512, height: 512 };
        let json = serde_json::to_string(&request).unwrap();
        let back: ImageRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.prompt, "a red cat");
        assert_eq!((back.width, back.height), (512, 512));
    }

    #[test]
    fn image_bytes_serialize_as_base64() {
        let image = GeneratedImage { data: vec![0xFF, 0xD8, 0xFF, 0xE0], mime_type: "image/jpeg".into() };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["data"], json!("/9j/4A=="));

        let back: GeneratedImage = serde_json::from_value(json).unwrap();
        assert_eq!(back.data, vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[test]
    fn response_metadata_defaults_to_null() {
        let response: ImageResponse = serde_json::from_str(r#"{"images": []}"#).unwrap();
        assert!(response.images.is_empty());
        assert!(response.metadata.is_null());
    }

    #[test]
    fn response_carries_opaque_metadata() {
        let response = ImageResponse {
            images: vec![GeneratedImage { data: vec![1, 2, 3], mime_type: "image/png".into() }],
            metadata: json!({"predictions": [{"mimeType": "image/png"}]}),
        };
        let json = serde_json::to_string(&response).unwrap();
        let back: ImageResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.images.len(), 1);
        assert_eq!(back.metadata["predictions"][0]["mimeType"], "image/png");
    }
}
