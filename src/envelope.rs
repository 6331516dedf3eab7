//! The single-line JSON result printed on stdout.
//!
//! The host process parses this line and nothing else, so stdout carries
//! exactly one of the two shapes below and all diagnostics stay on stderr.

use serde::{Deserialize, Serialize};

/// Error text printed when argument parsing fails.
pub const INVALID_ARGUMENTS_ERROR: &str =
    "Invalid arguments. Expected: api_key prompt width height";

/// Fallback line if envelope serialization itself fails. Static so it is
/// guaranteed to be valid JSON.
const SERIALIZE_FALLBACK: &str = r#"{"success":false,"error":"failed to serialize result envelope"}"#;

/// Result envelope: exactly one of the two shapes is ever printed.
///
/// `success` determines which of the remaining fields are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// The provider returned at least one image.
    Success {
        /// Always `true`.
        success: bool,
        /// Base64-encoded bytes of the first generated image.
        image: String,
        /// Opaque provider metadata, passed through as-is.
        response: serde_json::Value,
    },
    /// Anything else: provider fault, empty result, or a local failure.
    Failure {
        /// Always `false`.
        success: bool,
        /// Textual description of the fault.
        error: String,
    },
}

impl Envelope {
    /// Build the success shape.
    #[must_use]
    pub fn success(image: String, response: serde_json::Value) -> Self {
        Self::Success { success: true, image, response }
    }

    /// Build the failure shape.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure { success: false, error: error.into() }
    }

    /// The envelope printed for argument-parse failures.
    #[must_use]
    pub fn invalid_arguments() -> Self {
        Self::failure(INVALID_ARGUMENTS_ERROR)
    }

    /// Serialize to a single JSON line (no trailing newline).
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| SERIALIZE_FALLBACK.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_shape() {
        let envelope = Envelope::success("aGVsbG8=".into(), json!({"predictions": []}));
        assert_eq!(
            envelope.to_json(),
            r#"{"success":true,"image":"aGVsbG8=","response":{"predictions":[]}}"#
        );
    }

    #[test]
    fn failure_shape() {
        let envelope = Envelope::failure("boom");
        assert_eq!(envelope.to_json(), r#"{"success":false,"error":"boom"}"#);
    }

    #[test]
    fn invalid_arguments_text() {
        let envelope = Envelope::invalid_arguments();
        assert_eq!(
            envelope.to_json(),
            r#"{"success":false,"error":"Invalid arguments. Expected: api_key prompt width height"}"#
        );
    }

    #[test]
    fn output_is_one_line() {
        let envelope = Envelope::success("eHl6".into(), json!({"nested": {"key": "value"}}));
        assert!(!envelope.to_json().contains('\n'));
    }

    #[test]
    fn deserialize_picks_the_right_variant() {
        let success: Envelope =
            serde_json::from_str(r#"{"success":true,"image":"QUJD","response":null}"#).unwrap();
        assert!(matches!(success, Envelope::Success { success: true, .. }));

        let failure: Envelope =
            serde_json::from_str(r#"{"success":false,"error":"No images generated"}"#).unwrap();
        match failure {
            Envelope::Failure { success, error } => {
                assert!(!success);
                assert_eq!(error, "No images generated");
            }
            Envelope::Success { .. } => panic!("expected failure variant"),
        }
    }
}
